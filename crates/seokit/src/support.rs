//! String helpers shared by the tag builders.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Substrings removed from titles so they cannot smuggle a meta refresh.
const INJECTION_MARKERS: &[&str] = &["http-equiv=", "url="];

/// Escape text for use inside HTML content or a double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Sanitize a raw title: strip markup, drop refresh-injection markers, then escape.
pub fn clean_string(input: &str) -> String {
    let mut cleaned = TAG_RE.replace_all(input, "").into_owned();
    // Removing one marker can join the halves of another.
    loop {
        let next = INJECTION_MARKERS
            .iter()
            .fold(cleaned.clone(), |acc, marker| acc.replace(marker, ""));
        if next == cleaned {
            break;
        }
        cleaned = next;
    }
    escape_html(&cleaned)
}

/// Make encoded JSON safe to embed in a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where their `\u` forms
/// decode to the same text.
pub fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

/// Join rendered lines with a newline, or with nothing when minifying.
pub fn join_lines<I, S>(lines: I, minify: bool) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sep = if minify { "" } else { "\n" };
    let mut out = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(line.as_ref());
    }
    out
}

/// `<meta name="…" content="…" />`
pub fn meta_name_tag(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}" />"#,
        escape_html(name),
        escape_html(content)
    )
}

/// `<meta property="…" content="…" />`
pub fn meta_property_tag(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}" />"#,
        escape_html(property),
        escape_html(content)
    )
}
