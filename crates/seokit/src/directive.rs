//! `@seoKit` placeholder expansion for HTML templates.

use crate::error::Result;
use crate::manager::SeoKit;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Group 1 is the character before the `@`, kept in the output. A directive
// never follows a word character or another `@`, and `\b` rejects longer names.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\w@])@seoKit\b(?:\(\s*(true|false)?\s*\))?").unwrap()
});

/// Replace every `@seoKit`, `@seoKit()`, `@seoKit(true)` and `@seoKit(false)`
/// with the rendered fragment. `true` renders minified.
///
/// `@seoKitchen`, `me@seoKit.dev` and `@@seoKit` are left alone.
pub fn expand_directives(template: &str, seo: &SeoKit) -> Result<String> {
    if !DIRECTIVE_RE.is_match(template) {
        return Ok(template.to_string());
    }

    let pretty = seo.render(false)?;
    let minified = seo.render(true)?;
    let expanded = DIRECTIVE_RE.replace_all(template, |caps: &Captures<'_>| {
        let fragment = match caps.get(2).map(|m| m.as_str()) {
            Some("true") => &minified,
            _ => &pretty,
        };
        format!("{}{fragment}", &caps[1])
    });
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeoConfig;

    fn seo() -> SeoKit {
        let mut config = SeoConfig::default();
        config.defaults.robots = None;
        config.opengraph.enabled = false;
        config.twitter.enabled = false;
        let mut seo = SeoKit::new(&config, None);
        seo.title("Page").description("Desc");
        seo
    }

    #[test]
    fn test_all_forms_expand() {
        let seo = seo();
        let pretty = seo.render(false).unwrap();
        let minified = seo.render(true).unwrap();

        for (template, expected) in [
            ("<head>@seoKit</head>", &pretty),
            ("<head>@seoKit()</head>", &pretty),
            ("<head>@seoKit(false)</head>", &pretty),
            ("<head>@seoKit(true)</head>", &minified),
        ] {
            assert_eq!(
                expand_directives(template, &seo).unwrap(),
                format!("<head>{expected}</head>")
            );
        }
    }

    #[test]
    fn test_other_text_untouched() {
        let seo = seo();
        let template = "<p>email me @ seoKit or @seo</p>";
        assert_eq!(expand_directives(template, &seo).unwrap(), template);
    }

    #[test]
    fn test_longer_names_and_addresses_untouched() {
        let seo = seo();
        for template in [
            "<p>@seoKitchen and mail me@seoKit.dev</p>",
            "<p>@seoKit_v2 @@seoKit</p>",
        ] {
            assert_eq!(expand_directives(template, &seo).unwrap(), template);
        }
    }

    #[test]
    fn test_directive_at_start_and_after_punctuation() {
        let seo = seo();
        let pretty = seo.render(false).unwrap();
        let out = expand_directives("@seoKit\n(@seoKit)", &seo).unwrap();
        assert_eq!(out, format!("{pretty}\n({pretty})"));
    }

    #[test]
    fn test_multiple_directives() {
        let seo = seo();
        let out = expand_directives("@seoKit(true)|@seoKit(true)", &seo).unwrap();
        let minified = seo.render(true).unwrap();
        assert_eq!(out, format!("{minified}|{minified}"));
    }
}
