//! Fallback page titles derived from the request path.

use crate::config::SlugFormatter;
use convert_case::{Case, Casing};

/// Infer a title from a URL path.
///
/// The root path yields `app_name`. Otherwise the last segment, minus any
/// file extension, is passed to `formatter` or turned into a headline:
/// `/blog/getting-started` becomes `Getting Started`.
pub fn infer_title(path: &str, app_name: &str, formatter: Option<&SlugFormatter>) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return app_name.to_string();
    }

    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let slug = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };

    match formatter {
        Some(f) => f.format(slug),
        None => headline(slug),
    }
}

/// `my-awesome_post` → `My Awesome Post`.
pub fn headline(slug: &str) -> String {
    slug.to_case(Case::Title).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_uses_app_name() {
        assert_eq!(infer_title("/", "My Application", None), "My Application");
        assert_eq!(infer_title("", "My Application", None), "My Application");
    }

    #[test]
    fn test_slug_to_headline() {
        assert_eq!(infer_title("/blog/getting-started", "App", None), "Getting Started");
        assert_eq!(infer_title("/blog/my-awesome-post", "App", None), "My Awesome Post");
        assert_eq!(infer_title("/docs/read_me_first/", "App", None), "Read Me First");
    }

    #[test]
    fn test_extension_stripped() {
        assert_eq!(infer_title("/pages/contact-us.html", "App", None), "Contact Us");
    }

    #[test]
    fn test_custom_formatter() {
        let upper = SlugFormatter::new(|slug| slug.to_uppercase());
        assert_eq!(infer_title("/blog/test-page", "App", Some(&upper)), "TEST-PAGE");
    }
}
