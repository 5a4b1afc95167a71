//! `<title>`, `<meta name>` and `<link>` tags.

use crate::config::{SeoConfig, UrlPolicy};
use crate::property_map::PropertyMap;
use crate::request::PageRequest;
use crate::support::{escape_html, join_lines, meta_name_tag};
use crate::title::infer_title;
use serde::Serialize;
use std::fmt;

/// Standard robots directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaRobots {
    Index,
    NoIndex,
    Follow,
    NoFollow,
    NoArchive,
    NoImageIndex,
    NoSnippet,
}

impl MetaRobots {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::NoIndex => "noindex",
            Self::Follow => "follow",
            Self::NoFollow => "nofollow",
            Self::NoArchive => "noarchive",
            Self::NoImageIndex => "noimageindex",
            Self::NoSnippet => "nosnippet",
        }
    }
}

impl fmt::Display for MetaRobots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the maps held by [`MetaTags`].
#[derive(Debug, Clone, Serialize)]
pub struct MetaTagsMap {
    pub title: String,
    pub meta: PropertyMap,
    pub links: PropertyMap,
    pub languages: PropertyMap,
}

/// Builder for the title, named meta tags, links and hreflang alternates.
#[derive(Debug, Clone)]
pub struct MetaTags {
    title: String,
    meta: PropertyMap,
    links: PropertyMap,
    languages: PropertyMap,
    config: SeoConfig,
}

impl MetaTags {
    /// Build with configured defaults applied for `request`.
    pub fn new(config: &SeoConfig, request: Option<&PageRequest>) -> Self {
        let mut tags = Self {
            title: String::new(),
            meta: PropertyMap::new(),
            links: PropertyMap::new(),
            languages: PropertyMap::new(),
            config: config.clone(),
        };
        tags.apply_defaults(request);
        tags
    }

    /// Sanitize `raw` and wrap it with the configured affixes.
    pub fn set_title(&mut self, raw: &str) -> &mut Self {
        self.title = self.config.affix_title(raw);
        self
    }

    /// The assembled title, already escaped.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_meta(&mut self, name: &str, content: &str) -> &mut Self {
        self.meta.insert(name, content);
        self
    }

    pub fn remove_meta(&mut self, name: &str) -> &mut Self {
        self.meta.remove(name);
        self
    }

    pub fn add_link(&mut self, rel: &str, href: &str) -> &mut Self {
        self.links.insert(rel, href);
        self
    }

    pub fn remove_link(&mut self, rel: &str) -> &mut Self {
        self.links.remove(rel);
        self
    }

    pub fn add_language(&mut self, hreflang: &str, href: &str) -> &mut Self {
        self.languages.insert(hreflang, href);
        self
    }

    pub fn remove_language(&mut self, hreflang: &str) -> &mut Self {
        self.languages.remove(hreflang);
        self
    }

    pub fn description(&mut self, description: &str) -> &mut Self {
        self.add_meta("description", description)
    }

    pub fn keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.add_meta("keywords", &joined)
    }

    /// Set robots from a single directive string.
    pub fn robots(&mut self, robots: &str) -> &mut Self {
        self.add_meta("robots", robots)
    }

    /// Set robots from a list of directives, joined with `", "`.
    pub fn robots_list<I, S>(&mut self, directives: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let joined = directives
            .into_iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.robots(&joined)
    }

    pub fn canonical(&mut self, url: &str) -> &mut Self {
        self.add_link("canonical", url)
    }

    pub fn amp_html(&mut self, url: &str) -> &mut Self {
        self.add_link("amphtml", url)
    }

    /// Add a `prev` pagination link when `condition` holds.
    pub fn prev(&mut self, url: &str, condition: bool) -> &mut Self {
        if condition {
            self.add_link("prev", url);
        }
        self
    }

    /// Add a `next` pagination link when `condition` holds.
    pub fn next(&mut self, url: &str, condition: bool) -> &mut Self {
        if condition {
            self.add_link("next", url);
        }
        self
    }

    pub fn meta_map(&self) -> &PropertyMap {
        &self.meta
    }

    pub fn links(&self) -> &PropertyMap {
        &self.links
    }

    pub fn languages(&self) -> &PropertyMap {
        &self.languages
    }

    pub fn to_map(&self) -> MetaTagsMap {
        MetaTagsMap {
            title: self.title.clone(),
            meta: self.meta.clone(),
            links: self.links.clone(),
            languages: self.languages.clone(),
        }
    }

    pub fn render(&self, minify: bool) -> String {
        let mut lines = vec![format!("<title>{}</title>", self.title)];

        for (name, content) in self.meta.flatten() {
            lines.push(meta_name_tag(name, content));
        }

        for (rel, href) in self.links.flatten() {
            lines.push(format!(
                r#"<link rel="{}" href="{}" />"#,
                escape_html(rel),
                escape_html(href)
            ));
        }

        for (hreflang, href) in self.languages.flatten() {
            lines.push(format!(
                r#"<link rel="alternate" hreflang="{}" href="{}" />"#,
                escape_html(hreflang),
                escape_html(href)
            ));
        }

        join_lines(lines, minify)
    }

    fn apply_defaults(&mut self, request: Option<&PageRequest>) {
        let inferred = match request {
            Some(req) if self.config.auto_title_from_url => Some(infer_title(
                req.path(),
                &self.config.app.name,
                self.config.title_inference.as_ref(),
            )),
            _ => None,
        };
        let title = inferred
            .or_else(|| self.config.defaults.title.clone())
            .unwrap_or_default();
        self.set_title(&title);

        if let Some(description) = self.config.defaults.description.clone() {
            if !description.is_empty() {
                self.description(&description);
            }
        }

        if let Some(req) = request {
            match self.config.defaults.canonical {
                UrlPolicy::Current => {
                    self.canonical(&req.current_url());
                }
                UrlPolicy::Full => {
                    self.canonical(&req.full_url());
                }
                UrlPolicy::Disabled => {}
            }
        }

        if let Some(robots) = self.config.defaults.robots.clone() {
            if !robots.is_empty() {
                self.robots(&robots);
            }
        }
    }
}

impl fmt::Display for MetaTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
