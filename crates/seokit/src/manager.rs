//! The per-request facade tying the four builders together.

use crate::config::SeoConfig;
use crate::data::{has_structured_data, SeoData};
use crate::error::Result;
use crate::json_ld::JsonLd;
use crate::meta::MetaTags;
use crate::opengraph::OpenGraph;
use crate::request::PageRequest;
use crate::support::join_lines;
use crate::twitter::TwitterCards;
use serde_json::Value;
use tracing::debug;

/// Meta tags, Open Graph, Twitter Cards and JSON-LD for a single page.
///
/// Build one per request with [`SeoKit::new`]; nothing is shared between
/// instances.
#[derive(Debug, Clone)]
pub struct SeoKit {
    meta: MetaTags,
    opengraph: OpenGraph,
    twitter: TwitterCards,
    json_ld: JsonLd,
    config: SeoConfig,
}

impl SeoKit {
    pub fn new(config: &SeoConfig, request: Option<&PageRequest>) -> Self {
        Self {
            meta: MetaTags::new(config, request),
            opengraph: OpenGraph::new(config, request),
            twitter: TwitterCards::new(config),
            json_ld: JsonLd::new(config, request),
            config: config.clone(),
        }
    }

    pub fn meta(&self) -> &MetaTags {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaTags {
        &mut self.meta
    }

    pub fn opengraph(&self) -> &OpenGraph {
        &self.opengraph
    }

    pub fn opengraph_mut(&mut self) -> &mut OpenGraph {
        &mut self.opengraph
    }

    pub fn twitter(&self) -> &TwitterCards {
        &self.twitter
    }

    pub fn twitter_mut(&mut self) -> &mut TwitterCards {
        &mut self.twitter
    }

    pub fn json_ld(&self) -> &JsonLd {
        &self.json_ld
    }

    pub fn json_ld_mut(&mut self) -> &mut JsonLd {
        &mut self.json_ld
    }

    pub fn config(&self) -> &SeoConfig {
        &self.config
    }

    /// Set the title on meta, Open Graph and Twitter.
    pub fn title(&mut self, title: &str) -> &mut Self {
        self.meta.set_title(title);
        self.opengraph.title(title);
        self.twitter.title(title);
        self
    }

    /// Set the description on meta, Open Graph and Twitter.
    pub fn description(&mut self, description: &str) -> &mut Self {
        self.meta.description(description);
        self.opengraph.description(description);
        self.twitter.description(description);
        self
    }

    /// Set the Open Graph primary image and the Twitter image.
    pub fn image(&mut self, url: &str) -> &mut Self {
        self.opengraph.primary_image(url);
        self.twitter.image(url, None);
        self
    }

    /// Set the canonical link and `og:url`.
    pub fn canonical(&mut self, url: &str) -> &mut Self {
        self.meta.canonical(url);
        self.opengraph.url(url);
        self
    }

    /// Apply a field set, falling back to the general title and description
    /// where the Open Graph ones are empty.
    pub fn apply_seo_data(&mut self, data: &SeoData) -> &mut Self {
        self.meta.set_title(&data.title);
        self.meta.description(&data.description);

        if let Some(robots) = data.robots.as_deref().filter(|r| !r.is_empty()) {
            self.meta.robots(robots);
        }
        if let Some(canonical) = data.canonical.as_deref().filter(|c| !c.is_empty()) {
            self.meta.canonical(canonical);
        }

        let og_title = data.effective_og_title();
        let og_description = data.effective_og_description();
        self.opengraph.title(og_title);
        self.opengraph.description(og_description);
        if !data.og_image.is_empty() {
            self.opengraph.primary_image(&data.og_image);
        }

        self.twitter.title(og_title);
        self.twitter.description(og_description);
        let twitter_image = data.effective_twitter_image();
        if !twitter_image.is_empty() {
            self.twitter.image(twitter_image, None);
        }

        if has_structured_data(data.structured_data.as_ref()) {
            match data.structured_data.clone() {
                Some(Value::Array(items)) => {
                    for item in items {
                        self.json_ld.push(item);
                    }
                }
                Some(schema) => {
                    self.json_ld.push(schema);
                }
                None => {}
            }
        }

        debug!("applied seo data titled {:?}", data.title);
        self
    }

    /// Render every enabled builder. Empty segments are skipped.
    pub fn render(&self, minify: bool) -> Result<String> {
        let mut segments = vec![self.meta.render(minify)];

        if self.config.opengraph.enabled {
            segments.push(self.opengraph.render(minify));
        }
        if self.config.twitter.enabled {
            segments.push(self.twitter.render(minify));
        }
        if self.config.json_ld.enabled {
            segments.push(self.json_ld.render(minify)?);
        }

        Ok(join_lines(
            segments.into_iter().filter(|s| !s.is_empty()),
            minify,
        ))
    }
}
