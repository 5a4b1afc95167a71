//! Configuration read once when a [`SeoKit`](crate::SeoKit) is built.
//!
//! The shape mirrors a JSON document:
//!
//! ```json
//! {
//!   "table_name": "seokit",
//!   "app": { "name": "Acme", "url": "https://acme.test", "locale": "en_US" },
//!   "auto_title_from_url": true,
//!   "defaults": { "title": "Acme", "after_title": "Acme", "canonical": null },
//!   "opengraph": { "enabled": true, "defaults": { "type": "website", "url": "full" } },
//!   "twitter": { "enabled": true, "defaults": { "card": "summary_large_image" } },
//!   "json_ld": { "enabled": true, "defaults": [] }
//! }
//! ```
//!
//! Affix and slug-formatter strategies cannot be expressed in JSON; set them
//! with [`SeoConfig::with_before_title`], [`SeoConfig::with_after_title`] and
//! [`SeoConfig::with_title_inference`].

use crate::error::{Result, SeoError};
use crate::support::{clean_string, escape_html};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_ROBOTS: &str =
    "index, follow, max-snippet:-1, max-image-preview:large, max-video-preview:-1";

/// Computes the text placed before or after a page title.
pub trait TitleAffix: Send + Sync {
    fn compute_affix(&self, title: &str) -> String;
}

/// An affix that ignores the title and always yields the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAffix(pub String);

impl TitleAffix for StaticAffix {
    fn compute_affix(&self, _title: &str) -> String {
        self.0.clone()
    }
}

impl<F> TitleAffix for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn compute_affix(&self, title: &str) -> String {
        self(title)
    }
}

/// Shared handle to a [`TitleAffix`] strategy.
#[derive(Clone)]
pub struct Affix(Arc<dyn TitleAffix>);

impl Affix {
    pub fn new(strategy: impl TitleAffix + 'static) -> Self {
        Self(Arc::new(strategy))
    }

    pub fn compute(&self, title: &str) -> String {
        self.0.compute_affix(title)
    }
}

impl fmt::Debug for Affix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Affix(..)")
    }
}

impl<'de> Deserialize<'de> for Affix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::new(StaticAffix(text)))
    }
}

/// Turns the last URL segment into a title.
#[derive(Clone)]
pub struct SlugFormatter(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl SlugFormatter {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, slug: &str) -> String {
        (self.0)(slug)
    }
}

impl fmt::Debug for SlugFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlugFormatter(..)")
    }
}

/// Where the default canonical link and `og:url` come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlPolicy {
    /// The request URL without its query string (`null` or absent).
    #[default]
    Current,
    /// The request URL including its query string (`"full"`).
    Full,
    /// No default is emitted (any other value, including `false`).
    Disabled,
}

impl UrlPolicy {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Current,
            Value::String(s) if s == "full" => Self::Full,
            _ => Self::Disabled,
        }
    }
}

impl<'de> Deserialize<'de> for UrlPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Application identity used for fallbacks (root title, site name, schemas).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_locale")]
    pub locale: String,
}

/// Defaults applied to [`MetaTags`](crate::MetaTags).
#[derive(Debug, Clone, Deserialize)]
pub struct MetaDefaults {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub before_title: Option<Affix>,

    #[serde(default)]
    pub after_title: Option<Affix>,

    #[serde(default = "default_separator")]
    pub title_separator: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub canonical: UrlPolicy,

    #[serde(default = "default_robots")]
    pub robots: Option<String>,
}

/// Defaults applied to [`OpenGraph`](crate::OpenGraph).
#[derive(Debug, Clone, Deserialize)]
pub struct OpenGraphDefaults {
    #[serde(default)]
    pub site_name: Option<String>,

    #[serde(default = "default_og_type", rename = "type")]
    pub og_type: String,

    #[serde(default)]
    pub url: UrlPolicy,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub image_secure_url: Option<String>,

    #[serde(default)]
    pub image_type: Option<String>,

    #[serde(default)]
    pub image_width: Option<u32>,

    #[serde(default)]
    pub image_height: Option<u32>,

    #[serde(default)]
    pub image_alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenGraphConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub defaults: OpenGraphDefaults,
}

/// Defaults applied to [`TwitterCards`](crate::TwitterCards).
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterDefaults {
    #[serde(default = "default_card")]
    pub card: Option<String>,

    #[serde(default)]
    pub site: Option<String>,

    #[serde(default)]
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub defaults: TwitterDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonLdConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Schemas added to every page. Accepts a single object or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub defaults: Vec<Value>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeoConfig {
    /// Table holding per-entity overrides.
    #[serde(default = "default_table_name")]
    pub table_name: String,

    #[serde(default)]
    pub app: AppConfig,

    /// Infer the title from the last URL segment when none is set.
    #[serde(default = "default_enabled")]
    pub auto_title_from_url: bool,

    #[serde(skip)]
    pub title_inference: Option<SlugFormatter>,

    #[serde(default)]
    pub defaults: MetaDefaults,

    #[serde(default)]
    pub opengraph: OpenGraphConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub json_ld: JsonLdConfig,
}

impl SeoConfig {
    /// Parse a JSON configuration document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SeoError::Config(e.to_string()))
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_before_title(mut self, affix: impl TitleAffix + 'static) -> Self {
        self.defaults.before_title = Some(Affix::new(affix));
        self
    }

    pub fn with_after_title(mut self, affix: impl TitleAffix + 'static) -> Self {
        self.defaults.after_title = Some(Affix::new(affix));
        self
    }

    pub fn with_title_inference(
        mut self,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.title_inference = Some(SlugFormatter::new(formatter));
        self
    }

    /// Sanitize a raw title and wrap it with the configured affixes.
    ///
    /// Affixes are computed from the raw title; their output and the separator
    /// are escaped. Empty affixes are dropped, so a lone prefix yields
    /// `"Pre - Title"`.
    pub fn affix_title(&self, raw: &str) -> String {
        let title = clean_string(raw);
        let affix =
            |slot: Option<&Affix>| slot.map(|a| escape_html(&a.compute(raw))).unwrap_or_default();
        let before = affix(self.defaults.before_title.as_ref());
        let after = affix(self.defaults.after_title.as_ref());

        if before.is_empty() && after.is_empty() {
            return title;
        }

        [before.as_str(), title.as_str(), after.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(&escape_html(&self.defaults.title_separator))
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) if map.is_empty() => Vec::new(),
        other => vec![other],
    })
}

fn default_table_name() -> String {
    "seokit".to_string()
}

fn default_app_name() -> String {
    "SeoKit".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_separator() -> String {
    " - ".to_string()
}

fn default_robots() -> Option<String> {
    Some(DEFAULT_ROBOTS.to_string())
}

fn default_og_type() -> String {
    "website".to_string()
}

fn default_card() -> Option<String> {
    Some("summary_large_image".to_string())
}

fn default_enabled() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            url: None,
            locale: default_locale(),
        }
    }
}

impl Default for MetaDefaults {
    fn default() -> Self {
        Self {
            title: None,
            before_title: None,
            after_title: None,
            title_separator: default_separator(),
            description: None,
            canonical: UrlPolicy::Current,
            robots: default_robots(),
        }
    }
}

impl Default for OpenGraphDefaults {
    fn default() -> Self {
        Self {
            site_name: None,
            og_type: default_og_type(),
            url: UrlPolicy::Current,
            locale: None,
            title: None,
            description: None,
            image: None,
            image_secure_url: None,
            image_type: None,
            image_width: None,
            image_height: None,
            image_alt: None,
        }
    }
}

impl Default for OpenGraphConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            defaults: OpenGraphDefaults::default(),
        }
    }
}

impl Default for TwitterDefaults {
    fn default() -> Self {
        Self {
            card: default_card(),
            site: None,
            creator: None,
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            defaults: TwitterDefaults::default(),
        }
    }
}

impl Default for JsonLdConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            defaults: Vec::new(),
        }
    }
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            app: AppConfig::default(),
            auto_title_from_url: default_enabled(),
            title_inference: None,
            defaults: MetaDefaults::default(),
            opengraph: OpenGraphConfig::default(),
            twitter: TwitterConfig::default(),
            json_ld: JsonLdConfig::default(),
        }
    }
}
