//! Twitter Card tags (`<meta name="twitter:…">`).

use crate::config::SeoConfig;
use crate::property_map::{PropertyMap, PropertyValue};
use crate::support::{join_lines, meta_name_tag};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported card layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TwitterCardType {
    #[default]
    Summary,
    SummaryLargeImage,
    App,
    Player,
}

impl TwitterCardType {
    pub const ALL: [Self; 4] = [
        Self::Summary,
        Self::SummaryLargeImage,
        Self::App,
        Self::Player,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::SummaryLargeImage => "summary_large_image",
            Self::App => "app",
            Self::Player => "player",
        }
    }
}

impl FromStr for TwitterCardType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}

impl fmt::Display for TwitterCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for Twitter Card properties. Keys are stored without the
/// `twitter:` prefix.
#[derive(Debug, Clone, Default)]
pub struct TwitterCards {
    properties: PropertyMap,
}

impl TwitterCards {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build with the configured card, site and creator.
    pub fn new(config: &SeoConfig) -> Self {
        let mut cards = Self::default();
        let defaults = &config.twitter.defaults;

        if let Some(card) = defaults.card.as_deref().filter(|c| !c.is_empty()) {
            cards.card(card);
        }
        if let Some(site) = defaults.site.as_deref().filter(|s| !s.is_empty()) {
            cards.site(site);
        }
        if let Some(creator) = defaults.creator.as_deref().filter(|c| !c.is_empty()) {
            cards.creator(creator);
        }
        cards
    }

    pub fn add(&mut self, property: &str, value: impl ToString) -> &mut Self {
        self.properties.insert(property, value.to_string());
        self
    }

    pub fn remove(&mut self, property: &str) -> &mut Self {
        self.properties.remove(property);
        self
    }

    pub fn has(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.properties.get(property)
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.add("title", title)
    }

    /// Set the card type; unknown names become `summary`.
    pub fn card(&mut self, card: &str) -> &mut Self {
        let card: TwitterCardType = card.parse().unwrap_or_else(|_| {
            debug!("unknown twitter:card {card:?}, using summary");
            TwitterCardType::Summary
        });
        self.card_type(card)
    }

    pub fn card_type(&mut self, card: TwitterCardType) -> &mut Self {
        self.add("card", card.as_str())
    }

    pub fn site(&mut self, username: &str) -> &mut Self {
        self.add("site", username)
    }

    pub fn creator(&mut self, username: &str) -> &mut Self {
        self.add("creator", username)
    }

    pub fn description(&mut self, description: &str) -> &mut Self {
        self.add("description", description)
    }

    pub fn image(&mut self, url: &str, alt: Option<&str>) -> &mut Self {
        self.add("image", url);
        if let Some(alt) = alt.filter(|a| !a.is_empty()) {
            self.add("image:alt", alt);
        }
        self
    }

    pub fn player(&mut self, url: &str, width: u32, height: u32) -> &mut Self {
        self.add("player", url)
            .add("player:width", width)
            .add("player:height", height)
    }

    pub fn to_map(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn render(&self, minify: bool) -> String {
        let lines = self
            .properties
            .flatten()
            .map(|(property, value)| meta_name_tag(&format!("twitter:{property}"), value));
        join_lines(lines, minify)
    }
}

impl fmt::Display for TwitterCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
