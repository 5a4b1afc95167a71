//! Flat set of SEO fields an entity can hand to the facade.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// SEO fields for one page.
///
/// Missing string fields are `""` and missing optional fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub twitter_image: Option<String>,
    pub structured_data: Option<Value>,
}

impl SeoData {
    /// Build from a JSON object; unknown keys are ignored.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// True when no field carries anything worth applying.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && blank(&self.canonical)
            && blank(&self.robots)
            && self.og_title.is_empty()
            && self.og_description.is_empty()
            && self.og_image.is_empty()
            && blank(&self.twitter_image)
            && !has_structured_data(self.structured_data.as_ref())
    }

    /// `og_title`, or `title` when that is empty.
    pub fn effective_og_title(&self) -> &str {
        non_empty_or(&self.og_title, &self.title)
    }

    /// `og_description`, or `description` when that is empty.
    pub fn effective_og_description(&self) -> &str {
        non_empty_or(&self.og_description, &self.description)
    }

    /// `twitter_image`, or `og_image` when that is absent or empty.
    pub fn effective_twitter_image(&self) -> &str {
        non_empty_or(self.twitter_image.as_deref().unwrap_or_default(), &self.og_image)
    }
}

/// `null`, `{}` and `[]` carry no structured data.
pub(crate) fn has_structured_data(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
