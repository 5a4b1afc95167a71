//! JSON-LD structured data emitted as `<script type="application/ld+json">`.

use crate::config::SeoConfig;
use crate::error::{Result, SeoError};
use crate::request::PageRequest;
use crate::support::{escape_script_json, join_lines};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Values the schema helpers fall back to.
#[derive(Debug, Clone, Default)]
struct SchemaDefaults {
    app_name: String,
    app_url: Option<String>,
    page_url: Option<String>,
}

/// Ordered list of structured-data documents.
///
/// Positions are stable: [`JsonLd::remove`] leaves a hole instead of shifting
/// later entries, so an index handed out earlier keeps pointing at the same
/// document.
#[derive(Debug, Clone, Default)]
pub struct JsonLd {
    schemas: Vec<Option<Value>>,
    defaults: SchemaDefaults,
}

impl JsonLd {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build with the configured default schemas.
    pub fn new(config: &SeoConfig, request: Option<&PageRequest>) -> Self {
        let mut ld = Self {
            schemas: Vec::new(),
            defaults: SchemaDefaults {
                app_name: config.app.name.clone(),
                app_url: config.app.url.clone(),
                page_url: request.map(PageRequest::current_url),
            },
        };
        for schema in &config.json_ld.defaults {
            ld.push(schema.clone());
        }
        ld
    }

    /// Encode any serializable value and append it.
    pub fn add<T: Serialize + ?Sized>(&mut self, schema: &T) -> Result<&mut Self> {
        let value = serde_json::to_value(schema)?;
        Ok(self.push(value))
    }

    /// Append an already-built JSON value.
    pub fn push(&mut self, schema: Value) -> &mut Self {
        self.schemas.push(Some(schema));
        self
    }

    /// Remove the document at `index`. Missing or already removed positions are ignored.
    pub fn remove(&mut self, index: usize) -> &mut Self {
        if let Some(slot) = self.schemas.get_mut(index) {
            *slot = None;
        }
        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.schemas.get(index).and_then(Option::as_ref)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.schemas.clear();
        self
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.schemas.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live documents in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.schemas.iter().flatten().cloned().collect()
    }

    pub fn website(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = json!({
            "@context": "https://schema.org",
            "@type": "WebSite",
            "url": self.defaults.page_url,
            "name": self.defaults.app_name,
        });
        self.merged(defaults, data)
    }

    pub fn organization(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": self.defaults.app_name,
            "url": self.defaults.app_url,
        });
        self.merged(defaults, data)
    }

    pub fn person(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = json!({
            "@context": "https://schema.org",
            "@type": "Person",
            "name": self.defaults.app_name,
        });
        self.merged(defaults, data)
    }

    pub fn article(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = self.article_defaults("Article");
        self.merged(defaults, data)
    }

    pub fn blog_posting(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = self.article_defaults("BlogPosting");
        self.merged(defaults, data)
    }

    pub fn product(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = json!({
            "@context": "https://schema.org",
            "@type": "Product",
            "name": "",
            "description": "",
            "offers": {
                "@type": "Offer",
                "price": "",
                "priceCurrency": "USD",
            },
        });
        self.merged(defaults, data)
    }

    pub fn local_business(&mut self, data: Value) -> Result<&mut Self> {
        let defaults = json!({
            "@context": "https://schema.org",
            "@type": "LocalBusiness",
            "name": self.defaults.app_name,
            "description": "",
            "address": "",
            "telephone": "",
            "openingHours": "",
        });
        self.merged(defaults, data)
    }

    /// A `BreadcrumbList` from `(name, url)` pairs, positions starting at 1.
    pub fn breadcrumb_list<'a, I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let elements: Vec<Value> = items
            .into_iter()
            .enumerate()
            .map(|(i, (name, url))| {
                json!({
                    "@type": "ListItem",
                    "position": i + 1,
                    "name": name,
                    "item": url,
                })
            })
            .collect();
        self.push(json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": elements,
        }))
    }

    /// Render each document as its own script tag.
    ///
    /// Non-ASCII text is written literally and `/` is never escaped. `<`, `>`
    /// and `&` become `\u` escapes so a value cannot close the script element.
    pub fn render(&self, minify: bool) -> Result<String> {
        let mut lines = Vec::with_capacity(self.schemas.len());
        for schema in self.schemas.iter().flatten() {
            let encoded = escape_script_json(&serde_json::to_string(schema)?);
            lines.push(format!(
                r#"<script type="application/ld+json">{encoded}</script>"#
            ));
        }
        Ok(join_lines(lines, minify))
    }

    fn article_defaults(&self, kind: &str) -> Value {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        json!({
            "@context": "https://schema.org",
            "@type": kind,
            "headline": "",
            "description": "",
            "author": {
                "@type": "Person",
                "name": self.defaults.app_name,
            },
            "datePublished": now,
            "dateModified": now,
        })
    }

    fn merged(&mut self, defaults: Value, data: Value) -> Result<&mut Self> {
        let mut schema = match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        match data {
            Value::Null => {}
            Value::Object(fields) => {
                for (key, value) in fields {
                    schema.insert(key, value);
                }
            }
            other => return Err(SeoError::InvalidSchema(json_kind(&other))),
        }
        Ok(self.push(Value::Object(schema)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
