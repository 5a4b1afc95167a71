//! Per-entity SEO overrides: record types, backends and the read-through cache.

pub mod cache;
pub mod sqlite;

pub use cache::CachedOverrides;
pub use sqlite::SqliteStore;

use crate::data::SeoData;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the entity an override belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub entity_type: String,
    pub entity_id: String,
}

impl EntityKey {
    pub fn new(entity_type: impl Into<String>, entity_id: impl ToString) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.to_string(),
        }
    }

    /// `seokit.<type>.<id>` with namespace separators turned into dots.
    pub fn cache_key(&self) -> String {
        let entity_type = self.entity_type.replace("::", ".").replace('\\', ".");
        format!("seokit.{}.{}", entity_type, self.entity_id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity_type, self.entity_id)
    }
}

/// A stored override row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoRecord {
    pub key: EntityKey,
    #[serde(flatten)]
    pub data: SeoData,
    pub is_cornerstone: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeoRecord {
    /// A fresh record stamped with the current time.
    pub fn new(key: EntityKey, data: SeoData) -> Self {
        let now = Utc::now();
        Self {
            key,
            data,
            is_cornerstone: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn cornerstone(mut self, is_cornerstone: bool) -> Self {
        self.is_cornerstone = is_cornerstone;
        self
    }

    pub fn to_seo_data(&self) -> SeoData {
        self.data.clone()
    }
}

/// Source of stored overrides. A missing row is `Ok(None)`.
pub trait OverrideBackend {
    fn fetch(&self, key: &EntityKey) -> Result<Option<SeoRecord>>;
}

/// Backends that can also drop a row when its entity goes away.
pub trait DeletableBackend: OverrideBackend {
    /// Returns whether a row was removed.
    fn delete(&self, key: &EntityKey) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        let key = EntityKey::new(r"App\Models\Post", 123);
        assert_eq!(key.cache_key(), "seokit.App.Models.Post.123");

        let key = EntityKey::new("blog::Post", "intro");
        assert_eq!(key.cache_key(), "seokit.blog.Post.intro");
    }

    #[test]
    fn test_record_defaults() {
        let record = SeoRecord::new(EntityKey::new("page", 1), SeoData::default());
        assert!(!record.is_cornerstone);
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.cornerstone(true).is_cornerstone);
    }
}
