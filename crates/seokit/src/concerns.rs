//! Capabilities an application entity can implement to feed the facade.
//!
//! An entity either keeps an editable override row ([`HasStoredOverride`])
//! or derives its fields on the fly ([`HasComputedSeo`]).

use crate::data::SeoData;
use crate::error::Result;
use crate::manager::SeoKit;
use crate::store::{CachedOverrides, EntityKey, OverrideBackend};
use tracing::debug;

/// Entities whose SEO fields live in the override store.
pub trait HasStoredOverride {
    fn seo_key(&self) -> EntityKey;

    /// Apply the stored override, if any. Returns whether one was found.
    fn apply_stored_seo<B: OverrideBackend>(
        &self,
        overrides: &CachedOverrides<B>,
        seo: &mut SeoKit,
    ) -> Result<bool> {
        match overrides.get(&self.seo_key())? {
            Some(record) => {
                seo.apply_seo_data(&record.data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_cornerstone<B: OverrideBackend>(&self, overrides: &CachedOverrides<B>) -> Result<bool> {
        overrides.is_cornerstone(&self.seo_key())
    }
}

/// Entities that compute their SEO fields from their own data.
pub trait HasComputedSeo {
    fn to_seo_data(&self) -> SeoData;

    /// Apply the computed fields unless all of them are empty.
    fn apply_computed_seo(&self, seo: &mut SeoKit) -> bool {
        let data = self.to_seo_data();
        if data.is_empty() {
            debug!("computed seo data is empty, skipping");
            return false;
        }
        seo.apply_seo_data(&data);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeoConfig;
    use crate::store::{SeoRecord, SqliteStore};

    struct Post {
        id: u32,
        title: String,
    }

    impl HasStoredOverride for Post {
        fn seo_key(&self) -> EntityKey {
            EntityKey::new(r"App\Models\Post", self.id)
        }
    }

    impl HasComputedSeo for Post {
        fn to_seo_data(&self) -> SeoData {
            SeoData {
                title: self.title.clone(),
                ..SeoData::default()
            }
        }
    }

    fn seo() -> SeoKit {
        SeoKit::new(&SeoConfig::default(), None)
    }

    #[test]
    fn test_computed_seo_applies() {
        let post = Post {
            id: 1,
            title: "Computed".into(),
        };
        let mut seo = seo();
        assert!(post.apply_computed_seo(&mut seo));
        assert_eq!(seo.meta().title(), "Computed");
    }

    #[test]
    fn test_computed_seo_skips_empty() {
        let post = Post {
            id: 1,
            title: String::new(),
        };
        let mut seo = seo();
        seo.title("Untouched");
        assert!(!post.apply_computed_seo(&mut seo));
        assert_eq!(seo.meta().title(), "Untouched");
    }

    #[test]
    fn test_stored_override() {
        let overrides = CachedOverrides::new(SqliteStore::in_memory("seokit").unwrap());
        let post = Post {
            id: 9,
            title: String::new(),
        };

        let mut seo = seo();
        assert!(!post.apply_stored_seo(&overrides, &mut seo).unwrap());

        let record = SeoRecord::new(
            post.seo_key(),
            SeoData {
                title: "Stored".into(),
                ..SeoData::default()
            },
        );
        overrides.backend().save(&record).unwrap();
        assert!(post.apply_stored_seo(&overrides, &mut seo).unwrap());
        assert_eq!(seo.meta().title(), "Stored");
        assert!(!post.is_cornerstone(&overrides).unwrap());
    }
}
