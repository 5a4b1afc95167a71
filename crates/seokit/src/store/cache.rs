//! Read-through cache in front of an override backend.

use super::{DeletableBackend, EntityKey, OverrideBackend, SeoRecord};
use crate::error::Result;
use dashmap::DashMap;
use tracing::debug;

/// Process-wide override cache keyed by [`EntityKey::cache_key`].
///
/// Only hits are cached, so a row saved after a miss is visible on the next
/// lookup without an explicit invalidation. Each key carries a generation
/// bumped on invalidation; a fetch that overlapped one is not cached.
pub struct CachedOverrides<B> {
    backend: B,
    entries: DashMap<String, Slot>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    record: Option<SeoRecord>,
}

impl<B: OverrideBackend> CachedOverrides<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: DashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The override for `key`, from cache or the backend.
    pub fn get(&self, key: &EntityKey) -> Result<Option<SeoRecord>> {
        let cache_key = key.cache_key();
        let seen = match self.entries.get(&cache_key) {
            Some(slot) => {
                if let Some(hit) = &slot.record {
                    debug!("override cache hit for {cache_key}");
                    return Ok(Some(hit.clone()));
                }
                slot.generation
            }
            None => 0,
        };

        debug!("override cache miss for {cache_key}");
        let record = self.backend.fetch(key)?;
        if let Some(record) = &record {
            if !self.fill(cache_key, seen, record) {
                debug!("override for {key} changed during fetch, not cached");
            }
        }
        Ok(record)
    }

    /// Cache `record` unless the key was invalidated since generation `seen`.
    fn fill(&self, cache_key: String, seen: u64, record: &SeoRecord) -> bool {
        let mut slot = self.entries.entry(cache_key).or_default();
        if slot.generation != seen {
            return false;
        }
        slot.record = Some(record.clone());
        true
    }

    pub fn invalidate(&self, key: &EntityKey) {
        let mut slot = self.entries.entry(key.cache_key()).or_default();
        slot.generation += 1;
        if slot.record.take().is_some() {
            debug!("invalidated override for {key}");
        }
    }

    /// Call after the override row for `key` was written.
    pub fn entity_saved(&self, key: &EntityKey) {
        self.invalidate(key);
    }

    /// Whether `key` is flagged as cornerstone content. Missing rows are not.
    pub fn is_cornerstone(&self, key: &EntityKey) -> Result<bool> {
        Ok(self.get(key)?.is_some_and(|r| r.is_cornerstone))
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|slot| slot.record.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B: DeletableBackend> CachedOverrides<B> {
    /// Call when the owning entity is deleted: drops the row and the cache entry.
    pub fn entity_deleted(&self, key: &EntityKey) -> Result<bool> {
        let removed = self.backend.delete(key)?;
        self.invalidate(key);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeoData;
    use crate::store::SqliteStore;
    use std::cell::Cell;

    struct CountingBackend {
        record: Option<SeoRecord>,
        calls: Cell<usize>,
    }

    impl OverrideBackend for CountingBackend {
        fn fetch(&self, _key: &EntityKey) -> Result<Option<SeoRecord>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.record.clone())
        }
    }

    fn key() -> EntityKey {
        EntityKey::new(r"App\Models\Post", 1)
    }

    fn generation<B>(cache: &CachedOverrides<B>, cache_key: &str) -> u64 {
        cache.entries.get(cache_key).map_or(0, |slot| slot.generation)
    }

    #[test]
    fn test_hits_are_cached() {
        let cache = CachedOverrides::new(CountingBackend {
            record: Some(SeoRecord::new(key(), SeoData::default())),
            calls: Cell::new(0),
        });

        assert!(cache.get(&key()).unwrap().is_some());
        assert!(cache.get(&key()).unwrap().is_some());
        assert_eq!(cache.backend().calls.get(), 1);

        cache.invalidate(&key());
        cache.get(&key()).unwrap();
        assert_eq!(cache.backend().calls.get(), 2);
    }

    #[test]
    fn test_misses_are_not_cached() {
        let cache = CachedOverrides::new(CountingBackend {
            record: None,
            calls: Cell::new(0),
        });

        assert!(cache.get(&key()).unwrap().is_none());
        assert!(cache.get(&key()).unwrap().is_none());
        assert_eq!(cache.backend().calls.get(), 2);
        assert!(cache.is_empty());
        assert!(!cache.is_cornerstone(&key()).unwrap());
    }

    #[test]
    fn test_fetch_overlapping_invalidation_is_not_cached() {
        let stale = SeoRecord::new(key(), SeoData::default());
        let cache = CachedOverrides::new(CountingBackend {
            record: Some(stale.clone()),
            calls: Cell::new(0),
        });
        let cache_key = key().cache_key();

        // A lookup read the generation, then a save landed before it filled.
        let seen = generation(&cache, &cache_key);
        cache.entity_saved(&key());
        assert!(!cache.fill(cache_key.clone(), seen, &stale));
        assert!(cache.is_empty());

        assert!(cache.get(&key()).unwrap().is_some());
        assert_eq!(cache.len(), 1);
        assert_eq!(generation(&cache, &cache_key), 1);
    }

    #[test]
    fn test_save_then_delete_flow() {
        let cache = CachedOverrides::new(SqliteStore::in_memory("seokit").unwrap());
        assert!(cache.get(&key()).unwrap().is_none());

        let record = SeoRecord::new(
            key(),
            SeoData {
                title: "Stored".into(),
                ..SeoData::default()
            },
        )
        .cornerstone(true);
        cache.backend().save(&record).unwrap();
        assert_eq!(cache.get(&key()).unwrap().unwrap().data.title, "Stored");
        assert!(cache.is_cornerstone(&key()).unwrap());

        let mut edited = record.clone();
        edited.data.title = "Edited".into();
        cache.backend().save(&edited).unwrap();
        assert_eq!(cache.get(&key()).unwrap().unwrap().data.title, "Stored");
        cache.entity_saved(&key());
        assert_eq!(cache.get(&key()).unwrap().unwrap().data.title, "Edited");

        assert!(cache.entity_deleted(&key()).unwrap());
        assert!(cache.get(&key()).unwrap().is_none());
        assert!(cache.is_empty());
    }
}
