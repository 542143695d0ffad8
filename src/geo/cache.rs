//! In-memory lookup cache.

use std::collections::HashMap;

use super::types::{CacheKey, GeoRecord};

/// Process-lifetime map from request identity to a successful lookup.
///
/// Entries are never evicted and never expire. Only successes are stored.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: HashMap<CacheKey, GeoRecord>,
}

impl GeoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&GeoRecord> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores a record. An existing entry for the key is kept as is, so a key
    /// always maps to the first record fetched for it.
    pub fn insert(&mut self, key: CacheKey, record: GeoRecord) {
        self.entries.entry(key).or_insert(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Target;

    fn record(ip: &str) -> GeoRecord {
        GeoRecord::parse(&format!(r#"{{"ip": "{}"}}"#, ip)).unwrap()
    }

    #[test]
    fn test_cache_starts_empty() {
        let cache = GeoCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = GeoCache::new();
        let key = CacheKey::new(&Target::Address("8.8.8.8".into()), "t");
        cache.insert(key.clone(), record("8.8.8.8"));

        assert!(cache.contains(&key));
        assert_eq!(cache.get(&key).unwrap().ip(), "8.8.8.8");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keeps_first_record() {
        let mut cache = GeoCache::new();
        let key = CacheKey::new(&Target::Own, "t");
        cache.insert(key.clone(), record("1.1.1.1"));
        cache.insert(key.clone(), record("2.2.2.2"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap().ip(), "1.1.1.1");
    }

    #[test]
    fn test_cache_keys_do_not_collide() {
        let mut cache = GeoCache::new();
        let own = CacheKey::new(&Target::Own, "t");
        let literal = CacheKey::new(&Target::Address("1.1.1.1".into()), "t");
        cache.insert(own.clone(), record("1.1.1.1"));

        assert!(cache.contains(&own));
        assert!(!cache.contains(&literal));
    }
}
