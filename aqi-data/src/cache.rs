//! Time-to-live cache for API payloads.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Default lifetime of a cached value.
pub const DEFAULT_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Key/value store whose entries expire a fixed time after insertion.
///
/// Expired entries are only removed when they are looked up. There is no
/// size bound.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_at(key, value, Utc::now());
    }

    pub fn set_at(&mut self, key: impl Into<String>, value: V, now: DateTime<Utc>) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    /// The value if it is no older than the TTL at `now`. A stale entry is
    /// evicted.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<V> {
        if self.evict_if_stale(key, now) {
            log::debug!("Cache entry {} expired", key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(key, Utc::now())
    }

    pub fn has_at(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        !self.evict_if_stale(key, now) && self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_if_stale(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let stale = self
            .entries
            .get(key)
            .is_some_and(|entry| now - entry.stored_at > self.ttl);
        if stale {
            self.entries.remove(key);
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_then_expiry() {
        let mut cache = TtlCache::default();
        let t0 = Utc::now();
        cache.set_at("realtime:50", vec![1, 2, 3], t0);

        assert_eq!(cache.get_at("realtime:50", t0), Some(vec![1, 2, 3]));
        assert!(cache.has_at("realtime:50", t0));

        // Exactly at the TTL is still fresh.
        let edge = t0 + Duration::minutes(DEFAULT_TTL_MINUTES);
        assert!(cache.has_at("realtime:50", edge));

        let later = edge + Duration::milliseconds(1);
        assert_eq!(cache.get_at("realtime:50", later), None);
        assert!(!cache.has_at("realtime:50", later));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_has_evicts_stale_entries() {
        let mut cache = TtlCache::new(Duration::seconds(1));
        let t0 = Utc::now();
        cache.set_at("a", "x", t0);
        cache.set_at("b", "y", t0 + Duration::seconds(5));
        assert!(!cache.has_at("a", t0 + Duration::seconds(5)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_at("b", t0 + Duration::seconds(5)), Some("y"));
    }

    #[test]
    fn test_missing_and_clear() {
        let mut cache: TtlCache<u32> = TtlCache::default();
        assert_eq!(cache.get("nope"), None);
        cache.set("k", 7);
        assert_eq!(cache.get("k"), Some(7));
        cache.clear();
        assert!(!cache.has("k"));
    }
}
