//! Capacity- and age-bounded associative store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// A cached value with its bookkeeping timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry<V> {
    value: V,
    /// When the value was last set, drives max-age expiry
    updated_at: DateTime<Utc>,
    /// When the value was last read or set, drives LRU eviction
    touched_at: DateTime<Utc>,
}

/// Associative store bounded by entry count and entry age
///
/// Inserting at capacity evicts the least recently touched entry. Reads of
/// entries whose age exceeds `max_age_secs` expire them on the spot and
/// report a miss. Not internally synchronized: the owning layer serializes
/// access and may persist the whole store as an opaque serialized blob.
#[derive(Debug, Serialize, Deserialize)]
pub struct LruTtlCache<K, V>
where
    K: Eq + Hash,
{
    entries: HashMap<K, CachedEntry<V>>,
    capacity: usize,
    max_age_secs: i64,
    last_updated: Option<DateTime<Utc>>,
}

impl<K, V> LruTtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty cache holding at most `capacity` entries, each valid
    /// for at most `max_age_secs` seconds after its last set
    pub fn new(capacity: usize, max_age_secs: i64) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity: capacity.max(1),
            max_age_secs,
            last_updated: None,
        }
    }

    /// Set a value, evicting the least recently touched entry if the cache
    /// is at capacity
    pub fn insert(&mut self, key: K, value: V) {
        let now = Utc::now();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            CachedEntry {
                value,
                updated_at: now,
                touched_at: now,
            },
        );
        self.last_updated = Some(now);
    }

    /// Get a value, refreshing its LRU position; expired entries are removed
    /// and reported as misses
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = Utc::now();
        let expired = match self.entries.get(key) {
            Some(entry) => self.is_expired(entry, now),
            None => return None,
        };

        if expired {
            debug!(max_age_secs = self.max_age_secs, "cache entry expired");
            self.entries.remove(key);
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touched_at = now;
        Some(&entry.value)
    }

    /// Whether a live (non-expired) entry exists for `key`, without touching
    /// its LRU position
    pub fn contains_key(&self, key: &K) -> bool {
        let now = Utc::now();
        self.entries
            .get(key)
            .map(|entry| !self.is_expired(entry, now))
            .unwrap_or(false)
    }

    /// When the entry for `key` was last set, if it is live
    pub fn entry_updated_at(&self, key: &K) -> Option<DateTime<Utc>> {
        let now = Utc::now();
        self.entries
            .get(key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.updated_at)
    }

    /// When any entry was last set
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        let max_age_secs = self.max_age_secs;
        self.entries
            .retain(|_, entry| (now - entry.updated_at).num_seconds() <= max_age_secs);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_expired(&self, entry: &CachedEntry<V>, now: DateTime<Utc>) -> bool {
        (now - entry.updated_at).num_seconds() > self.max_age_secs
    }

    fn evict_lru(&mut self) {
        let stalest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.touched_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = stalest {
            self.entries.remove(&key);
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    /// Shift an entry's timestamps into the past, as if it had been set
    /// `secs` seconds ago
    #[cfg(test)]
    fn backdate(&mut self, key: &K, secs: i64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.updated_at -= chrono::Duration::seconds(secs);
            entry.touched_at -= chrono::Duration::seconds(secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 3600);
        assert!(cache.is_empty());

        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(&1));
        assert_eq!(cache.get(&"b".to_string()), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 3600);
        cache.insert("a".to_string(), 1);
        cache.insert("a".to_string(), 2);

        assert_eq!(cache.get(&"a".to_string()), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_least_recently_touched() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(2, 3600);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        // Make "a" more recently used than "b" by aging "b" back
        cache.backdate(&"b".to_string(), 10);
        cache.get(&"a".to_string());

        cache.insert("c".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&"a".to_string()));
        assert!(!cache.contains_key(&"b".to_string()));
        assert!(cache.contains_key(&"c".to_string()));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 60);
        cache.insert("a".to_string(), 1);
        cache.backdate(&"a".to_string(), 61);

        assert!(!cache.contains_key(&"a".to_string()));
        assert_eq!(cache.get(&"a".to_string()), None);
        // Expired entry is removed by the failed read
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_within_max_age_is_live() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 60);
        cache.insert("a".to_string(), 1);
        cache.backdate(&"a".to_string(), 59);

        assert_eq!(cache.get(&"a".to_string()), Some(&1));
    }

    #[test]
    fn test_purge_expired() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 60);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("c".to_string(), 3);
        cache.backdate(&"a".to_string(), 120);
        cache.backdate(&"b".to_string(), 120);

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key(&"c".to_string()));
    }

    #[test]
    fn test_last_updated_markers() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 3600);
        assert!(cache.last_updated().is_none());

        cache.insert("a".to_string(), 1);
        let global = cache.last_updated().unwrap();
        let per_entry = cache.entry_updated_at(&"a".to_string()).unwrap();
        assert_eq!(global, per_entry);

        // Reads do not count as updates
        cache.get(&"a".to_string());
        assert_eq!(cache.last_updated().unwrap(), global);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cache: LruTtlCache<String, u32> = LruTtlCache::new(4, 3600);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        let blob = serde_json::to_vec(&cache).unwrap();
        let mut restored: LruTtlCache<String, u32> = serde_json::from_slice(&blob).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.capacity(), 4);
        assert_eq!(restored.get(&"a".to_string()), Some(&1));
        assert_eq!(restored.get(&"b".to_string()), Some(&2));
        assert_eq!(restored.last_updated(), cache.last_updated());
    }
}
