//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with recency tracking and TTL expiration.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{
    CacheCounters, CacheEntry, CacheStats, RecencyTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE,
};
use crate::error::{CatalogError, Result};

// == Cache Store ==
/// Bounded key/value storage with per-entry expiry and LRU eviction.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    recency: RecencyTracker,
    counters: CacheCounters,
    max_entries: usize,
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            counters: CacheCounters::default(),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value, replacing any existing entry and its expiry.
    ///
    /// If the cache is at capacity, the least recently used entry is evicted.
    /// `ttl` of None uses the default TTL; `Some(0)` never expires.
    pub fn set(&mut self, key: &str, value: Value, ttl: Option<u64>) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CatalogError::invalid(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let size = serde_json::to_vec(&value)?.len();
        if size > MAX_VALUE_SIZE {
            return Err(CatalogError::invalid(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            // Expired entries go first so live ones are not evicted needlessly
            if self.cleanup_expired() == 0 {
                if let Some(evicted) = self.recency.evict_oldest() {
                    self.entries.remove(&evicted);
                    self.counters.record_eviction();
                }
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, size, ttl));
        self.recency.touch(key);
        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// Expired entries are removed on read and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            None => {
                self.counters.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        self.recency.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    /// Removes several entries, returning how many were present.
    pub fn delete_many<S: AsRef<str>>(&mut self, keys: &[S]) -> usize {
        keys.iter()
            .filter(|key| self.remove_entry(key.as_ref()))
            .count()
    }

    /// Removes every entry.
    pub fn flush(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    // == Introspection ==
    /// Returns the live keys, sorted. Does not remove expired entries.
    pub fn keys(&self) -> Vec<String> {
        let now = current_timestamp_ms();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Returns a statistics snapshot. Does not remove expired entries.
    pub fn stats(&self) -> CacheStats {
        let now = current_timestamp_ms();
        let approx_value_size = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.size)
            .sum();
        let keys = self.keys();

        CacheStats {
            key_count: keys.len(),
            approx_value_size,
            keys,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            hit_rate: self.counters.hit_rate(),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }
        expired_keys.len()
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.recency.remove(key);
        self.entries.remove(key).is_some()
    }
}
