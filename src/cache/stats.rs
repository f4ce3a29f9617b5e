//! Cache Statistics Module
//!
//! Introspection snapshot of the cache plus hit, miss and eviction counters.

use serde::Serialize;

// == Counters ==
/// Running counters kept by the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache, as returned by `stats()`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of live (non-expired) keys
    pub key_count: usize,
    /// Sum of serialized value sizes of live keys, in bytes
    pub approx_value_size: usize,
    /// Live keys, sorted
    pub keys: Vec<String>,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups that found nothing or an expired entry
    pub misses: u64,
    /// Number of entries evicted for capacity
    pub evictions: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}
