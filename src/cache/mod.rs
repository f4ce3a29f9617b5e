//! Cache Module
//!
//! In-memory key/value cache with TTL expiration and LRU eviction, used to
//! memoize expensive remote calls.

mod entry;
mod recency;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use recency::RecencyTracker;
pub use shared::SharedCache;
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// TTL applied when none is given, in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;
