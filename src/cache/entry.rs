//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Length of the serialized value in bytes
    pub size: usize,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A TTL of `0` means the entry never expires.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `size` - Serialized size of the value
    /// * `ttl_seconds` - TTL in seconds
    pub fn new(value: Value, size: usize, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        let expires_at = (ttl_seconds > 0).then(|| now + ttl_seconds * 1000);

        Self {
            value,
            size,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_zero_ttl_never_expires() {
        let entry = CacheEntry::new(json!("value"), 7, 0);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(!entry.is_expired_at(u64::MAX));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new(json!({"a": 1}), 7, 60);

        assert_eq!(entry.value["a"], 1);
        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!(1), 1, 1);

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(1100));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiry_is_ttl_after_creation() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new(json!(1), 1, 10);

        let expires = entry.expires_at.unwrap();
        assert!(expires >= before + 10_000);
        assert!(expires <= current_timestamp_ms() + 10_000);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: json!("test"),
            size: 6,
            expires_at: Some(now),
        };

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(!entry.is_expired_at(now - 1));
    }
}
