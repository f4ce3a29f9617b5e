//! Shared Cache Handle
//!
//! Process-wide, clonable access to one `CacheStore` behind an async lock.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

/// Clonable handle; every clone sees the same entries.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Underlying lock, for the background sweep.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.inner.clone()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> Result<()> {
        self.inner.write().await.set(key, value, ttl)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn delete_many<S: AsRef<str>>(&self, keys: &[S]) -> usize {
        self.inner.write().await.delete_many(keys)
    }

    pub async fn flush(&self) {
        self.inner.write().await.flush();
    }

    pub async fn keys(&self) -> Vec<String> {
        self.inner.read().await.keys()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Returns the cached value for `key`, or runs `fetcher` and caches its result.
    ///
    /// The lock is not held while `fetcher` runs. A failing fetcher caches
    /// nothing and its error is returned unchanged. A cached value that no
    /// longer deserializes as `T` is treated as a miss.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Option<u64>,
        fetcher: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(cached) = self.get(key).await {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(err) => warn!(key, error = %err, "discarding undecodable cache entry"),
            }
        }

        let value = fetcher().await?;

        match serde_json::to_value(&value) {
            Ok(json) => {
                if let Err(err) = self.set(key, json, ttl).await {
                    warn!(key, error = %err, "fetched value not cached");
                }
            }
            Err(err) => warn!(key, error = %err, "fetched value not serializable"),
        }

        Ok(value)
    }
}
