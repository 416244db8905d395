use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Minimal string key/value cache with prefix deletion.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Fetch a value. `Ok(None)` is the only "miss".
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Delete every key under `prefix`, i.e. every key starting with `"{prefix}:"`.
    ///
    /// Returns the number of keys removed.
    async fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError>;
}
