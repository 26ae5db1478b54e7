//! Cache interface trait for abstracted caching operations.

use super::cache_keys;
use async_trait::async_trait;
use std::time::Duration;
use tessera_core::{Interface, TesseraResult};

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> TesseraResult<Option<String>>;

    /// Set a raw JSON value in the cache.
    ///
    /// A `ttl` of `None` stores the entry until it is deleted.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> TesseraResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> TesseraResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> TesseraResult<bool>;

    /// Delete every key matching a `prefix*` glob pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> TesseraResult<u64>;

    /// Check that the backing store answers.
    async fn ping(&self) -> TesseraResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> TesseraResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> TesseraResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Evict every entry of a cache group.
    async fn evict_all(&self, group: &str) -> TesseraResult<u64> {
        self.delete_pattern(&cache_keys::group_pattern(group)).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
