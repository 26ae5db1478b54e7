//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tessera_core::{TesseraError, TesseraResult};
use tracing::debug;

/// Number of keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis-based cache service.
///
/// A default-built component has no pool and behaves as [`disabled`](Self::disabled).
#[derive(Clone, Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool; `None` when caching is disabled.
    #[shaku(default)]
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    ///
    /// Every lookup misses and every write is dropped.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> TesseraResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                TesseraError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(TesseraError::Cache("Cache is disabled".to_string())),
        }
    }

    /// Collect every key matching `pattern` with a cursor-based `SCAN`.
    async fn scan_keys(
        conn: &mut deadpool_redis::Connection,
        pattern: &str,
    ) -> TesseraResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut **conn)
                .await
                .map_err(|e| {
                    TesseraError::Cache(format!("Failed to scan keys '{}': {}", pattern, e))
                })?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn ping(&self) -> TesseraResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| TesseraError::Cache(format!("Redis PING failed: {}", e)))?;
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> TesseraResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            TesseraError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> TesseraResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                    .await
                    .map_err(|e| {
                        TesseraError::Cache(format!("Failed to set key '{}': {}", key, e))
                    })?;
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            }
            None => {
                conn.set::<_, _, ()>(key, value).await.map_err(|e| {
                    TesseraError::Cache(format!("Failed to set key '{}': {}", key, e))
                })?;
                debug!("Cached key '{}' without expiry", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> TesseraResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            TesseraError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> TesseraResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let exists: bool = conn.exists(key).await.map_err(|e| {
            TesseraError::Cache(format!("Failed to check key '{}': {}", key, e))
        })?;

        Ok(exists)
    }

    async fn delete_pattern(&self, pattern: &str) -> TesseraResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let keys = Self::scan_keys(&mut conn, pattern).await?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn.del(&keys).await.map_err(|e| {
            TesseraError::Cache(format!("Failed to delete keys: {}", e))
        })?;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
