//! Redis connection pool shared by the cache and the notification sink.

use deadpool_redis::{Config, Pool, Runtime};
use std::sync::Arc;
use tessera_config::RedisConfig;
use tessera_core::{TesseraError, TesseraResult};
use tracing::info;

/// Create a Redis connection pool and verify it with a `PING`.
pub async fn create_redis_pool(config: &RedisConfig) -> TesseraResult<Arc<Pool>> {
    info!("Creating Redis connection pool...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| TesseraError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(usize::try_from(config.pool_size).unwrap_or(usize::MAX))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| TesseraError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    let mut conn = pool
        .get()
        .await
        .map_err(|e| TesseraError::Cache(format!("Failed to get Redis connection: {}", e)))?;
    deadpool_redis::redis::cmd("PING")
        .query_async::<String>(&mut *conn)
        .await
        .map_err(|e| TesseraError::Cache(format!("Redis PING failed: {}", e)))?;

    info!("Redis connection pool created successfully");
    Ok(Arc::new(pool))
}
