//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::sync::Arc;
use tessera_config::DatabaseConfig;
use tessera_core::{HealthCheck, HealthStatus, Interface, TesseraError, TesseraResult};
use tracing::{info, warn};

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns the underlying MySQL pool, or an error if none is configured.
    fn inner(&self) -> TesseraResult<&MySqlPool>;

    /// Returns true if a connection pool is configured.
    fn is_configured(&self) -> bool {
        self.inner().is_ok()
    }

    /// Checks if the database connection is healthy.
    async fn ping(&self) -> TesseraResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> TesseraResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
///
/// A default-built component has no pool; every query against it fails with
/// [`TesseraError::Database`].
#[derive(Component, Default)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    #[shaku(default)]
    pool: Option<MySqlPool>,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> TesseraResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                TesseraError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");
        Ok(Self::with_pool(pool))
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool: Some(pool) }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> TesseraResult<&MySqlPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| TesseraError::Database("Database pool not configured".to_string()))
    }

    async fn ping(&self) -> TesseraResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.inner()?)
            .await
            .map_err(|e| TesseraError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> TesseraResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(self.inner()?)
            .await
            .map_err(|e| TesseraError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            info!("Closing database connection pool...");
            pool.close().await;
            info!("Database connection pool closed");
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.pool {
            Some(pool) => f
                .debug_struct("DatabasePool")
                .field("size", &pool.size())
                .field("num_idle", &pool.num_idle())
                .finish(),
            None => f.debug_struct("DatabasePool").field("configured", &false).finish(),
        }
    }
}

/// Readiness check over a database pool.
pub struct DatabaseHealthCheck {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl DatabaseHealthCheck {
    /// Creates a check that pings `pool`.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for DatabaseHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.pool.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
