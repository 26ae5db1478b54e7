//! Readiness check over a cache.

use super::CacheInterface;
use async_trait::async_trait;
use std::sync::Arc;
use tessera_core::{HealthCheck, HealthStatus};

/// Reports `Degraded` for a disabled cache and pings an enabled one.
pub struct CacheHealthCheck {
    cache: Arc<dyn CacheInterface>,
}

impl CacheHealthCheck {
    /// Creates a check over `cache`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl HealthCheck for CacheHealthCheck {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.cache.is_enabled() {
            return HealthStatus::Degraded("cache is disabled".to_string());
        }

        match self.cache.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
