//! Application state for Axum handlers.

use std::sync::Arc;
use tessera_core::HealthCheck;
use tessera_service::UserService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state without readiness checks.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
            health_checks: Arc::new(Vec::new()),
        }
    }

    /// Sets the dependencies checked by the readiness endpoint.
    #[must_use]
    pub fn with_health_checks(mut self, health_checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::new(health_checks);
        self
    }
}
