//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tessera_core::HealthStatus;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Result of a single dependency check.
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` unless a dependency is unhealthy.
    pub status: String,
    pub checks: Vec<DependencyStatus>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
///
/// Probes every registered dependency; degraded dependencies still count
/// as ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let statuses = join_all(state.health_checks.iter().map(|check| async move {
        let status = check.check().await;
        (check.name().to_string(), status)
    }))
    .await;

    let ready = statuses.iter().all(|(_, status)| !status.is_unhealthy());

    let checks = statuses
        .into_iter()
        .map(|(name, status)| {
            let (status, message) = match status {
                HealthStatus::Healthy => ("healthy", None),
                HealthStatus::Degraded(message) => ("degraded", Some(message)),
                HealthStatus::Unhealthy(message) => ("unhealthy", Some(message)),
            };
            DependencyStatus {
                name,
                status: status.to_string(),
                message,
            }
        })
        .collect();

    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            checks,
        }),
    )
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
