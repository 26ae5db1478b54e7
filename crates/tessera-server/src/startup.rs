//! Server startup utilities.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tessera_config::AppConfig;
use tessera_core::{TesseraError, TesseraResult};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
  ______
 /_  __/__  ______________  _________ _
  / / / _ \/ ___/ ___/ _ \/ ___/ __ `/
 / / /  __(__  |__  )  __/ /  / /_/ /
/_/  \___/____/____/\___/_/   \__,_/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    http://{}/api/v1/users", addr);
    info!("Health:      http://{}/health", addr);
    if config.observability.metrics_enabled {
        info!(
            "Metrics:     http://0.0.0.0:{}/metrics",
            config.observability.metrics_port
        );
    }
    info!(
        "Store:       {}",
        if config.database.enabled { "mysql" } else { "in-memory" }
    );
    info!(
        "Cache:       {}",
        if config.redis.enabled { "redis" } else { "in-memory" }
    );
    info!("{}", separator);
}

/// Installs the Prometheus exporter and registers metric descriptions.
pub fn install_metrics_exporter(config: &AppConfig) -> TesseraResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| TesseraError::Internal(format!("Failed to install metrics exporter: {}", e)))?;

    tessera_service::metrics::register_metrics();
    info!("Prometheus exporter listening on {}", addr);
    Ok(())
}
