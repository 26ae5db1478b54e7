//! # Tessera Server
//!
//! Main entry point: configuration, telemetry, dependency wiring, HTTP
//! server with graceful shutdown.

use tessera_config::ConfigLoader;
use tessera_core::telemetry::init_telemetry;
use tessera_core::{TesseraError, TesseraResult};
use tessera_rest::{create_router, AppState};
use tessera_server::di::{build_module, shutdown};
use tessera_server::startup::{install_metrics_exporter, print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("tessera-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> TesseraResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_telemetry(&config.observability.telemetry(&config.app.name))?;
    print_banner();
    info!("Starting Tessera Server v{}", config.app.version);

    if config.observability.metrics_enabled {
        install_metrics_exporter(&config)?;
    }

    let module = build_module(&config).await?;

    let state = AppState::new(module.user_service()).with_health_checks(module.health_checks());
    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TesseraError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TesseraError::Internal(format!("REST server error: {}", e)))?;

    shutdown(&*module).await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
