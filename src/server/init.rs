//! Server initialization and main run loop

use super::loader::load_config;
use crate::api::{api_router, ApiState};
use anyhow::{Context, Result};
use axum::Router;
use orgdir_core::{DirectoryStore, FacadeRegistry, StorageBackend};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting orgdir v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!(backend = %config.storage.backend, "Configuration loaded");

    let backend = StorageBackend::from_config(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;
    let connection: Arc<dyn DirectoryStore> = Arc::new(backend);
    let registry = Arc::new(FacadeRegistry::with_connection(connection));

    let app = build_router(ApiState::new(registry));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("orgdir shutdown complete");
    Ok(())
}

/// Assemble the full application router.
pub fn build_router(state: ApiState) -> Router {
    api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
