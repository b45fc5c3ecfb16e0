//! Safe Circle Backend Server
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   PORT / SAFE_CIRCLE_PORT   - Server port (default: 8000)
//!   SAFE_CIRCLE_HOST          - Server host (default: 0.0.0.0)
//!   SAFE_CIRCLE_CORS_ORIGINS  - `*` or comma-separated origins (default: *)
//!   RUST_LOG                  - Log level (default: info)

use safe_circle_backend::api::{DOCS_PATH, OPENAPI_PATH, REDOC_PATH};
use safe_circle_backend::{create_router, logging, shutdown_signal, AppConfig, AppState, Server};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    logging::init();

    let config = AppConfig::from_env()?;
    info!(
        title = %config.metadata.title,
        version = %config.metadata.version,
        "Bootstrapping service"
    );

    let state = Arc::new(AppState::new(config)?);
    let server = Server::bind(&state.config.server).await?;
    let addr = server.local_addr();

    info!("Safe Circle backend starting on http://{}", addr);
    info!("API Documentation: http://{}{}", addr, DOCS_PATH);
    info!("Endpoints:");
    info!("  GET  /              - Service greeting");
    info!("  GET  /health        - Health check");
    info!("  GET  {:<14}- Swagger UI", DOCS_PATH);
    info!("  GET  {:<14}- ReDoc", REDOC_PATH);
    info!("  GET  {:<14}- OpenAPI document", OPENAPI_PATH);
    info!("Press Ctrl+C for graceful shutdown");

    let app = create_router(state.clone());
    server.serve(app, shutdown_signal()).await?;

    info!(
        uptime_seconds = state.uptime_seconds(),
        "Safe Circle backend shutdown complete"
    );

    Ok(())
}
