//! Safe Circle Backend Library
//!
//! HTTP bootstrap service for the Safe Circle backend:
//! - `GET /` liveness greeting pointing at the API docs
//! - Interactive docs (`/docs`, `/redoc`, `/openapi.json`) and `/health`
//! - Blanket, configurable CORS policy applied to every response

pub mod api;
pub mod logging;
pub mod models;
pub mod server;

pub use api::{create_router, AppState, CorsPolicy, RootResponse};
pub use models::{
    AppConfig, AppError, AppResult, CorsConfig, ErrorCode, ServerConfig, ServiceMetadata,
};
pub use server::{shutdown_signal, Server};

use axum::Router;
use std::sync::Arc;

/// Assemble the full application from an immutable configuration
pub fn build_app(config: AppConfig) -> AppResult<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(create_router(state))
}
