//! API Route Configuration

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{cors_middleware, logging_middleware};
use super::types::{DOCS_PATH, OPENAPI_PATH, REDOC_PATH};

pub const HEALTH_PATH: &str = "/health";

/// Create the router: the full route table plus middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(HEALTH_PATH, get(handlers::health_check))
        // Documentation
        .route(DOCS_PATH, get(handlers::swagger_ui))
        .route(REDOC_PATH, get(handlers::redoc))
        .route(OPENAPI_PATH, get(handlers::openapi_json))
        .fallback(handlers::not_found)
        .with_state(state.clone())
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(state, cors_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
