//! API Request Handlers

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use std::time::Instant;

use super::cors::CorsPolicy;
use super::docs;
use super::types::*;
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult};

/// Shared application state
///
/// Built once during bootstrap; handlers only ever read it.
pub struct AppState {
    pub config: AppConfig,
    pub cors: CorsPolicy,
    pub start_time: Instant,
    openapi_json: Bytes,
    swagger_page: Bytes,
    redoc_page: Bytes,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let title = &config.metadata.title;
        let openapi_json = serde_json::to_vec(&docs::openapi_document(&config.metadata))?;
        let swagger_page = docs::swagger_ui_html(title, OPENAPI_PATH);
        let redoc_page = docs::redoc_html(title, OPENAPI_PATH);

        Ok(Self {
            cors: CorsPolicy::new(config.cors.clone()),
            config,
            start_time: Instant::now(),
            openapi_json: Bytes::from(openapi_json),
            swagger_page: Bytes::from(swagger_page),
            redoc_page: Bytes::from(redoc_page),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Root
// ============================================

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::running())
}

// ============================================
// Health Check
// ============================================

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Liveness and uptime", body = HealthData)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: state.config.metadata.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ============================================
// Documentation
// ============================================

pub async fn openapi_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], state.openapi_json.clone())
}

pub async fn swagger_ui(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.swagger_page.clone())
}

pub async fn redoc(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.redoc_page.clone())
}

// ============================================
// Fallback
// ============================================

pub async fn not_found() -> AppError {
    AppError::not_found()
}
