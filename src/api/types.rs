//! API Request/Response Types

use serde::Serialize;
use utoipa::ToSchema;

/// Path of the interactive API explorer
pub const DOCS_PATH: &str = "/docs";
/// Path of the alternative ReDoc explorer
pub const REDOC_PATH: &str = "/redoc";
/// Path of the machine-readable OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

pub const ROOT_MESSAGE: &str = "Safe Circle backend is running!";

// ============================================
// Root
// ============================================

/// Liveness greeting returned by `GET /`
///
/// Field order is part of the wire contract: `message` first, then `docs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Safe Circle backend is running!")]
    pub message: String,
    #[schema(example = "/docs")]
    pub docs: String,
}

impl RootResponse {
    pub fn running() -> Self {
        Self {
            message: ROOT_MESSAGE.to_string(),
            docs: DOCS_PATH.to_string(),
        }
    }
}

// ============================================
// Health
// ============================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// RFC 3339 UTC
    pub timestamp: String,
}

// ============================================
// Errors
// ============================================

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Not Found")]
    pub detail: String,
}
