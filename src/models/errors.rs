//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be grepped in logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Configuration errors
//! - SRV_xxx: Server lifecycle errors
//! - API_xxx: API errors

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::types::ErrorBody;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Server Errors
    // ============================================
    /// Could not bind the listening socket
    ServerBindFailed,
    /// Accept loop / socket IO failure
    ServerIo,

    // ============================================
    // API Errors
    // ============================================
    /// Resource not found
    ApiNotFound,
    /// Internal server error
    ApiInternalError,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::ServerBindFailed => "SRV_BIND_FAILED",
            Self::ServerIo => "SRV_IO",

            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ConfigInvalidValue => 400,
            Self::ApiNotFound => 404,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Socket bind failed
    pub fn bind_failed(addr: &str, err: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::ServerBindFailed,
            format!("Failed to bind {}", addr),
            err,
        )
    }

    /// Route not found, rendered as `{"detail": "Not Found"}`
    pub fn not_found() -> Self {
        Self::new(ErrorCode::ApiNotFound, "Not Found")
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::ServerIo, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiInternalError, "JSON serialization error", err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = self.code_str(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.code_str(), error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                detail: self.message,
            }),
        )
            .into_response()
    }
}
