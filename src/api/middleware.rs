//! API Middleware (CORS, Logging)

use axum::{
    extract::{Request, State},
    http::{header::VARY, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, Instrument};

use super::cors::{CorsPolicy, PreflightOutcome};
use super::handlers::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// CORS middleware
///
/// Preflights are answered here and never reach the router. Every other
/// response gets the policy's headers appended on the way out.
pub async fn cors_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if CorsPolicy::is_preflight(request.method(), request.headers()) {
        return match state.cors.preflight(request.headers()) {
            PreflightOutcome::Allowed(headers) => (StatusCode::OK, headers, "OK").into_response(),
            PreflightOutcome::Rejected(what) => {
                debug!(uri = %request.uri(), refused = what, "CORS preflight rejected");
                (StatusCode::BAD_REQUEST, format!("Disallowed CORS {}", what)).into_response()
            }
        };
    }

    let cors_headers = state.cors.response_headers(request.headers());
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for (name, value) in cors_headers.iter() {
        // Other layers (compression) may have set Vary already
        if name == VARY {
            headers.append(name.clone(), value.clone());
        } else {
            headers.insert(name.clone(), value.clone());
        }
    }

    response
}

/// Request logging middleware
///
/// Runs inside `SetRequestIdLayer`, so every request already carries an
/// `x-request-id` (client-supplied or generated) by the time it gets here.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let span = tracing::info_span!("request", request_id = %request_id);
    let response = next.run(request).instrument(span.clone()).await;

    let latency = start.elapsed();
    let status = response.status();

    span.in_scope(|| {
        info!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "Request completed"
        );
    });

    response
}
