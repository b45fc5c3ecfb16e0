//! Integration tests for the Safe Circle HTTP surface

use axum::{
    body::{self, Body},
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::Response,
    Router,
};
use safe_circle_backend::{build_app, models::config::AllowList, AppConfig, CorsConfig};
use tower::util::ServiceExt;

const ROOT_BODY: &str = r#"{"message":"Safe Circle backend is running!","docs":"/docs"}"#;

fn app() -> Router {
    build_app(AppConfig::default()).expect("default config builds")
}

async fn send(router: Router, req: Request<Body>) -> Response {
    router.oneshot(req).await.unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn assert_blanket_cors(resp: &Response) {
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
}

// ============================================
// GET /
// ============================================

#[tokio::test]
async fn test_root_returns_exact_greeting() {
    let resp = send(app(), get("/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    assert_blanket_cors(&resp);
    assert_eq!(body_string(resp).await, ROOT_BODY);
}

#[tokio::test]
async fn test_root_is_stable_across_calls() {
    let router = app();
    for _ in 0..3 {
        let resp = send(router.clone(), get("/")).await;
        assert_eq!(body_string(resp).await, ROOT_BODY);
    }
}

#[tokio::test]
async fn test_root_ignores_origin_and_credentials() {
    let router = app();
    let variants = [
        ("https://safe-circle.example", Some("session=abc")),
        ("http://localhost:5173", None),
        ("null", Some("token=1")),
    ];

    for (origin, cookie) in variants {
        let mut builder = Request::builder()
            .uri("/")
            .header(header::ORIGIN, origin)
            .header("x-custom-header", "anything");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let resp = send(router.clone(), builder.body(Body::empty()).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::OK, "origin {}", origin);
        assert_blanket_cors(&resp);
        assert_eq!(body_string(resp).await, ROOT_BODY);
    }
}

#[tokio::test]
async fn test_head_root_is_ok() {
    let req = Request::builder()
        .method(Method::HEAD)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_blanket_cors(&resp);
}

// ============================================
// Undefined routes & methods
// ============================================

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let resp = send(app(), get("/nonexistent")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_blanket_cors(&resp);
    assert_eq!(body_string(resp).await, r#"{"detail":"Not Found"}"#);
}

#[tokio::test]
async fn test_wrong_method_keeps_cors_headers() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_blanket_cors(&resp);
}

// ============================================
// CORS preflight
// ============================================

#[tokio::test]
async fn test_preflight_is_answered_with_wildcard() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://app.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, x-anything")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_blanket_cors(&resp);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_MAX_AGE], "600");
    assert_eq!(body_string(resp).await, "OK");
}

#[tokio::test]
async fn test_options_with_origin_only_still_carries_cors() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://app.example")
        .body(Body::empty())
        .unwrap();
    let resp = send(app(), req).await;

    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_allow_list_policy_end_to_end() {
    let config = AppConfig {
        cors: CorsConfig {
            allowed_origins: AllowList::Only(vec![HeaderValue::from_static(
                "http://localhost:5173",
            )]),
            ..CorsConfig::default()
        },
        ..AppConfig::default()
    };
    let router = build_app(config).unwrap();

    let listed = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let resp = send(router.clone(), listed).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert!(resp
        .headers()
        .get_all(header::VARY)
        .iter()
        .any(|v| v == "origin"));

    let unlisted = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "http://evil.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let resp = send(router, unlisted).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert_eq!(body_string(resp).await, "Disallowed CORS origin");
}

// ============================================
// Docs & health
// ============================================

#[tokio::test]
async fn test_openapi_document_reflects_metadata() {
    let resp = send(app(), get("/openapi.json")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

    let doc: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(doc["info"]["title"], "Safe Circle Backend");
    assert_eq!(doc["info"]["description"], "MongoDB + Encrypted Evidence Vault");
    assert_eq!(doc["info"]["version"], "1.0");
    assert!(doc["paths"]["/"].is_object());
}

#[tokio::test]
async fn test_docs_pages_are_html() {
    let router = app();

    let resp = send(router.clone(), get("/docs")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_blanket_cors(&resp);
    assert!(body_string(resp).await.contains("Safe Circle Backend - Swagger UI"));

    let resp = send(router, get("/redoc")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("spec-url=\"/openapi.json\""));
}

#[tokio::test]
async fn test_health_reports_version() {
    let resp = send(app(), get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let health: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], "1.0");
    assert!(health["uptime_seconds"].is_u64());
    assert!(health["timestamp"].is_string());
}

// ============================================
// Request ids
// ============================================

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() {
    let router = app();

    let resp = send(router.clone(), get("/")).await;
    let generated = resp.headers()["x-request-id"].to_str().unwrap().to_string();
    assert_eq!(generated.len(), 36);

    let req = Request::builder()
        .uri("/")
        .header("x-request-id", "trace-123")
        .body(Body::empty())
        .unwrap();
    let resp = send(router.clone(), req).await;
    assert_eq!(resp.headers()["x-request-id"], "trace-123");
}

#[tokio::test]
async fn test_request_id_on_preflight_and_not_found() {
    let router = app();

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://app.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header("x-request-id", "preflight-1")
        .body(Body::empty())
        .unwrap();
    let resp = send(router.clone(), preflight).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-request-id"], "preflight-1");

    let resp = send(router, get("/nonexistent")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers()["x-request-id"].len(), 36);
}
