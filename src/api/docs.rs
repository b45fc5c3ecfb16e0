//! Interactive API documentation
//!
//! The OpenAPI document is generated from the handler annotations, then
//! stamped with the configured service metadata. `/docs` and `/redoc` are
//! thin HTML shells that load their explorers from a CDN and point them at
//! `/openapi.json`.

use utoipa::OpenApi;

use super::handlers;
use super::types::{ErrorBody, HealthData, RootResponse};
use crate::models::config::ServiceMetadata;

const SWAGGER_UI_JS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js";
const SWAGGER_UI_CSS: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css";
const REDOC_JS: &str = "https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js";

#[derive(OpenApi)]
#[openapi(
    paths(handlers::root, handlers::health_check),
    components(schemas(RootResponse, HealthData, ErrorBody)),
    tags((name = "system", description = "Service liveness"))
)]
pub struct ApiDoc;

/// OpenAPI document carrying the configured title, description and version
pub fn openapi_document(metadata: &ServiceMetadata) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = metadata.title.clone();
    doc.info.description = Some(metadata.description.clone());
    doc.info.version = metadata.version.clone();
    doc
}

/// Title and URL come from startup config and are inserted verbatim
pub fn swagger_ui_html(title: &str, openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="{css}">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="{js}"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{openapi_url}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    showExtensions: true,
    showCommonExtensions: true,
    presets: [
        SwaggerUIBundle.presets.apis,
        SwaggerUIBundle.SwaggerUIStandalonePreset
    ],
}})
</script>
</body>
</html>
"#,
        css = SWAGGER_UI_CSS,
        js = SWAGGER_UI_JS,
    )
}

pub fn redoc_html(title: &str, openapi_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
  body {{ margin: 0; padding: 0; }}
</style>
</head>
<body>
<redoc spec-url="{openapi_url}"></redoc>
<script src="{js}"></script>
</body>
</html>
"#,
        js = REDOC_JS,
    )
}
