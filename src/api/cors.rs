//! CORS policy evaluation
//!
//! Pure header arithmetic: given the request headers, decide which CORS
//! headers a response carries and whether a preflight is accepted. The
//! middleware in [`super::middleware`] applies the result.
//!
//! `tower_http::cors::CorsLayer` refuses a wildcard origin combined with
//! credentials, which is exactly the stock policy of this service, so the
//! policy is evaluated here instead.

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
        ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, VARY,
    },
    HeaderMap, HeaderName, HeaderValue, Method,
};

use crate::models::config::{AllowList, CorsConfig};

/// Request headers browsers may always send without listing them
const SAFELISTED_HEADERS: [&str; 4] = [
    "accept",
    "accept-language",
    "content-language",
    "content-type",
];

const WILDCARD: HeaderValue = HeaderValue::from_static("*");
const TRUE: HeaderValue = HeaderValue::from_static("true");

/// Result of evaluating a preflight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightOutcome {
    /// Answer 200 with these headers
    Allowed(HeaderMap),
    /// Answer 400; the value names what was refused
    Rejected(&'static str),
}

/// Immutable, precomputed CORS policy
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    config: CorsConfig,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    max_age: HeaderValue,
}

impl CorsPolicy {
    pub fn new(config: CorsConfig) -> Self {
        let allow_methods = match &config.allowed_methods {
            AllowList::Any => WILDCARD,
            AllowList::Only(methods) => join_header_value(methods.iter().map(Method::as_str)),
        };
        let allow_headers = match &config.allowed_headers {
            AllowList::Any => WILDCARD,
            AllowList::Only(names) => join_header_value(names.iter().map(HeaderName::as_str)),
        };
        let max_age = HeaderValue::from(config.max_age_secs);

        Self {
            config,
            allow_methods,
            allow_headers,
            max_age,
        }
    }

    /// `OPTIONS` carrying both `Origin` and `Access-Control-Request-Method`
    pub fn is_preflight(method: &Method, headers: &HeaderMap) -> bool {
        method == Method::OPTIONS
            && headers.contains_key(ORIGIN)
            && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    }

    /// Headers to add to a regular (non-preflight) response.
    ///
    /// Under a wildcard origin every response gets the full header set, with
    /// or without an `Origin` on the request. Under an allow-list only listed
    /// origins get headers.
    pub fn response_headers(&self, request_headers: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(origin) = self.allow_origin_value(request_headers) {
            self.insert_common(&mut headers, origin);
        }
        if !self.config.allowed_origins.is_any() {
            headers.insert(VARY, HeaderValue::from_name(ORIGIN));
        }

        headers
    }

    /// Evaluate a preflight request
    pub fn preflight(&self, request_headers: &HeaderMap) -> PreflightOutcome {
        let Some(origin) = self.allow_origin_value(request_headers) else {
            return PreflightOutcome::Rejected("origin");
        };

        if !self.method_allowed(request_headers) {
            return PreflightOutcome::Rejected("method");
        }
        if !self.headers_allowed(request_headers) {
            return PreflightOutcome::Rejected("headers");
        }

        let mut headers = HeaderMap::new();
        self.insert_common(&mut headers, origin);
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
        if !self.config.allowed_origins.is_any() {
            headers.insert(VARY, HeaderValue::from_name(ORIGIN));
        }

        PreflightOutcome::Allowed(headers)
    }

    fn insert_common(&self, headers: &mut HeaderMap, origin: HeaderValue) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        if self.config.allow_credentials {
            headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, TRUE);
        }
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }

    fn allow_origin_value(&self, request_headers: &HeaderMap) -> Option<HeaderValue> {
        match &self.config.allowed_origins {
            AllowList::Any => Some(WILDCARD),
            AllowList::Only(origins) => request_headers
                .get(ORIGIN)
                .filter(|origin| origins.contains(origin))
                .cloned(),
        }
    }

    fn method_allowed(&self, request_headers: &HeaderMap) -> bool {
        if self.config.allowed_methods.is_any() {
            return true;
        }

        request_headers
            .get(ACCESS_CONTROL_REQUEST_METHOD)
            .and_then(|v| Method::from_bytes(v.as_bytes()).ok())
            .is_some_and(|method| self.config.allowed_methods.allows(&method))
    }

    fn headers_allowed(&self, request_headers: &HeaderMap) -> bool {
        let AllowList::Only(names) = &self.config.allowed_headers else {
            return true;
        };
        let Some(requested) = request_headers.get(ACCESS_CONTROL_REQUEST_HEADERS) else {
            return true;
        };
        let Ok(requested) = requested.to_str() else {
            return false;
        };

        requested
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .all(|name| {
                SAFELISTED_HEADERS.contains(&name.as_str())
                    || names.iter().any(|allowed| allowed.as_str() == name)
            })
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new(CorsConfig::default())
    }
}

fn join_header_value<'a>(items: impl Iterator<Item = &'a str>) -> HeaderValue {
    let joined = items.collect::<Vec<_>>().join(", ");
    // Items were validated as methods / header names when the config was parsed
    HeaderValue::from_str(&joined).unwrap_or(WILDCARD)
}
