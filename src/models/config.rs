//! Startup configuration for the Safe Circle backend
//!
//! Everything here is assembled once before the listener is bound and is
//! never mutated afterwards. Values come from the environment; every key has
//! a default so a bare `cargo run` reproduces the stock behavior.

use axum::http::{HeaderName, HeaderValue, Method};
use tracing::warn;

use super::errors::{AppError, AppResult};

// ============================================
// Environment keys & defaults
// ============================================

pub const ENV_HOST: &str = "SAFE_CIRCLE_HOST";
/// Platform-provided port (Railway, Heroku, ...), checked first
pub const ENV_PLATFORM_PORT: &str = "PORT";
pub const ENV_PORT: &str = "SAFE_CIRCLE_PORT";
pub const ENV_TITLE: &str = "SAFE_CIRCLE_TITLE";
pub const ENV_DESCRIPTION: &str = "SAFE_CIRCLE_DESCRIPTION";
pub const ENV_VERSION: &str = "SAFE_CIRCLE_VERSION";
pub const ENV_CORS_ORIGINS: &str = "SAFE_CIRCLE_CORS_ORIGINS";
pub const ENV_CORS_CREDENTIALS: &str = "SAFE_CIRCLE_CORS_CREDENTIALS";
pub const ENV_CORS_METHODS: &str = "SAFE_CIRCLE_CORS_METHODS";
pub const ENV_CORS_HEADERS: &str = "SAFE_CIRCLE_CORS_HEADERS";
pub const ENV_CORS_MAX_AGE: &str = "SAFE_CIRCLE_CORS_MAX_AGE";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TITLE: &str = "Safe Circle Backend";
pub const DEFAULT_DESCRIPTION: &str = "MongoDB + Encrypted Evidence Vault";
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 600;

// ============================================
// Service metadata
// ============================================

/// Descriptive metadata shown in the API docs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

// ============================================
// Server bind settings
// ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// `0` lets the OS pick a free port
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// ============================================
// CORS policy settings
// ============================================

/// Either a wildcard or an explicit set of accepted values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList<T> {
    Any,
    Only(Vec<T>),
}

impl<T: PartialEq> AllowList<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn allows(&self, item: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Only(items) => items.contains(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: AllowList<HeaderValue>,
    pub allow_credentials: bool,
    pub allowed_methods: AllowList<Method>,
    /// Header names are stored lowercase
    pub allowed_headers: AllowList<HeaderName>,
    pub max_age_secs: u64,
}

impl CorsConfig {
    /// Wildcard origin together with credentials: browsers refuse to honor it
    pub fn is_credentialed_wildcard(&self) -> bool {
        self.allowed_origins.is_any() && self.allow_credentials
    }
}

impl Default for CorsConfig {
    /// Blanket policy: any origin, any method, any header, credentials allowed
    fn default() -> Self {
        Self {
            allowed_origins: AllowList::Any,
            allow_credentials: true,
            allowed_methods: AllowList::Any,
            allowed_headers: AllowList::Any,
            max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
        }
    }
}

// ============================================
// Whole application configuration
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub metadata: ServiceMetadata,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = AppConfig::default();

        let metadata = ServiceMetadata {
            title: get(ENV_TITLE).unwrap_or(defaults.metadata.title),
            description: get(ENV_DESCRIPTION).unwrap_or(defaults.metadata.description),
            version: get(ENV_VERSION).unwrap_or(defaults.metadata.version),
        };

        let port = get(ENV_PLATFORM_PORT)
            .map(|p| (ENV_PLATFORM_PORT, p))
            .or_else(|| get(ENV_PORT).map(|p| (ENV_PORT, p)));
        let port = match port {
            Some((key, raw)) => raw.parse::<u16>().map_err(|_| {
                AppError::invalid_config(format!("{} must be a port number, got {:?}", key, raw))
            })?,
            None => defaults.server.port,
        };

        let server = ServerConfig {
            host: get(ENV_HOST).unwrap_or(defaults.server.host),
            port,
        };

        let cors = CorsConfig {
            allowed_origins: match get(ENV_CORS_ORIGINS) {
                Some(raw) => parse_allow_list(ENV_CORS_ORIGINS, &raw, parse_origin)?,
                None => defaults.cors.allowed_origins,
            },
            allow_credentials: match get(ENV_CORS_CREDENTIALS) {
                Some(raw) => parse_bool(ENV_CORS_CREDENTIALS, &raw)?,
                None => defaults.cors.allow_credentials,
            },
            allowed_methods: match get(ENV_CORS_METHODS) {
                Some(raw) => parse_allow_list(ENV_CORS_METHODS, &raw, parse_method)?,
                None => defaults.cors.allowed_methods,
            },
            allowed_headers: match get(ENV_CORS_HEADERS) {
                Some(raw) => parse_allow_list(ENV_CORS_HEADERS, &raw, parse_header_name)?,
                None => defaults.cors.allowed_headers,
            },
            max_age_secs: match get(ENV_CORS_MAX_AGE) {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    AppError::invalid_config(format!(
                        "{} must be a number of seconds, got {:?}",
                        ENV_CORS_MAX_AGE, raw
                    ))
                })?,
                None => defaults.cors.max_age_secs,
            },
        };

        if cors.is_credentialed_wildcard() {
            warn!(
                "CORS allows any origin together with credentials; browsers will not honor \
                 credentialed requests under a wildcard origin"
            );
        }

        Ok(Self {
            metadata,
            server,
            cors,
        })
    }
}

// ============================================
// Value parsers
// ============================================

fn parse_allow_list<T>(
    key: &str,
    raw: &str,
    parse_item: impl Fn(&str) -> Option<T>,
) -> AppResult<AllowList<T>> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(AppError::invalid_config(format!("{} is empty", key)));
    }
    if items.contains(&"*") {
        return Ok(AllowList::Any);
    }

    items
        .into_iter()
        .map(|item| {
            parse_item(item).ok_or_else(|| {
                AppError::invalid_config(format!("{} contains invalid entry {:?}", key, item))
            })
        })
        .collect::<AppResult<Vec<T>>>()
        .map(AllowList::Only)
}

fn parse_origin(raw: &str) -> Option<HeaderValue> {
    // Browsers send origins without a trailing slash
    HeaderValue::from_str(raw.trim_end_matches('/')).ok()
}

/// Methods accepted in `SAFE_CIRCLE_CORS_METHODS`
const STANDARD_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

fn parse_method(raw: &str) -> Option<Method> {
    let method = Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).ok()?;
    STANDARD_METHODS.contains(&method).then_some(method)
}

fn parse_header_name(raw: &str) -> Option<HeaderName> {
    HeaderName::from_bytes(raw.to_ascii_lowercase().as_bytes()).ok()
}

fn parse_bool(key: &str, raw: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::invalid_config(format!(
            "{} must be true or false, got {:?}",
            key, other
        ))),
    }
}
