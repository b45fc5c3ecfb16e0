//! Tracing/logging initialization.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when `RUST_LOG` is unset or unparseable
pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
