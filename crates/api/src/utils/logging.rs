use std::time::Duration;

use keystone_domain::{CrmError, LoggingConfig, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`.
///
/// # Errors
/// Returns `CrmError::Config` for an unparsable level and
/// `CrmError::Internal` if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            CrmError::Config(format!("Invalid log level '{}': {e}", config.level))
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };

    installed.map_err(|e| CrmError::Internal(format!("Failed to install tracing subscriber: {e}")))
}

/// Log the outcome of one HTTP request with structured fields.
///
/// Callers must pass the route path only; query strings may carry search
/// terms.
#[inline]
pub fn log_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if status < 400 {
        info!(method, path, status, duration_ms, "request_success");
    } else {
        warn!(method, path, status, duration_ms, "request_failure");
    }
}

/// Convert a `CrmError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &CrmError) -> &'static str {
    match error {
        CrmError::Database(_) => "database",
        CrmError::Config(_) => "config",
        CrmError::Network(_) => "network",
        CrmError::NotFound(_) => "not_found",
        CrmError::InvalidInput(_) => "invalid_input",
        CrmError::Validation(_) => "validation",
        CrmError::Internal(_) => "internal",
    }
}
