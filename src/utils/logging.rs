//! Tracing subscriber setup

use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `RUST_LOG`
pub const LOG_LEVEL_ENV: &str = "HOOKS_LOG_LEVEL";

/// Build the filter from an explicit level, `HOOKS_LOG_LEVEL`, `RUST_LOG`,
/// or `info`, in that order
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    let directives = level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| "info".to_string());

    EnvFilter::try_new(&directives)
        .map_err(|e| GatewayError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Install the global subscriber, plain text or JSON lines
pub fn init_logging(level: Option<&str>, json: bool) -> Result<()> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GatewayError::Config(format!("Failed to initialize logging: {}", e)))
}
