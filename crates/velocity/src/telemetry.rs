//! Logging bootstrap for the driver binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{DriverError, DriverResult};

/// Builds the log filter. `RUST_LOG` wins over the configured level; an
/// unparsable level falls back to `info`.
#[must_use]
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str) -> DriverResult<()> {
    tracing_subscriber::registry()
        .with(log_filter(level))
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| DriverError::Logging(e.to_string()))?;

    tracing::info!(target: "telemetry", level, "logging initialized");
    Ok(())
}
