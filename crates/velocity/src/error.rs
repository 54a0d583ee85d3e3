//! Error types for the frame driver crate.

use thiserror::Error;
use velocity_shared::ConfigError;

/// Failures outside the tick loop: startup, configuration, arguments.
///
/// Faults inside a tick are not errors at this level; they are reported
/// through [`crate::TickOutcome::Faulted`].
#[derive(Error, Debug)]
pub enum DriverError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The global log subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// Bad command line.
    #[error("invalid argument: {0}")]
    Usage(String),
}

/// Result alias for driver setup.
pub type DriverResult<T> = Result<T, DriverError>;
