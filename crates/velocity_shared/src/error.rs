//! # Configuration Error Types
//!
//! All errors that can occur while loading or validating configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Genre id that no preset exists for.
    #[error("unknown genre: {0}")]
    UnknownGenre(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
