//! Error types for the scoped environment provider and its variable stores.

use crate::types::EnvironmentTarget;
use thiserror::Error;

/// Failure raised by a variable store while enumerating a partition.
///
/// The provider treats these as opaque and only wraps them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Variable store unavailable for target '{target}': {reason}")]
    Unavailable {
        target: EnvironmentTarget,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse variable snapshot: {0}")]
    Parse(String),
}

/// Errors surfaced by the provider itself.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArgument {
        parameter: &'static str,
        message: String,
    },

    #[error("Failed to read environment variables from target '{target}'")]
    LoadFailure {
        target: EnvironmentTarget,
        #[source]
        source: StoreError,
    },
}

impl From<ProviderError> for config::ConfigError {
    fn from(err: ProviderError) -> Self {
        config::ConfigError::Foreign(Box::new(err))
    }
}

/// Errors raised while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid logging configuration: {0}")]
    Config(String),

    #[error("Failed to open log file {}: {source}", path.display())]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
