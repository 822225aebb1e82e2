//! Configuration errors.

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set (or is empty).
    #[error("{0} is not set. Add it to the environment or the .env file.")]
    Missing(String),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Result type for configuration lookups.
pub type Result<T> = std::result::Result<T, ConfigError>;
