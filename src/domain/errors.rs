//! Domain error types
//!
//! This module defines the error hierarchy for piiredact.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main piiredact error type
///
/// Only configuration and I/O problems surface here. A pattern that does not
/// match, or a validator that rejects a candidate, is normal control flow and
/// never produces an error.
#[derive(Debug, Error)]
pub enum RedactError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A pattern expression could not be compiled
    #[error("Invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    /// I/O errors from the streaming entry point or file access
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A worker task failed catastrophically (panicked or was cancelled)
    #[error("Processing error: {0}")]
    Processing(String),
}

impl RedactError {
    /// Build an [`RedactError::InvalidPattern`] from a regex compile failure
    pub fn invalid_pattern(name: impl Into<String>, err: &regex::Error) -> Self {
        RedactError::InvalidPattern {
            name: name.into(),
            message: err.to_string(),
        }
    }

    /// Check if this is a configuration-time error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RedactError::Configuration(_) | RedactError::InvalidPattern { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedactError {
    fn from(err: std::io::Error) -> Self {
        RedactError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RedactError {
    fn from(err: serde_json::Error) -> Self {
        RedactError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedactError {
    fn from(err: toml::de::Error) -> Self {
        RedactError::Configuration(format!("TOML parse error: {err}"))
    }
}

// A join failure means a worker panicked or the runtime shut down under us
impl From<tokio::task::JoinError> for RedactError {
    fn from(err: tokio::task::JoinError) -> Self {
        RedactError::Processing(err.to_string())
    }
}
