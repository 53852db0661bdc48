//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::classifier::ClassifierError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment value could not be parsed as the expected number.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Environment value is not a recognised boolean.
    #[error("invalid value '{value}' for {name}: expected true/false")]
    InvalidBool { name: &'static str, value: String },

    /// A setting requires another variable that was not set.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// Threshold pair rejected by the decision policy.
    #[error("invalid thresholds: {source}")]
    InvalidThreshold {
        #[source]
        source: ClassifierError,
    },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
