use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load embedding model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A lookup encoder was asked for text it has no vector for.
    #[error("no embedding registered for text: {text:?}")]
    UnknownText { text: String },

    #[error("encode call took {elapsed_ms} ms, deadline is {deadline_ms} ms")]
    DeadlineExceeded { elapsed_ms: u128, deadline_ms: u128 },
}

impl EmbeddingError {
    /// Returns `true` for errors raised while constructing an encoder.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EmbeddingError::ModelNotFound { .. }
                | EmbeddingError::ModelLoadFailed { .. }
                | EmbeddingError::DeviceUnavailable { .. }
        )
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
