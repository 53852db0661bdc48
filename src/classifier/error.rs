use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("invalid {name} threshold {value}: {reason}")]
    InvalidThreshold {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The encoder was released (or never attached); a caller bug, not a
    /// low-confidence outcome.
    #[error("classifier is not initialized: {reason}")]
    NotInitialized { reason: &'static str },

    #[error("embedding dimension {actual} does not match registry dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

impl ClassifierError {
    /// Returns `true` for errors caused by invalid caller input.
    pub fn is_validation(&self) -> bool {
        match self {
            ClassifierError::InvalidThreshold { .. } => true,
            ClassifierError::Registry(err) => err.is_validation(),
            _ => false,
        }
    }
}
