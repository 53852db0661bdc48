use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("category '{name}' needs at least one example phrase")]
    EmptyExamples { name: String },

    #[error("category name cannot be empty")]
    EmptyName,

    #[error("category '{name}': {source}")]
    Dimension {
        name: String,
        #[source]
        source: DimValidationError,
    },

    #[error("encoder returned {actual} vectors for {expected} examples")]
    EmbeddingCount { expected: usize, actual: usize },

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

impl RegistryError {
    /// Returns `true` for caller input problems (as opposed to encoder failures).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RegistryError::EmptyExamples { .. }
                | RegistryError::EmptyName
                | RegistryError::Dimension { .. }
        )
    }
}
