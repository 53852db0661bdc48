//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! Every centroid in a registry shares the encoder's output dimension. The
//! compile-time default matches the MiniLM family of sentence encoders; real
//! dimensions come from [`Encoder::dimension`](crate::embedding::Encoder::dimension)
//! and are checked with [`validate_embedding_dim`] at module boundaries.

use thiserror::Error;

/// Label returned when no category passes the decision policy.
pub const ABSTAIN_LABEL: &str = "other";

pub const DEFAULT_MARGIN_THRESHOLD: f32 = 0.1;

/// Minimum acceptable top similarity.
pub const DEFAULT_ABSOLUTE_THRESHOLD: f32 = 0.2;

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_MAX_SEQ_LEN: usize = 128;

pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L12-v2";

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use intent_sieve::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
