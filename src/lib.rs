//! Intent sieve library crate (used by the CLI binary and integration tests).
//!
//! Classifies a short utterance into one of a small, open set of named intents
//! by cosine similarity against per-category centroids, and abstains with
//! [`ABSTAIN_LABEL`] when the best match is weak or ambiguous.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`IntentClassifier`], [`Classification`], [`ClassificationDetails`] - Decision engine
//! - [`Thresholds`], [`decide`] - Margin/floor abstention policy
//! - [`CategoryRegistry`], [`Category`] - Category centroids
//! - [`rank`], [`RankedScore`], [`cosine_similarity`] - Similarity ranking
//!
//! ## Embedding
//! - [`Encoder`] - Text to vector seam consumed by the core
//! - [`SentenceEncoder`], [`SentenceEncoderConfig`] - BERT sentence encoder (with stub mode)
//! - [`InstrumentedEncoder`] - Timing/deadline wrapper around any encoder
//!
//! ## Evaluation
//! - [`evaluate`], [`evaluate_batched`], [`EvaluationReport`] - Offline scoring harness
//!
//! ## Data
//! - [`Corpus`] - Ordered label to phrases mapping for seeds and datasets
//!
//! ## Test/Mock Support
//! [`StaticEncoder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod evaluation;
pub mod ranking;
pub mod registry;

pub use classifier::{
    Classification, ClassificationDetails, ClassifierError, IntentClassifier, Thresholds, decide,
};
pub use config::{Config, ConfigError};
pub use constants::{
    ABSTAIN_LABEL, DEFAULT_ABSOLUTE_THRESHOLD, DEFAULT_MARGIN_THRESHOLD, DimValidationError,
    validate_embedding_dim,
};
pub use corpus::{Corpus, CorpusError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::StaticEncoder;
pub use embedding::{
    EmbeddingError, Encoder, InstrumentedEncoder, SentenceEncoder, SentenceEncoderConfig,
};
pub use evaluation::{
    CategoryStats, ConfusionCounts, EvaluationError, EvaluationRecord, EvaluationReport,
    LatencyMode, evaluate, evaluate_batched,
};
pub use ranking::{RankedScore, cosine_similarity, rank};
pub use registry::{Category, CategoryRegistry, RegistryError};
