//! Embedding + model utilities.
//!
//! - [`Encoder`] is the seam every other module consumes.
//! - [`sentence`] provides the BERT sentence encoder (and its stub mode).
//! - [`InstrumentedEncoder`] wraps any encoder with timing and a deadline.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Sentence-transformer encoder.
pub mod sentence;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use encoder::{Encoder, InstrumentedEncoder, encode_one};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::StaticEncoder;
pub use sentence::{
    SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEncoder, SentenceEncoderConfig,
};
