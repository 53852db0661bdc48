//! The encoder seam consumed by the registry and the classifier.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::error::EmbeddingError;

/// Deterministic text-to-vector mapping.
///
/// Implementations must return one vector per input, in input order, all of
/// length [`dimension`](Encoder::dimension).
pub trait Encoder: Send + Sync {
    /// Encodes a batch of texts.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Output vector length.
    fn dimension(&self) -> usize;

    /// Human-readable identifier used in diagnostics.
    fn name(&self) -> &str {
        "encoder"
    }
}

impl<E: Encoder + ?Sized> Encoder for Arc<E> {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Encodes a single text and checks the encoder honoured the batch contract.
pub fn encode_one(encoder: &dyn Encoder, text: &str) -> Result<Vec<f32>, EmbeddingError> {
    encoder
        .encode(&[text])?
        .into_iter()
        .next()
        .ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no vector".to_string(),
        })
}

/// Call-wrapper around any [`Encoder`] that times every call.
///
/// Calls slower than the configured deadline are logged; with
/// [`enforce_deadline`](InstrumentedEncoder::enforce_deadline) they fail with
/// [`EmbeddingError::DeadlineExceeded`] instead. The wrapped call is never
/// interrupted, the check happens once it returns.
pub struct InstrumentedEncoder<E> {
    inner: E,
    deadline: Option<Duration>,
    enforce: bool,
}

impl<E: Encoder> std::fmt::Debug for InstrumentedEncoder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrumentedEncoder")
            .field("inner", &self.inner.name())
            .field("deadline", &self.deadline)
            .field("enforce", &self.enforce)
            .finish()
    }
}

impl<E: Encoder> InstrumentedEncoder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            deadline: None,
            enforce: false,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Turns deadline overruns into errors.
    pub fn enforce_deadline(mut self, enforce: bool) -> Self {
        self.enforce = enforce;
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Encoder> Encoder for InstrumentedEncoder<E> {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let start = Instant::now();
        let vectors = self.inner.encode(texts)?;
        let elapsed = start.elapsed();

        debug!(
            encoder = self.inner.name(),
            batch_size = texts.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "Encode call finished"
        );

        if let Some(deadline) = self.deadline
            && elapsed > deadline
        {
            if self.enforce {
                return Err(EmbeddingError::DeadlineExceeded {
                    elapsed_ms: elapsed.as_millis(),
                    deadline_ms: deadline.as_millis(),
                });
            }
            warn!(
                encoder = self.inner.name(),
                batch_size = texts.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                deadline_ms = deadline.as_millis() as u64,
                "Encode call exceeded deadline"
            );
        }

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
