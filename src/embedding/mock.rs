//! Lookup-table encoder for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::encoder::Encoder;
use super::error::EmbeddingError;

/// Encoder returning fixed vectors for known texts.
///
/// Unknown texts fail with [`EmbeddingError::UnknownText`]. Every `encode`
/// call is counted so tests can assert whether the encoder was reached.
#[derive(Debug, Default)]
pub struct StaticEncoder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
    calls: AtomicUsize,
}

impl StaticEncoder {
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    /// Builds an encoder from `(text, vector)` pairs; dimension is taken from the first.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Vec<f32>)>,
    {
        let mut encoder = Self::new(0);
        for (text, vector) in pairs {
            if encoder.dimension == 0 {
                encoder.dimension = vector.len();
            }
            encoder.vectors.insert(text.to_string(), vector);
        }
        encoder
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Number of `encode` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Encoder for StaticEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(*text)
                    .cloned()
                    .ok_or_else(|| EmbeddingError::UnknownText {
                        text: text.to_string(),
                    })
            })
            .collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "static"
    }
}
