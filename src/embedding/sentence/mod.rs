//! Sentence encoder (BERT + mean pooling).
//!
//! Use [`SentenceEncoderConfig::stub`] for tests/examples without model files.

/// Sentence encoder configuration.
pub mod config;
pub(crate) mod model;


pub use config::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEncoderConfig};

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::device::{device_label, select_device};
use crate::embedding::encoder::Encoder;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{l2_normalize, load_batch_tokenizer};

use model::SentenceBert;

enum EncoderBackend {
    Model {
        model: SentenceBert,
        tokenizer: tokenizers::Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence-transformer encoder (supports stub mode).
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: SentenceEncoderConfig,
    name: String,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => {
                        format!("Model({})", device_label(device))
                    }
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("name", &self.name)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    ///
    /// Failure here is the one place a missing model surfaces; callers
    /// should treat it as fatal.
    pub fn load(mut config: SentenceEncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let name = config.model_name();

        if config.testing_stub {
            warn!("Sentence encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
                name,
            });
        }

        let device = select_device()?;
        debug!(device = device_label(&device), "Selected compute device for sentence encoder");

        let tokenizer = load_batch_tokenizer(&config.model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let model = SentenceBert::load(&config.config_path(), &config.weights_path(), &device)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            })?;

        config.embedding_dim = model.hidden_size();

        info!(
            model = %name,
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            num_layers = model.num_layers(),
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
            name,
        })
    }

    /// Shorthand for `load(SentenceEncoderConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(SentenceEncoderConfig::stub())
    }

    fn encode_with_model(
        &self,
        texts: &[&str],
        model: &SentenceBert,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            batch_size = texts.len(),
            padded_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0),
            "Generating sentence embeddings"
        );

        let stack = |rows: Vec<&[u32]>| -> Result<Tensor, EmbeddingError> {
            let rows = rows
                .into_iter()
                .map(|row| Tensor::new(row, device))
                .collect::<candle_core::Result<Vec<_>>>()?;
            Ok(Tensor::stack(&rows, 0)?)
        };

        let input_ids = stack(encodings.iter().map(|e| e.get_ids()).collect())?;
        let type_ids = stack(encodings.iter().map(|e| e.get_type_ids()).collect())?;
        let attention_mask = stack(encodings.iter().map(|e| e.get_attention_mask()).collect())?;

        let pooled = model
            .forward_pooled(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        let mut vectors = pooled.to_vec2::<f32>()?;
        if self.config.normalize {
            vectors.iter_mut().for_each(|v| l2_normalize(v));
        }

        Ok(vectors)
    }

    /// Bag-of-words stub: each lowercase word contributes a hash-seeded
    /// pseudo-random direction, so texts sharing words land close together.
    fn encode_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        let lower = text.to_lowercase();
        let mut words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            words.push(lower.as_str());
        }

        for word in words {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let mut state = hasher.finish();

            for value in embedding.iter_mut() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                *value += ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            }
        }

        l2_normalize(&mut embedding);
        embedding
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &SentenceEncoderConfig {
        &self.config
    }
}

impl Encoder for SentenceEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(texts, model, tokenizer, device),
            EncoderBackend::Stub => Ok(texts.iter().map(|t| self.encode_stub(t)).collect()),
        }
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dim
    }

    fn name(&self) -> &str {
        &self.name
    }
}
