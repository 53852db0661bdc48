//! Decision engine: ranks an utterance against the registry and applies the
//! margin/floor abstention policy.
//!
//! [`IntentClassifier`] owns the encoder handle, the [`CategoryRegistry`] and
//! the [`Thresholds`]. It is `Send + Sync`: classification takes read locks
//! only, registry mutation takes the write lock, so concurrent `classify`
//! calls never observe a half-updated category.
//!
//! # Errors vs. abstention
//!
//! Blank input and "no confident match" are results
//! ([`Classification::abstain`]); a released encoder is
//! [`ClassifierError::NotInitialized`] and is never folded into an abstain.

mod config;
mod error;
pub mod policy;
mod types;


pub use config::Thresholds;
pub use error::ClassifierError;
pub use policy::{decide, margin};
pub use types::{Classification, ClassificationDetails};

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::embedding::{Encoder, encode_one};
use crate::ranking::{RankedScore, rank};
use crate::registry::{Category, CategoryRegistry};

pub struct IntentClassifier {
    encoder: RwLock<Option<Arc<dyn Encoder>>>,
    registry: RwLock<CategoryRegistry>,
    thresholds: RwLock<Thresholds>,
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field(
                "encoder",
                &self.encoder.read().as_ref().map(|e| e.name().to_string()),
            )
            .field("categories", &self.registry.read().categories())
            .field("thresholds", &*self.thresholds.read())
            .finish()
    }
}

impl IntentClassifier {
    /// Wraps an already-built registry.
    pub fn new(
        encoder: Arc<dyn Encoder>,
        registry: CategoryRegistry,
        thresholds: Thresholds,
    ) -> Result<Self, ClassifierError> {
        thresholds.validate()?;

        if let Some(expected) = registry.dimension()
            && expected != encoder.dimension()
        {
            return Err(ClassifierError::DimensionMismatch {
                expected,
                actual: encoder.dimension(),
            });
        }

        info!(
            encoder = encoder.name(),
            categories = registry.len(),
            margin_threshold = thresholds.margin,
            absolute_threshold = thresholds.absolute,
            "Intent classifier ready"
        );

        Ok(Self {
            encoder: RwLock::new(Some(encoder)),
            registry: RwLock::new(registry),
            thresholds: RwLock::new(thresholds),
        })
    }

    /// Builds the registry from seed data, then wraps it.
    pub fn from_seed(
        encoder: Arc<dyn Encoder>,
        seed: &Corpus,
        thresholds: Thresholds,
    ) -> Result<Self, ClassifierError> {
        thresholds.validate()?;
        let registry = CategoryRegistry::from_seed(encoder.as_ref(), seed)?;
        Self::new(encoder, registry, thresholds)
    }

    /// Classifies one utterance.
    ///
    /// Blank input abstains with confidence 0.0 without touching the encoder.
    pub fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        if text.trim().is_empty() {
            return Ok(Classification::abstain(0.0));
        }

        let encoder = self.encoder()?;
        let embedding = encode_one(encoder.as_ref(), text)?;
        self.classify_embedding(&embedding)
    }

    /// Applies ranking and the policy to a precomputed embedding.
    pub fn classify_embedding(&self, embedding: &[f32]) -> Result<Classification, ClassifierError> {
        let ranked = self.rank_embedding(embedding)?;
        let thresholds = *self.thresholds.read();
        Ok(decide(&ranked, &thresholds))
    }

    /// Ranked scores plus the final decision, for diagnostics.
    ///
    /// Encodes once and reuses the ranking; no state is modified.
    pub fn classification_details(
        &self,
        text: &str,
    ) -> Result<ClassificationDetails, ClassifierError> {
        let thresholds = *self.thresholds.read();

        let (ranked, encoder_name) = if text.trim().is_empty() {
            (Vec::new(), self.encoder_name().unwrap_or_default())
        } else {
            let encoder = self.encoder()?;
            let embedding = encode_one(encoder.as_ref(), text)?;
            (self.rank_embedding(&embedding)?, encoder.name().to_string())
        };

        let decision = decide(&ranked, &thresholds);

        Ok(ClassificationDetails {
            input_text: text.to_string(),
            predicted_intent: decision.label,
            confidence: decision.confidence,
            abstained: decision.abstained,
            margin: margin(&ranked),
            all_scores: ranked,
            margin_threshold: thresholds.margin,
            absolute_threshold: thresholds.absolute,
            encoder: encoder_name,
        })
    }

    /// Encodes a batch with the classifier's encoder.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ClassifierError> {
        let encoder = self.encoder()?;
        Ok(encoder.encode(texts)?)
    }

    /// Adds or replaces a category. Encoding happens before the write lock
    /// is taken.
    pub fn add_category(
        &self,
        name: impl Into<String>,
        examples: Vec<String>,
    ) -> Result<Category, ClassifierError> {
        let encoder = self.encoder()?;
        let category = Category::build(encoder.as_ref(), name, examples)?;

        let mut registry = self.registry.write();
        let stored = registry.insert(category)?.clone();

        info!(
            category = stored.name(),
            examples = stored.examples().len(),
            total_categories = registry.len(),
            "Category stored"
        );
        Ok(stored)
    }

    /// Removes a category; `false` if it did not exist.
    pub fn remove_category(&self, name: &str) -> bool {
        let removed = self.registry.write().remove_category(name);
        if removed {
            info!(category = name, "Category removed");
        } else {
            debug!(category = name, "Remove requested for unknown category");
        }
        removed
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> Vec<String> {
        self.registry
            .read()
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Example phrases for `name` (empty if absent).
    pub fn examples(&self, name: &str) -> Vec<String> {
        self.registry.read().examples(name).to_vec()
    }

    /// Runs `f` against a consistent snapshot of the registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&CategoryRegistry) -> R) -> R {
        f(&self.registry.read())
    }

    pub fn thresholds(&self) -> Thresholds {
        *self.thresholds.read()
    }

    /// Fails on negative or non-finite values.
    pub fn set_margin_threshold(&self, value: f32) -> Result<(), ClassifierError> {
        config::validate_margin(value)?;
        self.thresholds.write().margin = value;
        info!(margin_threshold = value, "Margin threshold updated");
        Ok(())
    }

    pub fn set_absolute_threshold(&self, value: f32) -> Result<(), ClassifierError> {
        config::validate_absolute(value)?;
        self.thresholds.write().absolute = value;
        info!(absolute_threshold = value, "Absolute threshold updated");
        Ok(())
    }

    pub fn set_thresholds(&self, thresholds: Thresholds) -> Result<(), ClassifierError> {
        thresholds.validate()?;
        *self.thresholds.write() = thresholds;
        Ok(())
    }

    /// Drops the encoder handle. Later `classify` calls on non-blank input
    /// fail with [`ClassifierError::NotInitialized`].
    pub fn release(&self) {
        if self.encoder.write().take().is_some() {
            info!("Classifier encoder released");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.encoder.read().is_some()
    }

    pub fn encoder_name(&self) -> Option<String> {
        self.encoder.read().as_ref().map(|e| e.name().to_string())
    }

    fn encoder(&self) -> Result<Arc<dyn Encoder>, ClassifierError> {
        self.encoder
            .read()
            .clone()
            .ok_or(ClassifierError::NotInitialized {
                reason: "encoder has been released",
            })
    }

    fn rank_embedding(&self, embedding: &[f32]) -> Result<Vec<RankedScore>, ClassifierError> {
        let registry = self.registry.read();

        if let Some(expected) = registry.dimension()
            && expected != embedding.len()
        {
            return Err(ClassifierError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            });
        }

        Ok(rank(embedding, &registry))
    }
}
