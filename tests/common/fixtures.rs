//! Shared two-dimensional greet/bye fixture.

use std::sync::Arc;

use intent_sieve::corpus::Corpus;
use intent_sieve::embedding::StaticEncoder;
use intent_sieve::{IntentClassifier, Thresholds};

pub const GREET: &str = "greet";
pub const BYE: &str = "bye";

pub fn encoder() -> StaticEncoder {
    StaticEncoder::from_pairs([
        ("hello", vec![1.0, 0.0]),
        ("hi there", vec![0.9, 0.1]),
        ("goodbye", vec![0.0, 1.0]),
        ("see you", vec![0.1, 0.9]),
        ("hello friend", vec![0.95, 0.05]),
        ("ambiguous", vec![0.5, 0.5]),
        ("farewell", vec![0.2, 0.98]),
        ("cheerio", vec![0.3, 0.95]),
        ("nothing", vec![0.0, 0.0]),
    ])
}

pub fn seed() -> Corpus {
    Corpus::new()
        .with_label(GREET, ["hello", "hi there"])
        .with_label(BYE, ["goodbye", "see you"])
}

pub fn classifier() -> IntentClassifier {
    classifier_with(Thresholds::default())
}

pub fn classifier_with(thresholds: Thresholds) -> IntentClassifier {
    IntentClassifier::from_seed(Arc::new(encoder()), &seed(), thresholds)
        .expect("fixture classifier builds")
}

pub const SEED_JSON: &str = r#"{
    "greet": ["hello", "hi there"],
    "bye": ["goodbye", "see you"]
}"#;

pub const DATASET_JSON: &str = r#"{
    "greet": ["hello", "hello friend", "ambiguous"],
    "bye": ["goodbye", "see you", "hi there"],
    "other": ["", "nothing"]
}"#;
