use serde::Serialize;

use crate::constants::ABSTAIN_LABEL;
use crate::ranking::RankedScore;

/// Outcome of one classification.
///
/// `confidence` is the top similarity when a category is accepted and the
/// top-two margin when the classifier abstains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
    pub abstained: bool,
}

impl Classification {
    pub fn accept(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            confidence: score,
            abstained: false,
        }
    }

    pub fn abstain(margin: f32) -> Self {
        Self {
            label: ABSTAIN_LABEL.to_string(),
            confidence: margin,
            abstained: true,
        }
    }

    pub fn is_abstain(&self) -> bool {
        self.abstained
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (confidence={:.4})", self.label, self.confidence)
    }
}

/// Full diagnostic view of a classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationDetails {
    pub input_text: String,
    pub predicted_intent: String,
    pub confidence: f32,
    pub abstained: bool,
    /// Every category's score, best first.
    pub all_scores: Vec<RankedScore>,
    /// Best minus second-best score (0.0 when nothing was ranked).
    pub margin: f32,
    pub margin_threshold: f32,
    pub absolute_threshold: f32,
    pub encoder: String,
}
