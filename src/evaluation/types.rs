use std::time::Duration;

use serde::{Serialize, Serializer};

/// One scored dataset example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub text: String,
    pub true_label: String,
    pub predicted_label: String,
    pub confidence: f32,
    pub elapsed: Duration,
}

/// Label -> count in first-seen order, reading absent labels as zero.
///
/// Serializes as a JSON object keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionCounts(Vec<(String, usize)>);

impl ConfusionCounts {
    pub fn increment(&mut self, label: &str) {
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.0.push((label.to_string(), 1)),
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ConfusionCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Per-label aggregate over one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub label: String,
    pub total: usize,
    pub correct: usize,
    pub errors: usize,
    pub latencies: Vec<Duration>,
    /// Under a true label: which labels its examples were predicted as.
    pub misclassified_to: ConfusionCounts,
    /// Under a predicted label: which true labels were wrongly sent here.
    pub misclassified_from: ConfusionCounts,
    pub misclassified: Vec<EvaluationRecord>,
}

impl CategoryStats {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// `correct / total`, 0.0 for labels that only appear as predictions.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn average_latency(&self) -> Duration {
        average(&self.latencies)
    }
}

/// Per-label stats in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryStatsTable(Vec<CategoryStats>);

impl CategoryStatsTable {
    pub fn get(&self, label: &str) -> Option<&CategoryStats> {
        self.0.iter().find(|s| s.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryStats> {
        self.0.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn entry(&mut self, label: &str) -> &mut CategoryStats {
        let index = match self.0.iter().position(|s| s.label == label) {
            Some(index) => index,
            None => {
                self.0.push(CategoryStats::new(label));
                self.0.len() - 1
            }
        };
        &mut self.0[index]
    }
}

/// What `elapsed` / `average_latency` measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyMode {
    /// Each example timed around its own classify call.
    PerItem,
    /// One batched encode per label, its time split evenly over the batch.
    AmortizedPerBatch,
}

impl std::fmt::Display for LatencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatencyMode::PerItem => write!(f, "per-item"),
            LatencyMode::AmortizedPerBatch => write!(f, "amortized-per-batch"),
        }
    }
}

/// Result of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub average_latency: Duration,
    pub latency_mode: LatencyMode,
    pub total: usize,
    pub correct: usize,
    pub incorrect: Vec<EvaluationRecord>,
    pub category_stats: CategoryStatsTable,
}

impl EvaluationReport {
    pub fn error_count(&self) -> usize {
        self.incorrect.len()
    }

    /// Labels seen in the run, true or predicted, in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category_stats.labels()
    }
}

pub(crate) fn average(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = durations.iter().sum();
    total / durations.len() as u32
}
