//! Offline evaluation of a classify function against a labeled dataset.
//!
//! Runs are strictly sequential: labels in dataset order, examples in order
//! within each label. The harness only aggregates; rendering a report is the
//! caller's job.

mod error;
mod types;

#[cfg(test)]
mod tests;

pub use error::EvaluationError;
pub use types::{
    CategoryStats, CategoryStatsTable, ConfusionCounts, EvaluationRecord, EvaluationReport,
    LatencyMode,
};

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::classifier::{Classification, ClassifierError, IntentClassifier};
use crate::corpus::Corpus;

/// Scores `classify` on every example of `dataset`, timing each call.
///
/// The first classifier error aborts the run. An empty dataset yields
/// [`EvaluationError::EmptyDataset`].
pub fn evaluate<F>(mut classify: F, dataset: &Corpus) -> Result<EvaluationReport, EvaluationError>
where
    F: FnMut(&str) -> Result<Classification, ClassifierError>,
{
    if dataset.total_examples() == 0 {
        return Err(EvaluationError::EmptyDataset);
    }

    let mut run = Accumulator::default();

    for (label, examples) in dataset.iter() {
        for text in examples {
            let start = Instant::now();
            let result = classify(text);
            let elapsed = start.elapsed();

            let classification = result.map_err(|source| EvaluationError::Classifier {
                text: text.clone(),
                label: label.to_string(),
                source,
            })?;

            run.record(text, label, &classification, elapsed);
        }
    }

    Ok(run.finish(LatencyMode::PerItem))
}

/// Like [`evaluate`] but encodes each label's examples in one batch.
///
/// Latency per example is the label's total time divided by its example
/// count, reported as [`LatencyMode::AmortizedPerBatch`].
pub fn evaluate_batched(
    classifier: &IntentClassifier,
    dataset: &Corpus,
) -> Result<EvaluationReport, EvaluationError> {
    if dataset.total_examples() == 0 {
        return Err(EvaluationError::EmptyDataset);
    }

    let mut run = Accumulator::default();

    for (label, examples) in dataset.iter() {
        if examples.is_empty() {
            continue;
        }

        let batch_error = |source: ClassifierError| EvaluationError::Batch {
            label: label.to_string(),
            source,
        };

        let start = Instant::now();

        let to_encode: Vec<&str> = examples
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
            .collect();
        let mut embeddings = if to_encode.is_empty() {
            Vec::new()
        } else {
            classifier.encode_batch(&to_encode).map_err(batch_error)?
        }
        .into_iter();

        let mut decisions = Vec::with_capacity(examples.len());
        for text in examples {
            let decision = if text.trim().is_empty() {
                Classification::abstain(0.0)
            } else {
                let embedding = embeddings.next().ok_or_else(|| {
                    batch_error(ClassifierError::Embedding(
                        crate::embedding::EmbeddingError::InferenceFailed {
                            reason: "encoder returned fewer vectors than inputs".to_string(),
                        },
                    ))
                })?;
                classifier
                    .classify_embedding(&embedding)
                    .map_err(batch_error)?
            };
            decisions.push(decision);
        }

        let per_item = start.elapsed() / examples.len() as u32;
        debug!(
            label,
            batch_size = examples.len(),
            per_item_us = per_item.as_micros() as u64,
            "Batch classified"
        );

        for (text, decision) in examples.iter().zip(&decisions) {
            run.record(text, label, decision, per_item);
        }
    }

    Ok(run.finish(LatencyMode::AmortizedPerBatch))
}

#[derive(Default)]
struct Accumulator {
    correct: usize,
    latencies: Vec<Duration>,
    incorrect: Vec<EvaluationRecord>,
    stats: CategoryStatsTable,
}

impl Accumulator {
    fn record(&mut self, text: &str, true_label: &str, result: &Classification, elapsed: Duration) {
        self.latencies.push(elapsed);

        let stats = self.stats.entry(true_label);
        stats.total += 1;
        stats.latencies.push(elapsed);

        if result.label == true_label {
            stats.correct += 1;
            self.correct += 1;
            return;
        }

        let record = EvaluationRecord {
            text: text.to_string(),
            true_label: true_label.to_string(),
            predicted_label: result.label.clone(),
            confidence: result.confidence,
            elapsed,
        };

        debug!(
            text,
            true_label,
            predicted = %result.label,
            confidence = result.confidence,
            "Misclassified"
        );

        stats.errors += 1;
        stats.misclassified_to.increment(&result.label);
        stats.misclassified.push(record.clone());

        self.stats
            .entry(&result.label)
            .misclassified_from
            .increment(true_label);

        self.incorrect.push(record);
    }

    fn finish(self, latency_mode: LatencyMode) -> EvaluationReport {
        let total = self.latencies.len();
        let accuracy = self.correct as f64 / total as f64;
        let average_latency = types::average(&self.latencies);

        info!(
            total,
            correct = self.correct,
            accuracy,
            average_latency_us = average_latency.as_micros() as u64,
            latency_mode = %latency_mode,
            "Evaluation finished"
        );

        EvaluationReport {
            accuracy,
            average_latency,
            latency_mode,
            total,
            correct: self.correct,
            incorrect: self.incorrect,
            category_stats: self.stats,
        }
    }
}
