use super::*;
use std::sync::Arc;

use crate::classifier::Thresholds;
use crate::constants::ABSTAIN_LABEL;
use crate::embedding::StaticEncoder;

fn classifier() -> IntentClassifier {
    let encoder = Arc::new(StaticEncoder::from_pairs([
        ("hello", vec![1.0, 0.0]),
        ("hi there", vec![0.9, 0.1]),
        ("goodbye", vec![0.0, 1.0]),
        ("see you", vec![0.1, 0.9]),
        ("hello friend", vec![0.95, 0.05]),
        ("ambiguous", vec![0.5, 0.5]),
    ]));
    let seed = Corpus::new()
        .with_label("greet", ["hello", "hi there"])
        .with_label("bye", ["goodbye", "see you"]);
    IntentClassifier::from_seed(encoder, &seed, Thresholds::default()).unwrap()
}

fn dataset() -> Corpus {
    Corpus::new()
        .with_label("greet", ["hello", "hello friend", "ambiguous"])
        .with_label("bye", ["goodbye", "see you", "hi there"])
}

fn run() -> EvaluationReport {
    let classifier = classifier();
    evaluate(|text| classifier.classify(text), &dataset()).expect("evaluation runs")
}

#[test]
fn test_accuracy_and_counts() {
    let report = run();

    assert_eq!(report.total, 6);
    assert_eq!(report.correct, 4);
    assert_eq!(report.error_count(), 2);
    assert!((report.accuracy - 4.0 / 6.0).abs() < 1e-9);
    assert_eq!(report.latency_mode, LatencyMode::PerItem);
}

#[test]
fn test_incorrect_list_in_dataset_order() {
    let report = run();

    let incorrect: Vec<(&str, &str, &str)> = report
        .incorrect
        .iter()
        .map(|r| {
            (
                r.text.as_str(),
                r.true_label.as_str(),
                r.predicted_label.as_str(),
            )
        })
        .collect();

    assert_eq!(
        incorrect,
        vec![
            ("ambiguous", "greet", ABSTAIN_LABEL),
            ("hi there", "bye", "greet"),
        ]
    );
}

#[test]
fn test_abstain_record_carries_margin() {
    let report = run();
    let ambiguous = &report.incorrect[0];
    assert!(ambiguous.confidence.abs() < 1e-5);
}

#[test]
fn test_per_category_stats() {
    let report = run();
    let stats = &report.category_stats;

    let greet = stats.get("greet").unwrap();
    assert_eq!((greet.total, greet.correct, greet.errors), (3, 2, 1));
    assert_eq!(greet.misclassified_to.get(ABSTAIN_LABEL), 1);
    assert_eq!(greet.misclassified_from.get("bye"), 1);
    assert_eq!(greet.misclassified.len(), 1);
    assert_eq!(greet.misclassified[0].text, "ambiguous");
    assert_eq!(greet.latencies.len(), 3);

    let bye = stats.get("bye").unwrap();
    assert_eq!((bye.total, bye.correct, bye.errors), (3, 2, 1));
    assert_eq!(bye.misclassified_to.get("greet"), 1);
    assert!(bye.misclassified_from.is_empty());

    let other = stats.get(ABSTAIN_LABEL).unwrap();
    assert_eq!(other.total, 0);
    assert_eq!(other.accuracy(), 0.0);
    assert_eq!(other.average_latency(), Duration::ZERO);
    assert_eq!(other.misclassified_from.get("greet"), 1);
}

#[test]
fn test_stats_first_seen_order() {
    let report = run();
    assert_eq!(
        report.category_stats.labels().collect::<Vec<_>>(),
        vec!["greet", ABSTAIN_LABEL, "bye"]
    );
}

#[test]
fn test_totals_sum_to_dataset_size() {
    let report = run();
    let data = dataset();

    let sum: usize = report.category_stats.iter().map(|s| s.total).sum();
    assert_eq!(sum, data.total_examples());

    for stats in report.category_stats.iter() {
        assert_eq!(stats.correct + stats.errors, stats.total);
        assert_eq!(stats.errors, stats.misclassified_to.total());
        assert_eq!(stats.latencies.len(), stats.total);
    }
}

#[test]
fn test_confusion_symmetry() {
    let report = run();
    let stats = &report.category_stats;

    for true_stats in stats.iter() {
        for (predicted, count) in true_stats.misclassified_to.iter() {
            let predicted_stats = stats.get(predicted).unwrap();
            assert_eq!(
                predicted_stats.misclassified_from.get(&true_stats.label),
                count
            );
        }
    }

    let to_total: usize = stats.iter().map(|s| s.misclassified_to.total()).sum();
    let from_total: usize = stats.iter().map(|s| s.misclassified_from.total()).sum();
    assert_eq!(to_total, from_total);
    assert_eq!(to_total, report.error_count());
}

#[test]
fn test_empty_dataset_is_an_error() {
    let classifier = classifier();
    let result = evaluate(|t| classifier.classify(t), &Corpus::new());
    assert!(matches!(result, Err(EvaluationError::EmptyDataset)));
}

#[test]
fn test_labels_without_examples_is_an_error() {
    let classifier = classifier();
    let empty_labels = Corpus::new()
        .with_label("greet", Vec::<String>::new())
        .with_label("bye", Vec::<String>::new());
    let result = evaluate(|t| classifier.classify(t), &empty_labels);
    assert!(matches!(result, Err(EvaluationError::EmptyDataset)));
}

#[test]
fn test_classifier_error_aborts_run() {
    let classifier = classifier();
    let data = Corpus::new().with_label("greet", ["hello", "unknown text", "hi there"]);

    match evaluate(|t| classifier.classify(t), &data) {
        Err(EvaluationError::Classifier { text, label, .. }) => {
            assert_eq!(text, "unknown text");
            assert_eq!(label, "greet");
        }
        other => panic!("expected classifier error, got {:?}", other),
    }
}

#[test]
fn test_custom_classify_fn() {
    let mut calls = 0;
    let report = evaluate(
        |_| {
            calls += 1;
            Ok(Classification::accept("greet", 1.0))
        },
        &dataset(),
    )
    .unwrap();

    assert_eq!(calls, 6);
    assert_eq!(report.correct, 3);
    assert_eq!(report.category_stats.get("greet").unwrap().misclassified_from.get("bye"), 3);
}

#[test]
fn test_blank_examples_count_as_abstentions() {
    let classifier = classifier();
    let data = Corpus::new().with_label(ABSTAIN_LABEL, ["", "   "]);

    let report = evaluate(|t| classifier.classify(t), &data).unwrap();
    assert_eq!(report.correct, 2);
    assert_eq!(report.accuracy, 1.0);
}

mod batched_tests {
    use super::*;

    #[test]
    fn test_batched_matches_sequential_predictions() {
        let classifier = classifier();
        let sequential = evaluate(|t| classifier.classify(t), &dataset()).unwrap();
        let batched = evaluate_batched(&classifier, &dataset()).unwrap();

        assert_eq!(batched.latency_mode, LatencyMode::AmortizedPerBatch);
        assert_eq!(batched.total, sequential.total);
        assert_eq!(batched.correct, sequential.correct);

        let strip = |report: &EvaluationReport| -> Vec<(String, String)> {
            report
                .incorrect
                .iter()
                .map(|r| (r.text.clone(), r.predicted_label.clone()))
                .collect()
        };
        assert_eq!(strip(&batched), strip(&sequential));
    }

    #[test]
    fn test_batched_latency_is_uniform_per_label() {
        let classifier = classifier();
        let report = evaluate_batched(&classifier, &dataset()).unwrap();

        for stats in report.category_stats.iter().filter(|s| s.total > 0) {
            let first = stats.latencies[0];
            assert!(stats.latencies.iter().all(|l| *l == first));
        }
    }

    #[test]
    fn test_batched_skips_blank_texts_when_encoding() {
        let classifier = classifier();
        let data = Corpus::new().with_label(ABSTAIN_LABEL, ["  ", "ambiguous", ""]);

        let report = evaluate_batched(&classifier, &data).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.correct, 3);
    }

    #[test]
    fn test_batched_all_blank_label_never_encodes() {
        let classifier = classifier();
        classifier.release();
        let data = Corpus::new().with_label(ABSTAIN_LABEL, ["", "  "]);

        let report = evaluate_batched(&classifier, &data).unwrap();
        assert_eq!(report.correct, 2);
    }

    #[test]
    fn test_batched_empty_dataset() {
        let classifier = classifier();
        assert!(matches!(
            evaluate_batched(&classifier, &Corpus::new()),
            Err(EvaluationError::EmptyDataset)
        ));
    }

    #[test]
    fn test_batched_released_encoder() {
        let classifier = classifier();
        classifier.release();
        assert!(matches!(
            evaluate_batched(&classifier, &dataset()),
            Err(EvaluationError::Batch {
                source: ClassifierError::NotInitialized { .. },
                ..
            })
        ));
    }
}

mod type_tests {
    use super::*;

    #[test]
    fn test_confusion_counts_default_zero() {
        let mut counts = ConfusionCounts::default();
        assert_eq!(counts.get("anything"), 0);

        counts.increment("a");
        counts.increment("a");
        counts.increment("b");
        assert_eq!(counts.get("a"), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_confusion_counts_keep_first_seen_order() {
        let mut counts = ConfusionCounts::default();
        for label in ["zeta", "alpha", "zeta", "mid"] {
            counts.increment(label);
        }

        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![("zeta", 2), ("alpha", 1), ("mid", 1)]
        );

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"zeta":2,"alpha":1,"mid":1}"#);
    }

    #[test]
    fn test_category_stats_accuracy_and_latency() {
        let stats = CategoryStats {
            total: 4,
            correct: 3,
            latencies: vec![Duration::from_millis(2), Duration::from_millis(4)],
            ..CategoryStats::new("x")
        };
        assert_eq!(stats.accuracy(), 0.75);
        assert_eq!(stats.average_latency(), Duration::from_millis(3));
    }

    #[test]
    fn test_report_serializes() {
        let report = run();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["latency_mode"], "per_item");
        assert_eq!(json["category_stats"][0]["label"], "greet");
        assert_eq!(json["category_stats"][0]["misclassified_to"]["other"], 1);
    }

    #[test]
    fn test_latency_mode_display() {
        assert_eq!(LatencyMode::PerItem.to_string(), "per-item");
        assert_eq!(
            LatencyMode::AmortizedPerBatch.to_string(),
            "amortized-per-batch"
        );
    }
}
