//! Intent sieve CLI entrypoint.
//!
//! `intent-sieve repl` classifies lines from stdin; `intent-sieve eval` scores
//! every configured model against the labeled dataset.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;

use intent_sieve::IntentClassifier;
use intent_sieve::config::Config;
use intent_sieve::corpus::{Corpus, builtin};
use intent_sieve::embedding::{Encoder, SentenceEncoder, SentenceEncoderConfig};
use intent_sieve::evaluation::{EvaluationReport, evaluate, evaluate_batched};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: intent-sieve <repl|eval> [--json] [--batched]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or("repl");
    let json = args.iter().any(|a| a == "--json");
    let batched = args.iter().any(|a| a == "--batched");

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        models = config.model_paths.len(),
        margin_threshold = config.margin_threshold,
        absolute_threshold = config.absolute_threshold,
        "Intent sieve starting"
    );

    match mode {
        "repl" => run_repl(&config),
        "eval" => run_eval(&config, json, batched),
        "-h" | "--help" | "help" => {
            println!("{USAGE}");
            Ok(())
        }
        other => anyhow::bail!("unknown mode '{other}'\n{USAGE}"),
    }
}

fn build_encoder(
    config: &Config,
    encoder_config: SentenceEncoderConfig,
) -> anyhow::Result<Arc<dyn Encoder>> {
    if encoder_config.testing_stub {
        tracing::warn!("No INTENT_MODEL_PATHS configured, running encoder in stub mode");
    }

    let model_dir = encoder_config.model_dir.clone();
    let encoder = SentenceEncoder::load(encoder_config)
        .with_context(|| format!("failed to load encoder from {}", model_dir.display()))?;

    Ok(Arc::new(config.instrument(encoder)))
}

fn load_seed(config: &Config) -> anyhow::Result<Corpus> {
    match &config.seed_path {
        Some(path) => Ok(Corpus::from_path(path)?),
        None => Ok(builtin::default_intents()),
    }
}

fn load_dataset(config: &Config) -> anyhow::Result<Corpus> {
    match &config.dataset_path {
        Some(path) => Ok(Corpus::from_path(path)?),
        None => Ok(builtin::eval_dataset()?),
    }
}

fn run_repl(config: &Config) -> anyhow::Result<()> {
    let encoder_config = config
        .encoder_configs()
        .into_iter()
        .next()
        .context("no encoder configured")?;
    let encoder = build_encoder(config, encoder_config)?;
    let seed = load_seed(config)?;
    let classifier = IntentClassifier::from_seed(encoder, &seed, config.thresholds()?)?;

    println!("Intent classifier ready. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "exit" | "quit" | "q" => break,
            "help" => {
                println!("  <text>           classify text");
                println!("  details <text>   show every category score");
                println!("  categories       list categories");
                println!("  exit | quit | q  leave");
            }
            "categories" => {
                for name in classifier.categories() {
                    println!("  {} ({} examples)", name, classifier.examples(&name).len());
                }
            }
            _ => {
                if let Some(text) = line.strip_prefix("details ") {
                    let details = classifier.classification_details(text)?;
                    println!("{}", serde_json::to_string_pretty(&details)?);
                } else {
                    let result = classifier.classify(line)?;
                    println!("  {result}");
                }
            }
        }
    }

    classifier.release();
    Ok(())
}

fn run_eval(config: &Config, json: bool, batched: bool) -> anyhow::Result<()> {
    let seed = load_seed(config)?;
    let dataset = load_dataset(config)?;
    let thresholds = config.thresholds()?;

    let mut summary: Vec<(String, EvaluationReport)> = Vec::new();

    for encoder_config in config.encoder_configs() {
        let encoder = build_encoder(config, encoder_config)?;
        let name = encoder.name().to_string();
        let classifier = IntentClassifier::from_seed(encoder, &seed, thresholds)?;

        let report = if batched {
            evaluate_batched(&classifier, &dataset)?
        } else {
            evaluate(|text| classifier.classify(text), &dataset)?
        };
        classifier.release();

        if !json {
            print_report(&name, &report);
        }
        summary.push((name, report));
    }

    if json {
        let reports: Vec<serde_json::Value> = summary
            .iter()
            .map(|(name, report)| serde_json::json!({ "model": name, "report": report }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("\n=== Summary ===");
    println!("{:<32} {:>10} {:>14}", "model", "accuracy", "avg latency");
    for (name, report) in &summary {
        println!(
            "{:<32} {:>9.2}% {:>11.2} ms",
            name,
            report.accuracy * 100.0,
            report.average_latency.as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

fn print_report(name: &str, report: &EvaluationReport) {
    println!("\n=== {name} ===");
    println!(
        "accuracy {:.2}% ({}/{}), average latency {:.2} ms ({})",
        report.accuracy * 100.0,
        report.correct,
        report.total,
        report.average_latency.as_secs_f64() * 1000.0,
        report.latency_mode
    );

    for stats in report.category_stats.iter() {
        println!(
            "\n  {}: {}/{} correct ({:.1}%), {:.2} ms avg",
            stats.label,
            stats.correct,
            stats.total,
            stats.accuracy() * 100.0,
            stats.average_latency().as_secs_f64() * 1000.0
        );
        for (predicted, count) in stats.misclassified_to.iter() {
            println!("    -> {predicted}: {count}");
        }
        for (actual, count) in stats.misclassified_from.iter() {
            println!("    <- {actual}: {count}");
        }
        for record in &stats.misclassified {
            println!(
                "    {:?} predicted {} ({:.4})",
                record.text, record.predicted_label, record.confidence
            );
        }
    }
}
