use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_intent_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("INTENT_MODEL_PATHS");
        env::remove_var("INTENT_SEED_PATH");
        env::remove_var("INTENT_DATASET_PATH");
        env::remove_var("INTENT_MARGIN_THRESHOLD");
        env::remove_var("INTENT_ABSOLUTE_THRESHOLD");
        env::remove_var("INTENT_MAX_SEQ_LEN");
        env::remove_var("INTENT_ENCODE_DEADLINE_MS");
        env::remove_var("INTENT_ENFORCE_DEADLINE");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.model_paths.is_empty());
    assert!(config.seed_path.is_none());
    assert!(config.dataset_path.is_none());
    assert_eq!(config.margin_threshold, 0.1);
    assert_eq!(config.absolute_threshold, 0.2);
    assert_eq!(config.max_seq_len, 128);
    assert!(config.encode_deadline.is_none());
    assert!(!config.enforce_deadline);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_intent_env();

    let config = Config::from_env().unwrap();
    assert!(config.model_paths.is_empty());
    assert_eq!(config.margin_threshold, 0.1);
    assert!(config.encode_deadline.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_intent_env();

    let config = with_env_vars(
        &[
            ("INTENT_MODEL_PATHS", "/models/a, /models/b,,"),
            ("INTENT_SEED_PATH", "/data/seed.json"),
            ("INTENT_DATASET_PATH", "  "),
            ("INTENT_MARGIN_THRESHOLD", "0.05"),
            ("INTENT_ABSOLUTE_THRESHOLD", "0.4"),
            ("INTENT_MAX_SEQ_LEN", "64"),
            ("INTENT_ENCODE_DEADLINE_MS", "250"),
            ("INTENT_ENFORCE_DEADLINE", "true"),
        ],
        Config::from_env,
    )
    .unwrap();

    assert_eq!(
        config.model_paths,
        vec![PathBuf::from("/models/a"), PathBuf::from("/models/b")]
    );
    assert_eq!(config.seed_path, Some(PathBuf::from("/data/seed.json")));
    assert!(config.dataset_path.is_none());
    assert_eq!(config.margin_threshold, 0.05);
    assert_eq!(config.absolute_threshold, 0.4);
    assert_eq!(config.max_seq_len, 64);
    assert_eq!(config.encode_deadline, Some(Duration::from_millis(250)));
    assert!(config.enforce_deadline);
}

#[test]
#[serial]
fn test_enforce_deadline_flag_values() {
    clear_intent_env();

    for (raw, expected) in [("1", true), ("on", true), ("FALSE", false), ("no", false)] {
        let config = with_env_vars(&[("INTENT_ENFORCE_DEADLINE", raw)], Config::from_env).unwrap();
        assert_eq!(config.enforce_deadline, expected, "value {raw}");
    }

    let result = with_env_vars(&[("INTENT_ENFORCE_DEADLINE", "maybe")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
}

#[test]
fn test_enforce_deadline_requires_deadline() {
    let config = Config {
        enforce_deadline: true,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar {
            name: "INTENT_ENCODE_DEADLINE_MS"
        })
    ));
}

#[test]
#[serial]
fn test_invalid_margin_is_a_parse_error() {
    clear_intent_env();

    let result = with_env_vars(&[("INTENT_MARGIN_THRESHOLD", "wide")], Config::from_env);
    match result {
        Err(ConfigError::InvalidNumber { name, value, .. }) => {
            assert_eq!(name, "INTENT_MARGIN_THRESHOLD");
            assert_eq!(value, "wide");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_invalid_deadline_is_a_parse_error() {
    clear_intent_env();

    let result = with_env_vars(&[("INTENT_ENCODE_DEADLINE_MS", "-3")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
}

#[test]
fn test_thresholds_valid() {
    let config = Config::default();
    let thresholds = config.thresholds().unwrap();
    assert_eq!(thresholds, Thresholds::default());
}

#[test]
fn test_negative_margin_rejected() {
    let config = Config {
        margin_threshold: -0.1,
        ..Default::default()
    };
    assert!(matches!(
        config.thresholds(),
        Err(ConfigError::InvalidThreshold { .. })
    ));
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_zero_seq_len() {
    let config = Config {
        max_seq_len: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidNumber { .. })
    ));
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        model_paths: vec![PathBuf::from("/nonexistent/model/dir")],
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_model_path_must_be_dir() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("weights.bin");
    fs::write(&file, b"x").unwrap();

    let config = Config {
        model_paths: vec![file],
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_seed_path_must_be_file() {
    let dir = TempDir::new().unwrap();

    let config = Config {
        seed_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_existing_paths() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("dataset.json");
    fs::write(&dataset, "{}").unwrap();

    let config = Config {
        model_paths: vec![dir.path().to_path_buf()],
        dataset_path: Some(dataset),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_encoder_configs_stub_when_no_models() {
    let config = Config {
        max_seq_len: 32,
        ..Default::default()
    };
    let configs = config.encoder_configs();

    assert_eq!(configs.len(), 1);
    assert!(configs[0].testing_stub);
    assert_eq!(configs[0].max_seq_len, 32);
}

#[test]
fn test_encoder_configs_per_model() {
    let config = Config {
        model_paths: vec![PathBuf::from("/m/a"), PathBuf::from("/m/b")],
        ..Default::default()
    };
    let configs = config.encoder_configs();

    assert_eq!(configs.len(), 2);
    assert!(configs.iter().all(|c| !c.testing_stub));
    assert_eq!(configs[1].model_dir, PathBuf::from("/m/b"));
}

#[test]
fn test_error_display() {
    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/missing"),
    };
    assert!(err.to_string().contains("/missing"));
}

mod instrument_tests {
    use super::*;
    use crate::embedding::{EmbeddingError, Encoder, StaticEncoder};

    struct SlowEncoder;

    impl Encoder for SlowEncoder {
        fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            std::thread::sleep(Duration::from_millis(5));
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }

        fn dimension(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_instrument_applies_deadline() {
        let config = Config {
            encode_deadline: Some(Duration::from_millis(40)),
            ..Default::default()
        };
        let encoder = config.instrument(StaticEncoder::from_pairs([("a", vec![1.0])]));
        assert_eq!(encoder.deadline(), Some(Duration::from_millis(40)));
        assert!(encoder.encode(&["a"]).is_ok());
    }

    #[test]
    fn test_instrument_enforces_when_configured() {
        let config = Config {
            encode_deadline: Some(Duration::from_millis(1)),
            enforce_deadline: true,
            ..Default::default()
        };
        assert!(matches!(
            config.instrument(SlowEncoder).encode(&["x"]),
            Err(EmbeddingError::DeadlineExceeded { .. })
        ));
    }

    #[test]
    fn test_instrument_warns_by_default() {
        let config = Config {
            encode_deadline: Some(Duration::from_millis(1)),
            ..Default::default()
        };
        assert!(config.instrument(SlowEncoder).encode(&["x"]).is_ok());
    }
}
