//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `INTENT_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::classifier::Thresholds;
use crate::constants::{DEFAULT_ABSOLUTE_THRESHOLD, DEFAULT_MARGIN_THRESHOLD, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::{Encoder, InstrumentedEncoder, SentenceEncoderConfig};

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `INTENT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sentence-encoder model directories, evaluated in order. Empty selects
    /// the deterministic stub encoder.
    pub model_paths: Vec<PathBuf>,

    /// JSON file of seed categories. Default: built-in intents.
    pub seed_path: Option<PathBuf>,

    /// JSON file of labeled evaluation examples. Default: built-in dataset.
    pub dataset_path: Option<PathBuf>,

    /// Minimum gap between the top two scores. Default: `0.1`.
    pub margin_threshold: f32,

    /// Minimum top score. Default: `0.2`.
    pub absolute_threshold: f32,

    /// Max tokens per input. Default: `128`.
    pub max_seq_len: usize,

    /// Latency budget for one encode call. Default: none.
    pub encode_deadline: Option<Duration>,

    /// Fail encode calls that exceed `encode_deadline` instead of only
    /// logging them. Default: `false`.
    pub enforce_deadline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_paths: Vec::new(),
            seed_path: None,
            dataset_path: None,
            margin_threshold: DEFAULT_MARGIN_THRESHOLD,
            absolute_threshold: DEFAULT_ABSOLUTE_THRESHOLD,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            encode_deadline: None,
            enforce_deadline: false,
        }
    }
}

impl Config {
    const ENV_MODEL_PATHS: &'static str = "INTENT_MODEL_PATHS";
    const ENV_SEED_PATH: &'static str = "INTENT_SEED_PATH";
    const ENV_DATASET_PATH: &'static str = "INTENT_DATASET_PATH";
    const ENV_MARGIN_THRESHOLD: &'static str = "INTENT_MARGIN_THRESHOLD";
    const ENV_ABSOLUTE_THRESHOLD: &'static str = "INTENT_ABSOLUTE_THRESHOLD";
    const ENV_MAX_SEQ_LEN: &'static str = "INTENT_MAX_SEQ_LEN";
    const ENV_ENCODE_DEADLINE_MS: &'static str = "INTENT_ENCODE_DEADLINE_MS";
    const ENV_ENFORCE_DEADLINE: &'static str = "INTENT_ENFORCE_DEADLINE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_paths = Self::parse_path_list_from_env(Self::ENV_MODEL_PATHS);
        let seed_path = Self::parse_optional_path_from_env(Self::ENV_SEED_PATH);
        let dataset_path = Self::parse_optional_path_from_env(Self::ENV_DATASET_PATH);
        let margin_threshold =
            Self::parse_f32_from_env(Self::ENV_MARGIN_THRESHOLD, defaults.margin_threshold)?;
        let absolute_threshold =
            Self::parse_f32_from_env(Self::ENV_ABSOLUTE_THRESHOLD, defaults.absolute_threshold)?;
        let max_seq_len = Self::parse_usize_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;
        let encode_deadline = Self::parse_optional_u64_from_env(Self::ENV_ENCODE_DEADLINE_MS)?
            .map(Duration::from_millis);
        let enforce_deadline =
            Self::parse_bool_from_env(Self::ENV_ENFORCE_DEADLINE, defaults.enforce_deadline)?;

        Ok(Self {
            model_paths,
            seed_path,
            dataset_path,
            margin_threshold,
            absolute_threshold,
            max_seq_len,
            encode_deadline,
            enforce_deadline,
        })
    }

    /// Validates paths and thresholds (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;

        if self.max_seq_len == 0 {
            return Err(ConfigError::InvalidNumber {
                name: Self::ENV_MAX_SEQ_LEN,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.enforce_deadline && self.encode_deadline.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_ENCODE_DEADLINE_MS,
            });
        }

        for path in &self.model_paths {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        for path in [&self.seed_path, &self.dataset_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Decision thresholds, validated.
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        Thresholds::new(self.margin_threshold, self.absolute_threshold)
            .map_err(|source| ConfigError::InvalidThreshold { source })
    }

    /// One encoder config per model path, or a single stub config when none
    /// are set.
    pub fn encoder_configs(&self) -> Vec<SentenceEncoderConfig> {
        if self.model_paths.is_empty() {
            return vec![SentenceEncoderConfig::stub().with_max_seq_len(self.max_seq_len)];
        }

        self.model_paths
            .iter()
            .map(|path| SentenceEncoderConfig::new(path).with_max_seq_len(self.max_seq_len))
            .collect()
    }

    /// Wraps `encoder` with the configured deadline and enforcement.
    pub fn instrument<E: Encoder>(&self, encoder: E) -> InstrumentedEncoder<E> {
        InstrumentedEncoder::new(encoder)
            .with_deadline(self.encode_deadline)
            .enforce_deadline(self.enforce_deadline)
    }

    fn parse_path_list_from_env(var_name: &str) -> Vec<PathBuf> {
        env::var(var_name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                value
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseFloatError| ConfigError::InvalidNumber {
                        name: var_name,
                        value: value.clone(),
                        reason: e.to_string(),
                    })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" => Ok(default),
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        Ok(Self::parse_optional_u64_from_env(var_name)?
            .map(|v| v as usize)
            .unwrap_or(default))
    }

    fn parse_optional_u64_from_env(var_name: &'static str) -> Result<Option<u64>, ConfigError> {
        match env::var(var_name) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => value.trim().parse().map(Some).map_err(
                |e: std::num::ParseIntError| ConfigError::InvalidNumber {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                },
            ),
            Err(_) => Ok(None),
        }
    }
}
