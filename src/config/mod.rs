//! Environment-backed configuration.
//!
//! Every setting has a default matching the historical working-directory layout.
//! Override with `CRYPTOSIGHTS_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::classifier::ClassifierKind;
use crate::constants::{
    DEFAULT_CONFUSION_MATRIX_PATH, DEFAULT_PREDICTIONS_PATH, DEFAULT_QUERY_LOGS_PATH,
    DEFAULT_RANDOM_SEED, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TEST_SIZE,
    DEFAULT_VALIDATION_OUTPUT_PATH, DEFAULT_VECTORISED_PATH,
};

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CRYPTOSIGHTS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON array of query-log entries. Default: `query_logs.json`.
    pub query_logs_path: PathBuf,

    /// Validation CSV output. Default: `validation_results.csv`.
    pub validation_output_path: PathBuf,

    /// Pre-vectorized training table. Default: `vectorised.csv`.
    pub vectorised_path: PathBuf,

    /// Rendered confusion matrix. Default: `confusion_matrix.png`.
    pub confusion_matrix_path: PathBuf,

    /// Full-dataset predictions. Default: `predictions.csv`.
    pub predictions_path: PathBuf,

    /// Minimum coin/answer cosine similarity. Default: `0.6`.
    pub similarity_threshold: f32,

    /// Fraction of rows held out for evaluation. Default: `0.2`.
    pub test_size: f64,

    /// Seed for the split and the random forest. Default: `42`.
    pub random_seed: u64,

    /// Model whose confusion matrix and predictions are persisted. Default: random forest.
    pub selected_model: ClassifierKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query_logs_path: PathBuf::from(DEFAULT_QUERY_LOGS_PATH),
            validation_output_path: PathBuf::from(DEFAULT_VALIDATION_OUTPUT_PATH),
            vectorised_path: PathBuf::from(DEFAULT_VECTORISED_PATH),
            confusion_matrix_path: PathBuf::from(DEFAULT_CONFUSION_MATRIX_PATH),
            predictions_path: PathBuf::from(DEFAULT_PREDICTIONS_PATH),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            test_size: DEFAULT_TEST_SIZE,
            random_seed: DEFAULT_RANDOM_SEED,
            selected_model: ClassifierKind::RandomForest,
        }
    }
}

impl Config {
    const ENV_QUERY_LOGS: &'static str = "CRYPTOSIGHTS_QUERY_LOGS";
    const ENV_VALIDATION_OUTPUT: &'static str = "CRYPTOSIGHTS_VALIDATION_OUTPUT";
    const ENV_VECTORISED: &'static str = "CRYPTOSIGHTS_VECTORISED";
    const ENV_CONFUSION_MATRIX: &'static str = "CRYPTOSIGHTS_CONFUSION_MATRIX";
    const ENV_PREDICTIONS: &'static str = "CRYPTOSIGHTS_PREDICTIONS";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "CRYPTOSIGHTS_SIMILARITY_THRESHOLD";
    const ENV_TEST_SIZE: &'static str = "CRYPTOSIGHTS_TEST_SIZE";
    const ENV_RANDOM_SEED: &'static str = "CRYPTOSIGHTS_RANDOM_SEED";
    const ENV_SELECTED_MODEL: &'static str = "CRYPTOSIGHTS_SELECTED_MODEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let selected_model = match Self::parse_string_from_env(Self::ENV_SELECTED_MODEL) {
            Some(value) => ClassifierKind::parse(&value)
                .ok_or(ConfigError::UnknownClassifier { value })?,
            None => defaults.selected_model,
        };

        Ok(Self {
            query_logs_path: Self::parse_path_from_env(
                Self::ENV_QUERY_LOGS,
                defaults.query_logs_path,
            ),
            validation_output_path: Self::parse_path_from_env(
                Self::ENV_VALIDATION_OUTPUT,
                defaults.validation_output_path,
            ),
            vectorised_path: Self::parse_path_from_env(
                Self::ENV_VECTORISED,
                defaults.vectorised_path,
            ),
            confusion_matrix_path: Self::parse_path_from_env(
                Self::ENV_CONFUSION_MATRIX,
                defaults.confusion_matrix_path,
            ),
            predictions_path: Self::parse_path_from_env(
                Self::ENV_PREDICTIONS,
                defaults.predictions_path,
            ),
            similarity_threshold: Self::parse_f32_from_env(
                Self::ENV_SIMILARITY_THRESHOLD,
                defaults.similarity_threshold,
            )?,
            test_size: Self::parse_f64_from_env(Self::ENV_TEST_SIZE, defaults.test_size)?,
            random_seed: Self::parse_u64_from_env(Self::ENV_RANDOM_SEED, defaults.random_seed)?,
            selected_model,
        })
    }

    /// Validates ranges and paths (does not touch the filesystem beyond metadata).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }

        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::InvalidTestSize {
                value: self.test_size,
            });
        }

        for (name, path) in [
            ("query logs", &self.query_logs_path),
            ("vectorised dataset", &self.vectorised_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath { name });
            }
        }

        for (name, path) in [
            ("validation output", &self.validation_output_path),
            ("confusion matrix", &self.confusion_matrix_path),
            ("predictions", &self.predictions_path),
        ] {
            Self::check_output_path(name, path)?;
        }

        Ok(())
    }

    fn check_output_path(name: &'static str, path: &Path) -> Result<(), ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath { name });
        }
        if path.is_dir() {
            return Err(ConfigError::OutputIsDirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_string_from_env(var_name)
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_f32_from_env(name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match Self::parse_string_from_env(name) {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name,
                    value,
                    source: e,
                }),
            None => Ok(default),
        }
    }

    fn parse_f64_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match Self::parse_string_from_env(name) {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name,
                    value,
                    source: e,
                }),
            None => Ok(default),
        }
    }

    fn parse_u64_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match Self::parse_string_from_env(name) {
            Some(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }
}
