//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A float setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// An integer setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Similarity threshold outside the cosine range.
    #[error("invalid similarity threshold {value}: must be between -1.0 and 1.0")]
    InvalidThreshold { value: f32 },

    /// Test split fraction outside the open interval (0, 1).
    #[error("invalid test size {value}: must be strictly between 0.0 and 1.0")]
    InvalidTestSize { value: f64 },

    /// Unknown classifier name for the reported model.
    #[error("unknown classifier '{value}': expected svm, logistic_regression or random_forest")]
    UnknownClassifier { value: String },

    /// A configured path was empty.
    #[error("path for {name} cannot be empty")]
    EmptyPath { name: &'static str },

    /// Output path exists but is a directory.
    #[error("output path is a directory: {path}")]
    OutputIsDirectory { path: PathBuf },
}
