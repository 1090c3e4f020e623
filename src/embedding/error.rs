use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or running the sentence encoder.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("sentence encoder files missing under {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load sentence encoder: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("could not fetch '{model_id}' from the hub: {reason}")]
    DownloadFailed { model_id: String, reason: String },

    #[error("encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("could not tokenize input: {reason}")]
    TokenizationFailed { reason: String },

    #[error("bad embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        Self::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        Self::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
