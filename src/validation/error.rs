use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("failed to read query logs from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed query logs in {path}: {source}")]
    MalformedLogs {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write validation results to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("embedder returned {got} vectors for {expected} inputs")]
    EmbeddingCountMismatch { expected: usize, got: usize },
}
