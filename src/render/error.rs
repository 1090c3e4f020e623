use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("confusion matrix has no classes to draw")]
    EmptyMatrix,

    #[error("failed to create {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG {path}: {source}")]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
