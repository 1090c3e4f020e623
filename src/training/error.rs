use std::path::PathBuf;
use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::dataset::DatasetError;
use crate::metrics::MetricsError;
use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("{model} failed: {source}")]
    Classifier {
        model: &'static str,
        #[source]
        source: ClassifierError,
    },

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to write predictions to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("label '{label}' is not known to the label encoder")]
    UnknownLabel { label: String },
}
