use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset has no '{column}' label column")]
    MissingLabelColumn { column: String },

    #[error("dataset has no feature columns")]
    NoFeatures,

    #[error("dataset has no rows")]
    Empty,

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row} has {got} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("cannot split {rows} rows with test size {test_size}")]
    SplitTooSmall { rows: usize, test_size: f64 },
}
