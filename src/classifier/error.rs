use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training labels contain {found} class(es); at least 2 are required")]
    SingleClass { found: usize },

    #[error("{rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("label index {label} out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },

    #[error("{model} must be fitted before predicting")]
    NotFitted { model: &'static str },

    #[error("{model} solver failed: {reason}")]
    SolverFailed { model: &'static str, reason: String },
}
