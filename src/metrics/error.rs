use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{actual} actual labels but {predicted} predictions")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("cannot score an empty prediction set")]
    Empty,
}
