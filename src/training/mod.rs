//! Classifier trainer: split, fit, score, render and predict.

pub mod error;
pub mod pipeline;


pub use error::TrainingError;
pub use pipeline::{
    ModelEvaluation, TrainingSummary, run_training, train_and_evaluate, write_predictions,
};
