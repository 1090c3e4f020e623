//! Cryptosights evaluation library (used by both binaries and the integration tests).
//!
//! # Public API Surface
//!
//! Two offline pipelines share this crate. They have no runtime state in common.
//!
//! ## Query Validation
//! - [`Validator`] - keyword and embedding-similarity validity heuristic
//! - [`run_validation`] - `query_logs.json` to `validation_results.csv`
//! - [`QueryLogEntry`], [`ValidationResult`], [`ValidationStatus`] - record types
//!
//! ## Classifier Training
//! - [`run_training`] - `vectorised.csv` to metrics, `confusion_matrix.png` and `predictions.csv`
//! - [`VectorizedDataset`], [`train_test_split`] - data loading and the seeded split
//! - [`SvmClassifier`], [`LogisticRegression`], [`RandomForest`] - the three models
//! - [`ClassificationReport`], [`ConfusionMatrix`] - held-out scoring
//!
//! ## Embedding
//! - [`Embedder`] - seam between the validator and the sentence encoder
//! - [`BertEmbedder`], [`BertEmbedderConfig`] - candle BERT encoder with a deterministic stub
//!
//! ## Configuration
//! [`Config`] reads `CRYPTOSIGHTS_*` overrides on top of the working-directory defaults in
//! [`constants`].

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod metrics;
pub mod render;
pub mod training;
pub mod validation;

pub use classifier::{
    Classifier, ClassifierError, ClassifierKind, LogisticRegression, RandomForest, SvmClassifier,
};
pub use config::{Config, ConfigError};
pub use dataset::{DatasetError, LabelEncoder, VectorizedDataset, train_test_split};
pub use embedding::{BertEmbedder, BertEmbedderConfig, Embedder, EmbeddingError};
pub use metrics::{ClassificationReport, ConfusionMatrix, MetricsError, accuracy};
pub use render::{RenderError, write_confusion_matrix_png};
pub use training::{ModelEvaluation, TrainingError, TrainingSummary, run_training};
pub use validation::{
    QueryLogEntry, ValidationError, ValidationResult, ValidationStatus, ValidationSummary,
    Validator, run_validation,
};
