//! Cross-cutting, shared constants.
//!
//! Default file locations mirror the layout the pipelines have always used: every
//! input and output lives in the working directory unless overridden through
//! [`Config`](crate::config::Config).

/// Coin category that is accepted without inspecting the query or answers.
pub const GENERAL_CRYPTO_CATEGORY: &str = "general crypto";

/// Minimum coin/answer cosine similarity that counts as a semantic match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.6;

/// Hub identifier of the default sentence-embedding model.
pub const DEFAULT_EMBEDDING_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Output dimension of the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit of the default embedding model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

pub const DEFAULT_QUERY_LOGS_PATH: &str = "query_logs.json";
pub const DEFAULT_VALIDATION_OUTPUT_PATH: &str = "validation_results.csv";
pub const DEFAULT_VECTORISED_PATH: &str = "vectorised.csv";
pub const DEFAULT_CONFUSION_MATRIX_PATH: &str = "confusion_matrix.png";
pub const DEFAULT_PREDICTIONS_PATH: &str = "predictions.csv";

/// Name of the label column in the vectorised dataset.
pub const LABEL_COLUMN: &str = "status";

/// Header prefix of index columns written by dataframe tooling; dropped on load.
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed";

/// Header of the single column in the predictions file.
pub const PREDICTION_COLUMN: &str = "prediction";

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_RANDOM_SEED: u64 = 42;
