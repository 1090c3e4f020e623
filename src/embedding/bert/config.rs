use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL_ID, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

#[derive(Debug, Clone)]
/// Configuration for [`BertEmbedder`](super::BertEmbedder).
pub struct BertEmbedderConfig {
    /// Local directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// When unset, the model is fetched from the hub cache by [`model_id`](Self::model_id).
    pub model_dir: Option<PathBuf>,
    /// Hub identifier used when no local directory is configured.
    pub model_id: String,
    /// Max tokens per input; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Embedding dimension produced in stub mode (model mode uses the model's hidden size).
    pub embedding_dim: usize,
    /// If true, produce deterministic hashed embeddings (no model files required).
    pub testing_stub: bool,
}

impl Default for BertEmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            model_id: DEFAULT_EMBEDDING_MODEL_ID.to_string(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl BertEmbedderConfig {
    /// Env var pointing at a local model directory.
    pub const ENV_MODEL_PATH: &'static str = "CRYPTOSIGHTS_MODEL_PATH";
    /// Env var overriding the hub model identifier.
    pub const ENV_MODEL_ID: &'static str = "CRYPTOSIGHTS_MODEL_ID";
    /// Env var enabling stub mode (`1` or `true`).
    pub const ENV_STUB: &'static str = "CRYPTOSIGHTS_EMBEDDER_STUB";

    /// Loads config from environment variables (missing values fall back to defaults).
    pub fn from_env() -> Result<Self, EmbeddingError> {
        let model_dir = read_env(Self::ENV_MODEL_PATH).map(PathBuf::from);
        let model_id =
            read_env(Self::ENV_MODEL_ID).unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL_ID.to_string());
        let testing_stub = match read_env(Self::ENV_STUB) {
            None => false,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(EmbeddingError::InvalidConfig {
                        reason: format!("{} must be a boolean, got '{}'", Self::ENV_STUB, v),
                    });
                }
            },
        };

        Ok(Self {
            model_dir,
            model_id,
            testing_stub,
            ..Default::default()
        })
    }

    /// Creates a config for a local model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a config that fetches `model_id` from the hub cache.
    pub fn hub(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    /// Local model directory when set, otherwise the hub model id.
    pub fn model_source(&self) -> String {
        match &self.model_dir {
            Some(dir) => dir.display().to_string(),
            None => self.model_id.clone(),
        }
    }

    /// Validates required fields for the configured mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be greater than zero".to_string(),
                });
            }
            return Ok(());
        }

        match &self.model_dir {
            Some(dir) if dir.as_os_str().is_empty() => Err(EmbeddingError::InvalidConfig {
                reason: "model_dir cannot be empty when provided".to_string(),
            }),
            Some(dir) if !dir.exists() => Err(EmbeddingError::ModelNotFound { path: dir.clone() }),
            Some(_) => Ok(()),
            None if self.model_id.trim().is_empty() => Err(EmbeddingError::InvalidConfig {
                reason: "either model_dir or model_id is required (stubbing is disabled)"
                    .to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
