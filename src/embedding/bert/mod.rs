//! BERT-family sentence embedder (mean pooling + L2 normalization).
//!
//! Any sentence-transformers checkpoint laid out as `config.json`,
//! `model.safetensors` and `tokenizer.json` works; the default is
//! `all-MiniLM-L6-v2`. Use [`BertEmbedderConfig::stub`] for tests without model files.

/// Embedder configuration.
pub mod config;


pub use config::BertEmbedderConfig;

use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::api::sync::ApiBuilder;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::Embedder;
use crate::embedding::device::{device_label, select_device};
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{configure_for_batches, load_tokenizer};

enum EmbedderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Resolved on-disk locations of the three model artifacts.
#[derive(Debug, Clone)]
struct ModelFiles {
    config: PathBuf,
    weights: PathBuf,
    tokenizer: PathBuf,
}

/// Sentence embedder backed by a BERT encoder (supports stub mode).
pub struct BertEmbedder {
    backend: EmbedderBackend,
    config: BertEmbedderConfig,
    dimension: usize,
}

impl std::fmt::Debug for BertEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => {
                        format!("Model({})", device_label(device))
                    }
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("dimension", &self.dimension)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl BertEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: BertEmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Embedder running in STUB mode (hashed vectors, no semantics)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                dimension: config.embedding_dim,
                config,
            });
        }

        let device = select_device()?;
        debug!(device = device_label(&device), "Selected compute device for embedder");

        let files = match &config.model_dir {
            Some(dir) => Self::local_files(dir)?,
            None => Self::hub_files(&config.model_id)?,
        };

        let (model, tokenizer, dimension) = Self::load_model(&files, &config, &device)?;

        info!(
            model = %config.model_source(),
            dimension,
            max_seq_len = config.max_seq_len,
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
            dimension,
        })
    }

    /// Creates a stub embedder.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(BertEmbedderConfig::stub())
    }

    fn local_files(dir: &Path) -> Result<ModelFiles, EmbeddingError> {
        let files = ModelFiles {
            config: dir.join("config.json"),
            weights: dir.join("model.safetensors"),
            tokenizer: dir.join("tokenizer.json"),
        };

        for path in [&files.config, &files.weights, &files.tokenizer] {
            if !path.exists() {
                return Err(EmbeddingError::ModelLoadFailed {
                    reason: format!(
                        "Missing {} in {}",
                        path.file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        dir.display()
                    ),
                });
            }
        }

        Ok(files)
    }

    fn hub_files(model_id: &str) -> Result<ModelFiles, EmbeddingError> {
        let cache_dir = std::env::var("HF_HOME")
            .or_else(|_| std::env::var("HOME").map(|home| format!("{}/.cache/huggingface", home)))
            .unwrap_or_else(|_| "/tmp/huggingface".to_string());

        info!(model_id, cache_dir = %cache_dir, "Resolving embedding model from hub cache");

        let download_err = |e: hf_hub::api::sync::ApiError| EmbeddingError::DownloadFailed {
            model_id: model_id.to_string(),
            reason: e.to_string(),
        };

        let api = ApiBuilder::new()
            .with_cache_dir(cache_dir.into())
            .build()
            .map_err(download_err)?;
        let repo = api.model(model_id.to_string());

        Ok(ModelFiles {
            config: repo.get("config.json").map_err(download_err)?,
            weights: repo.get("model.safetensors").map_err(download_err)?,
            tokenizer: repo.get("tokenizer.json").map_err(download_err)?,
        })
    }

    fn load_model(
        files: &ModelFiles,
        config: &BertEmbedderConfig,
        device: &Device,
    ) -> Result<(BertModel, Tokenizer, usize), EmbeddingError> {
        let config_content = std::fs::read_to_string(&files.config)?;
        let bert_config: Config =
            serde_json::from_str(&config_content).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse config.json: {}", e),
            })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(
                std::slice::from_ref(&files.weights),
                DType::F32,
                device,
            )
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to map weights: {}", e),
        })?;

        // Plain sentence-transformers exports have no prefix; full BERT checkpoints
        // nest under `bert.`.
        let vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb
        };

        let model =
            BertModel::load(vb, &bert_config).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            })?;

        let mut tokenizer =
            load_tokenizer(&files.tokenizer).map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;
        configure_for_batches(&mut tokenizer, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        Ok((model, tokenizer, bert_config.hidden_size))
    }

    fn embed_batch_with_model(
        &self,
        texts: &[&str],
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut type_ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            ids.push(Tensor::new(encoding.get_ids(), device)?);
            type_ids.push(Tensor::new(encoding.get_type_ids(), device)?);
            masks.push(Tensor::new(encoding.get_attention_mask(), device)?);
        }

        let ids = Tensor::stack(&ids, 0)?;
        let type_ids = Tensor::stack(&type_ids, 0)?;
        let mask = Tensor::stack(&masks, 0)?;

        debug!(
            batch = texts.len(),
            seq_len = ids.dim(1)?,
            "Running encoder forward pass"
        );

        // [batch, seq_len, hidden]
        let hidden = model
            .forward(&ids, &type_ids, Some(&mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let pooled = mean_pool(&hidden, &mask)?;
        Ok(l2_normalize(&pooled)?.to_vec2::<f32>()?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }
        embedding
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &BertEmbedderConfig {
        &self.config
    }
}

impl Embedder for BertEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_batch_with_model(texts, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(texts.iter().map(|text| self.embed_stub(text)).collect()),
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Averages token states over the attention mask, ignoring padding.
fn mean_pool(hidden: &Tensor, mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = mask.to_dtype(hidden.dtype())?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?;
    summed.broadcast_div(&counts)
}

/// Scales every row of a `[batch, hidden]` tensor to unit L2 norm.
fn l2_normalize(rows: &Tensor) -> candle_core::Result<Tensor> {
    rows.broadcast_div(&rows.sqr()?.sum_keepdim(1)?.sqrt()?)
}
