//! Sentence embeddings used by the semantic half of the validity check.
//!
//! - [`Embedder`] is the seam the validator depends on; callers construct an
//!   embedder once and hand it to [`Validator`](crate::validation::Validator).
//! - [`bert`] provides the candle-backed implementation.

/// BERT sentence embedder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Cosine similarity helpers.
pub mod similarity;
/// Tokenizer loading helpers.
pub mod utils;

pub use bert::{BertEmbedder, BertEmbedderConfig};
pub use error::EmbeddingError;
pub use similarity::{cosine_scores, cosine_similarity};

/// Produces fixed-size embedding vectors for text.
pub trait Embedder {
    /// Embeds every text, returning one vector per input in input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Output vector dimension.
    fn dimension(&self) -> usize;

    /// Embeds a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "embedder returned no vector".to_string(),
            })
    }
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }
}
