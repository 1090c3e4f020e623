use tracing::debug;

use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, GENERAL_CRYPTO_CATEGORY};
use crate::embedding::{Embedder, cosine_scores};

use super::error::ValidationError;
use super::types::{DecisionRule, EntryAssessment, QueryLogEntry, ValidationStatus};

/// Keyword + embedding validity check for query-log entries.
///
/// Rules, first match wins:
/// 1. coin is the general category: valid
/// 2. empty query or no answers: invalid
/// 3. coin occurs in an answer text, or an answer embeds within `threshold` of the coin: valid
/// 4. otherwise invalid
///
/// Whether the coin occurs in the query is recorded but never changes the outcome.
pub struct Validator<E> {
    embedder: E,
    threshold: f32,
}

impl<E: Embedder> std::fmt::Debug for Validator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("embedding_dim", &self.embedder.dimension())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl<E: Embedder> Validator<E> {
    pub fn new(embedder: E, threshold: f32) -> Self {
        Self {
            embedder,
            threshold,
        }
    }

    pub fn with_default_threshold(embedder: E) -> Self {
        Self::new(embedder, DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns the status for one entry.
    pub fn validate(&self, entry: &QueryLogEntry) -> Result<ValidationStatus, ValidationError> {
        Ok(self.assess(entry)?.status)
    }

    /// Returns the status together with the signals behind it.
    pub fn assess(&self, entry: &QueryLogEntry) -> Result<EntryAssessment, ValidationError> {
        let coin = entry.coin.to_lowercase();

        if coin == GENERAL_CRYPTO_CATEGORY {
            return Ok(EntryAssessment::short_circuit(
                ValidationStatus::Valid,
                DecisionRule::GeneralCategory,
            ));
        }

        if entry.query.is_empty() || entry.answers.is_empty() {
            return Ok(EntryAssessment::short_circuit(
                ValidationStatus::Invalid,
                DecisionRule::MissingContent,
            ));
        }

        let coin_in_query = entry.query.to_lowercase().contains(&coin);
        let coin_in_answers = entry
            .answers
            .iter()
            .any(|answer| answer.text.to_lowercase().contains(&coin));

        // The keyword hit already decides the entry; skip the model in that case.
        let best_similarity = if coin_in_answers {
            None
        } else {
            Some(self.best_similarity(&coin, entry)?)
        };
        let similarity_valid = best_similarity.is_some_and(|score| score >= self.threshold);

        let rule = if coin_in_answers {
            DecisionRule::KeywordMatch
        } else if similarity_valid {
            DecisionRule::SemanticMatch
        } else {
            DecisionRule::NoMatch
        };
        let status = ValidationStatus::from_bool(coin_in_answers || similarity_valid);

        debug!(
            coin = %entry.coin,
            coin_in_query,
            coin_in_answers,
            best_similarity,
            status = %status,
            "Assessed entry"
        );

        Ok(EntryAssessment {
            status,
            rule,
            coin_in_query: Some(coin_in_query),
            coin_in_answers: Some(coin_in_answers),
            best_similarity,
        })
    }

    fn best_similarity(&self, coin: &str, entry: &QueryLogEntry) -> Result<f32, ValidationError> {
        let mut texts: Vec<&str> = Vec::with_capacity(entry.answers.len() + 1);
        texts.push(coin);
        texts.extend(entry.answers.iter().map(|answer| answer.text.as_str()));

        let mut embeddings = self.embedder.embed_batch(&texts)?;
        if embeddings.len() != texts.len() {
            return Err(ValidationError::EmbeddingCountMismatch {
                expected: texts.len(),
                got: embeddings.len(),
            });
        }

        let answer_embeddings = embeddings.split_off(1);
        let coin_embedding = &embeddings[0];

        Ok(cosine_scores(coin_embedding, &answer_embeddings)
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max))
    }
}
