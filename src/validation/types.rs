use serde::{Deserialize, Deserializer, Serialize};

/// One answer attached to a logged query. Fields other than `text` are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// One record of the upstream query log.
///
/// Missing or `null` fields deserialize to empty values, which the heuristic then
/// treats as invalid input rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coin: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,
}

impl QueryLogEntry {
    pub fn new(coin: impl Into<String>, query: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            coin: coin.into(),
            query: query.into(),
            answers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Binary outcome of the validity heuristic.
pub enum ValidationStatus {
    Valid,
    Invalid,
}

impl ValidationStatus {
    pub fn from_bool(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which step of the heuristic produced the status.
pub enum DecisionRule {
    /// Coin is the catch-all category.
    GeneralCategory,
    /// Query or answers were empty.
    MissingContent,
    /// Coin appears in an answer text.
    KeywordMatch,
    /// An answer embedding is close enough to the coin embedding.
    SemanticMatch,
    /// Neither signal fired.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
/// Status plus the signals that led to it.
///
/// Signals the heuristic never reached are `None`.
pub struct EntryAssessment {
    pub status: ValidationStatus,
    pub rule: DecisionRule,
    pub coin_in_query: Option<bool>,
    pub coin_in_answers: Option<bool>,
    pub best_similarity: Option<f32>,
}

impl EntryAssessment {
    pub(crate) fn short_circuit(status: ValidationStatus, rule: DecisionRule) -> Self {
        Self {
            status,
            rule,
            coin_in_query: None,
            coin_in_answers: None,
            best_similarity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validated entry, one per input entry in input order.
pub struct ValidationResult {
    pub coin: String,
    pub query: String,
    pub status: ValidationStatus,
    pub answers: Vec<Answer>,
}

impl ValidationResult {
    pub fn new(entry: QueryLogEntry, status: ValidationStatus) -> Self {
        Self {
            coin: entry.coin,
            query: entry.query,
            status,
            answers: entry.answers,
        }
    }

    /// Output cell for the answers column: only the first answer's text survives.
    pub fn answers_cell(&self) -> String {
        let text = self.answers.first().map(|a| a.text.as_str()).unwrap_or("");
        format!("text: {}", text)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
