//! Supervised classifiers over dense `f64` feature rows.
//!
//! Labels are class indices (see [`crate::dataset::LabelEncoder`]). The models are
//! thin adapters over linfa: `linfa-svm`, `linfa-logistic` and `linfa-trees`. Every
//! model weights classes inversely to their frequency by default, so minority
//! labels are not drowned out.

pub mod error;
pub mod forest;
pub mod logistic;
mod multiclass;
pub mod svm;
pub mod weights;

#[cfg(test)]
mod tests;

use std::fmt;

use ndarray::Array2;

pub use error::ClassifierError;
pub use forest::{ForestConfig, RandomForest};
pub use logistic::{LogisticConfig, LogisticRegression};
pub use svm::{Gamma, SvmClassifier, SvmConfig};
pub use weights::{balanced_class_weights, balanced_resample, balanced_sample_weights};

pub trait Classifier {
    fn kind(&self) -> ClassifierKind;

    /// Trains on `x` with labels in `0..n_classes`.
    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
    ) -> Result<(), ClassifierError>;

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ClassifierError>;

    fn name(&self) -> &'static str {
        self.kind().display_name()
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn kind(&self) -> ClassifierKind {
        (**self).kind()
    }

    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
    ) -> Result<(), ClassifierError> {
        (**self).fit(x, y, n_classes)
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ClassifierError> {
        (**self).predict(x)
    }
}

/// The three model families trained by the classifier pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifierKind {
    Svm,
    LogisticRegression,
    RandomForest,
}

impl ClassifierKind {
    /// Training and reporting order.
    pub const ALL: [ClassifierKind; 3] = [
        ClassifierKind::Svm,
        ClassifierKind::LogisticRegression,
        ClassifierKind::RandomForest,
    ];

    /// Accepts the snake_case identifiers used in configuration.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svm" => Some(Self::Svm),
            "logistic_regression" | "logreg" => Some(Self::LogisticRegression),
            "random_forest" | "rf" => Some(Self::RandomForest),
            _ => None,
        }
    }

    /// Position in [`ClassifierKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Svm => 0,
            Self::LogisticRegression => 1,
            Self::RandomForest => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svm => "svm",
            Self::LogisticRegression => "logistic_regression",
            Self::RandomForest => "random_forest",
        }
    }

    /// Human-readable name used in reports and plot titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Svm => "SVM",
            Self::LogisticRegression => "Logistic Regression",
            Self::RandomForest => "Random Forest",
        }
    }

    /// Untrained model with the default hyperparameters; `seed` drives the forest.
    pub fn build(self, seed: u64) -> Box<dyn Classifier> {
        match self {
            Self::Svm => Box::new(SvmClassifier::default()),
            Self::LogisticRegression => Box::new(LogisticRegression::default()),
            Self::RandomForest => Box::new(RandomForest::new(ForestConfig {
                seed,
                ..ForestConfig::default()
            })),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returns the feature count shared by every training row.
///
/// Rejects labels outside `0..n_classes`.
pub(crate) fn check_training_input(
    x: &[Vec<f64>],
    y: &[usize],
    n_classes: usize,
) -> Result<usize, ClassifierError> {
    if x.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if x.len() != y.len() {
        return Err(ClassifierError::LengthMismatch {
            rows: x.len(),
            labels: y.len(),
        });
    }
    if let Some(&label) = y.iter().find(|&&label| label >= n_classes) {
        return Err(ClassifierError::LabelOutOfRange { label, n_classes });
    }
    let n_features = x[0].len();
    if let Some(row) = x.iter().find(|row| row.len() != n_features) {
        return Err(ClassifierError::DimensionMismatch {
            expected: n_features,
            got: row.len(),
        });
    }
    Ok(n_features)
}

pub(crate) fn check_prediction_input(
    x: &[Vec<f64>],
    n_features: usize,
) -> Result<(), ClassifierError> {
    match x.iter().find(|row| row.len() != n_features) {
        Some(row) => Err(ClassifierError::DimensionMismatch {
            expected: n_features,
            got: row.len(),
        }),
        None => Ok(()),
    }
}

/// Copies validated rows into a dense `(rows, n_features)` matrix.
pub(crate) fn to_records(x: &[Vec<f64>], n_features: usize) -> Array2<f64> {
    Array2::from_shape_fn((x.len(), n_features), |(row, col)| x[row][col])
}
