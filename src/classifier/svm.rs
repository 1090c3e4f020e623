//! RBF-kernel support vector classifier on `linfa-svm`.
//!
//! Multiclass problems are split one-vs-one, one C-SVC per pair of classes, and the
//! pairwise winners are tallied. Class weighting scales each side's box bound,
//! `C_c = C * w_c`, with the weights taken from the whole training set.

use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Axis};
use tracing::{debug, warn};

use super::error::ClassifierError;
use super::multiclass::OneVsOne;
use super::weights::balanced_class_weights;
use super::{Classifier, ClassifierKind, check_prediction_input, check_training_input, to_records};

/// Rows per binary problem above which the dense kernel matrix gets large.
///
/// The solver holds an `n x n` matrix of `f64`, so this is roughly 800 MB.
pub const DENSE_KERNEL_ROW_LIMIT: usize = 10_000;

/// RBF kernel width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gamma {
    /// `1 / (n_features * Var(X))` over every training cell.
    Scale,
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvmConfig {
    pub c: f64,
    pub gamma: Gamma,
    /// Solver stopping tolerance.
    pub tol: f64,
    pub balanced: bool,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            c: 10.0,
            gamma: Gamma::Scale,
            tol: 1e-3,
            balanced: true,
        }
    }
}

struct FittedSvm {
    gamma: f64,
    n_features: usize,
    ovo: OneVsOne<Svm<f64, bool>>,
}

/// Kernel SVM, one-vs-one over the training classes.
#[derive(Default)]
pub struct SvmClassifier {
    config: SvmConfig,
    fitted: Option<FittedSvm>,
}

impl SvmClassifier {
    pub fn new(config: SvmConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &SvmConfig {
        &self.config
    }

    /// Kernel width chosen at fit time.
    pub fn fitted_gamma(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.gamma)
    }

    /// Number of pairwise machines, `k * (k - 1) / 2` for `k` training classes.
    pub fn n_machines(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.ovo.n_machines())
    }

    /// Support vectors summed over every pairwise machine.
    pub fn n_support(&self) -> usize {
        self.fitted
            .as_ref()
            .map_or(0, |f| f.ovo.machines().map(Svm::nsupport).sum())
    }
}

impl Classifier for SvmClassifier {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Svm
    }

    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
    ) -> Result<(), ClassifierError> {
        let n_features = check_training_input(x, y, n_classes)?;
        let gamma = match self.config.gamma {
            Gamma::Scale => scale_gamma(x, n_features),
            Gamma::Value(g) => g,
        };
        let class_weights = if self.config.balanced {
            balanced_class_weights(y, n_classes)
        } else {
            vec![1.0; n_classes]
        };

        let records = to_records(x, n_features);
        let config = &self.config;
        let ovo = OneVsOne::fit_with(y, n_classes, |low, high, rows| {
            if rows.len() > DENSE_KERNEL_ROW_LIMIT {
                warn!(
                    rows = rows.len(),
                    kernel_bytes = dense_kernel_bytes(rows.len()),
                    "SVM pair exceeds the dense kernel row limit"
                );
            }
            debug!(low, high, rows = rows.len(), gamma, "Fitting pairwise SVM");

            let targets: Array1<bool> = rows.iter().map(|&row| y[row] == high).collect();
            let dataset = Dataset::new(records.select(Axis(0), rows), targets);

            Svm::<f64, bool>::params()
                .pos_neg_weights(
                    config.c * class_weights[high],
                    config.c * class_weights[low],
                )
                .gaussian_kernel(1.0 / gamma)
                .eps(config.tol)
                .fit(&dataset)
                .map_err(|err| ClassifierError::SolverFailed {
                    model: ClassifierKind::Svm.display_name(),
                    reason: err.to_string(),
                })
        })?;

        self.fitted = Some(FittedSvm {
            gamma,
            n_features,
            ovo,
        });
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ClassifierError> {
        let fitted = self.fitted.as_ref().ok_or(ClassifierError::NotFitted {
            model: ClassifierKind::Svm.display_name(),
        })?;
        check_prediction_input(x, fitted.n_features)?;

        let records = to_records(x, fitted.n_features);
        fitted.ovo.predict_with(x.len(), |machine| {
            let verdicts: Array1<bool> = machine.predict(&records);
            Ok(verdicts.to_vec())
        })
    }
}

/// `gamma = "scale"`: `1 / (n_features * Var(X))`, or `1.0` for constant input.
pub(crate) fn scale_gamma(x: &[Vec<f64>], n_features: usize) -> f64 {
    let count = (x.len() * n_features) as f64;
    if count == 0.0 {
        return 1.0;
    }
    let mean = x.iter().flatten().sum::<f64>() / count;
    let var = x.iter().flatten().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    if var > 0.0 {
        1.0 / (n_features as f64 * var)
    } else {
        1.0
    }
}

/// Size of the dense `f64` kernel matrix for `rows` training rows.
pub fn dense_kernel_bytes(rows: usize) -> usize {
    rows.saturating_mul(rows).saturating_mul(std::mem::size_of::<f64>())
}
