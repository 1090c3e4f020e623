//! L2-regularised logistic regression on `linfa-logistic` (L-BFGS).
//!
//! Two classes fit a single binary model; more fit one multinomial model. The
//! intercept is not penalised.
//!
//! `linfa-logistic` has no sample weights, so balanced training cycles each class's
//! rows up to the majority count (see [`balanced_resample`]) and rescales the
//! penalty by the same factor. The minimised objective then matches
//! `0.5 * ||w||^2 + C * sum_i w_c(i) * loss_i` up to a constant.

use linfa::prelude::*;
use linfa_logistic::{
    FittedLogisticRegression, LogisticRegression as BinaryLogistic, MultiFittedLogisticRegression,
    MultiLogisticRegression,
};
use ndarray::{Array1, Axis};
use tracing::debug;

use super::error::ClassifierError;
use super::weights::balanced_resample;
use super::{Classifier, ClassifierKind, check_prediction_input, check_training_input, to_records};

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticConfig {
    /// Inverse regularisation strength.
    pub c: f64,
    pub max_iter: u64,
    /// Stop once the gradient norm drops below this.
    pub tol: f64,
    pub balanced: bool,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
            balanced: true,
        }
    }
}

enum FittedLogistic {
    Binary(FittedLogisticRegression<f64, usize>),
    Multinomial(MultiFittedLogisticRegression<f64, usize>),
}

pub struct LogisticRegression {
    config: LogisticConfig,
    fitted: Option<(usize, FittedLogistic)>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticConfig::default())
    }
}

impl LogisticRegression {
    pub fn new(config: LogisticConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &LogisticConfig {
        &self.config
    }

    /// `Some(true)` when more than two classes were present at fit time.
    pub fn is_multinomial(&self) -> Option<bool> {
        self.fitted
            .as_ref()
            .map(|(_, model)| matches!(model, FittedLogistic::Multinomial(_)))
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::LogisticRegression
    }

    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
    ) -> Result<(), ClassifierError> {
        let n_features = check_training_input(x, y, n_classes)?;

        let mut present = y.to_vec();
        present.sort_unstable();
        present.dedup();
        if present.len() < 2 {
            return Err(ClassifierError::SingleClass {
                found: present.len(),
            });
        }

        let rows: Vec<usize> = if self.config.balanced {
            balanced_resample(y, n_classes)
        } else {
            (0..y.len()).collect()
        };
        let alpha = rows.len() as f64 / (y.len() as f64 * self.config.c);
        debug!(
            rows = rows.len(),
            classes = present.len(),
            alpha,
            "Fitting logistic regression"
        );

        let records = to_records(x, n_features).select(Axis(0), &rows);
        let targets: Array1<usize> = rows.iter().map(|&row| y[row]).collect();
        let dataset = Dataset::new(records, targets);

        let solver_failed = |reason: String| ClassifierError::SolverFailed {
            model: ClassifierKind::LogisticRegression.display_name(),
            reason,
        };
        let model = if present.len() == 2 {
            BinaryLogistic::default()
                .alpha(alpha)
                .max_iterations(self.config.max_iter)
                .gradient_tolerance(self.config.tol)
                .fit(&dataset)
                .map(FittedLogistic::Binary)
                .map_err(|err| solver_failed(err.to_string()))?
        } else {
            MultiLogisticRegression::default()
                .alpha(alpha)
                .max_iterations(self.config.max_iter)
                .gradient_tolerance(self.config.tol)
                .fit(&dataset)
                .map(FittedLogistic::Multinomial)
                .map_err(|err| solver_failed(err.to_string()))?
        };

        self.fitted = Some((n_features, model));
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ClassifierError> {
        let (n_features, model) = self.fitted.as_ref().ok_or(ClassifierError::NotFitted {
            model: ClassifierKind::LogisticRegression.display_name(),
        })?;
        check_prediction_input(x, *n_features)?;

        let records = to_records(x, *n_features);
        let predicted: Array1<usize> = match model {
            FittedLogistic::Binary(model) => model.predict(&records),
            FittedLogistic::Multinomial(model) => model.predict(&records),
        };
        Ok(predicted.to_vec())
    }
}
