use std::fmt;

use super::confusion::ConfusionMatrix;
use super::error::MetricsError;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision, recall and F1 with accuracy and macro/weighted averages.
///
/// Undefined ratios (no predictions or no support for a class) count as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    classes: Vec<ClassMetrics>,
    accuracy: f64,
    macro_avg: AverageMetrics,
    weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    pub fn from_predictions<A, P>(actual: &[A], predicted: &[P]) -> Result<Self, MetricsError>
    where
        A: AsRef<str>,
        P: AsRef<str>,
    {
        let matrix = ConfusionMatrix::from_predictions(actual, predicted)?;
        Self::from_confusion(&matrix)
    }

    pub fn from_confusion(matrix: &ConfusionMatrix) -> Result<Self, MetricsError> {
        let total = matrix.total();
        if total == 0 {
            return Err(MetricsError::Empty);
        }

        let classes: Vec<ClassMetrics> = matrix
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let tp = matrix.counts()[idx][idx] as f64;
                let support = matrix.row_total(idx);
                let precision = ratio(tp, matrix.column_total(idx) as f64);
                let recall = ratio(tp, support as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let n = classes.len() as f64;
        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
            support: total,
        };

        let weighted = |f: fn(&ClassMetrics) -> f64| {
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / total as f64
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
            support: total,
        };

        Ok(Self {
            accuracy: matrix.correct() as f64 / total as f64,
            classes,
            macro_avg,
            weighted_avg,
        })
    }

    pub fn classes(&self) -> &[ClassMetrics] {
        &self.classes
    }

    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn macro_avg(&self) -> &AverageMetrics {
        &self.macro_avg
    }

    pub fn weighted_avg(&self) -> &AverageMetrics {
        &self.weighted_avg
    }

    pub fn support(&self) -> usize {
        self.weighted_avg.support
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

const WEIGHTED_AVG: &str = "weighted avg";

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(WEIGHTED_AVG.len());

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), (WEIGHTED_AVG, &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, avg.support
            )?;
        }
        Ok(())
    }
}
