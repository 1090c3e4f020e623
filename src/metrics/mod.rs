//! Scoring of predicted labels against the held-out truth.

pub mod confusion;
pub mod error;
pub mod report;

#[cfg(test)]
mod tests;

pub use confusion::ConfusionMatrix;
pub use error::MetricsError;
pub use report::{AverageMetrics, ClassMetrics, ClassificationReport};

/// Fraction of positions where the prediction equals the actual label.
pub fn accuracy<A, P>(actual: &[A], predicted: &[P]) -> Result<f64, MetricsError>
where
    A: AsRef<str>,
    P: AsRef<str>,
{
    check_lengths(actual.len(), predicted.len())?;
    if actual.is_empty() {
        return Err(MetricsError::Empty);
    }
    let correct = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a.as_ref() == p.as_ref())
        .count();
    Ok(correct as f64 / actual.len() as f64)
}

pub(crate) fn check_lengths(actual: usize, predicted: usize) -> Result<(), MetricsError> {
    if actual != predicted {
        return Err(MetricsError::LengthMismatch { actual, predicted });
    }
    Ok(())
}
