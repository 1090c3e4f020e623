use std::collections::BTreeSet;

use super::error::MetricsError;
use super::check_lengths;

/// Counts of actual (rows) against predicted (columns) labels.
///
/// Labels are the sorted union of both sides, so a class that was only ever
/// predicted still gets a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_predictions<A, P>(actual: &[A], predicted: &[P]) -> Result<Self, MetricsError>
    where
        A: AsRef<str>,
        P: AsRef<str>,
    {
        check_lengths(actual.len(), predicted.len())?;

        let labels: Vec<String> = actual
            .iter()
            .map(AsRef::as_ref)
            .chain(predicted.iter().map(AsRef::as_ref))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut counts = vec![vec![0; labels.len()]; labels.len()];
        for (a, p) in actual.iter().zip(predicted) {
            let row = position(&labels, a.as_ref());
            let col = position(&labels, p.as_ref());
            counts[row][col] += 1;
        }

        Ok(Self { labels, counts })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Row-major counts, `counts()[actual][predicted]`.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn get(&self, actual: &str, predicted: &str) -> Option<usize> {
        let row = self.labels.iter().position(|l| l == actual)?;
        let col = self.labels.iter().position(|l| l == predicted)?;
        Some(self.counts[row][col])
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// Number of samples whose actual label is `labels()[idx]`.
    pub fn row_total(&self, idx: usize) -> usize {
        self.counts[idx].iter().sum()
    }

    /// Number of samples predicted as `labels()[idx]`.
    pub fn column_total(&self, idx: usize) -> usize {
        self.counts.iter().map(|row| row[idx]).sum()
    }
}

fn position(labels: &[String], label: &str) -> usize {
    // Every label was inserted above, so the search always succeeds.
    labels
        .binary_search_by(|candidate| candidate.as_str().cmp(label))
        .unwrap_or_else(|idx| idx)
}
