//! One-vs-one reduction for the kernel SVM.

use super::error::ClassifierError;

/// One binary machine per pair of classes present at fit time.
///
/// Each machine answers `true` for the higher class of its pair. Prediction tallies
/// the pairwise wins and ties resolve to the lowest class index.
pub(crate) struct OneVsOne<M> {
    n_classes: usize,
    machines: Vec<(usize, usize, M)>,
}

impl<M> OneVsOne<M> {
    /// Trains every pair; `train` receives `(low, high, rows)` where `rows` holds the
    /// training indices labelled `low` or `high`.
    pub(crate) fn fit_with<F>(
        y: &[usize],
        n_classes: usize,
        mut train: F,
    ) -> Result<Self, ClassifierError>
    where
        F: FnMut(usize, usize, &[usize]) -> Result<M, ClassifierError>,
    {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (row, &label) in y.iter().enumerate() {
            members[label].push(row);
        }
        let classes: Vec<usize> = (0..n_classes).filter(|&c| !members[c].is_empty()).collect();
        if classes.len() < 2 {
            return Err(ClassifierError::SingleClass {
                found: classes.len(),
            });
        }

        let mut machines = Vec::with_capacity(classes.len() * (classes.len() - 1) / 2);
        for (pos, &low) in classes.iter().enumerate() {
            for &high in &classes[pos + 1..] {
                let mut rows: Vec<usize> = members[low]
                    .iter()
                    .chain(&members[high])
                    .copied()
                    .collect();
                rows.sort_unstable();
                machines.push((low, high, train(low, high, &rows)?));
            }
        }

        Ok(Self {
            n_classes,
            machines,
        })
    }

    /// Majority vote over the machines. `decide` returns one verdict per sample,
    /// `true` meaning the higher class of the pair.
    pub(crate) fn predict_with<F>(
        &self,
        n_samples: usize,
        mut decide: F,
    ) -> Result<Vec<usize>, ClassifierError>
    where
        F: FnMut(&M) -> Result<Vec<bool>, ClassifierError>,
    {
        let mut votes = vec![vec![0usize; self.n_classes]; n_samples];
        for (low, high, machine) in &self.machines {
            for (tally, high_wins) in votes.iter_mut().zip(decide(machine)?) {
                tally[if high_wins { *high } else { *low }] += 1;
            }
        }
        Ok(votes.iter().map(|tally| first_max(tally)).collect())
    }

    pub(crate) fn machines(&self) -> impl Iterator<Item = &M> {
        self.machines.iter().map(|(_, _, machine)| machine)
    }

    pub(crate) fn n_machines(&self) -> usize {
        self.machines.len()
    }
}

/// Index of the largest count; the earliest wins a tie.
pub(crate) fn first_max(counts: &[usize]) -> usize {
    let mut best = 0;
    for (idx, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = idx;
        }
    }
    best
}
