use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::error::DatasetError;

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded shuffle split without stratification.
///
/// `ceil(test_size * n_rows)` rows go to the test side; both sides must end up
/// non-empty. The same seed always yields the same partition.
pub fn train_test_split(
    n_rows: usize,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, DatasetError> {
    let n_test = (test_size * n_rows as f64).ceil() as usize;
    if !(test_size > 0.0 && test_size < 1.0) || n_test == 0 || n_test >= n_rows {
        return Err(DatasetError::SplitTooSmall {
            rows: n_rows,
            test_size,
        });
    }

    let mut permutation: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    let test = permutation;

    debug!(
        train = train.len(),
        test = test.len(),
        seed,
        "Dataset split"
    );

    Ok(TrainTestSplit { train, test })
}
