//! Pre-vectorized training data: CSV loading, label encoding and the seeded split.

pub mod error;
pub mod labels;
pub mod loader;
pub mod split;

#[cfg(test)]
mod tests;

pub use error::DatasetError;
pub use labels::LabelEncoder;
pub use loader::VectorizedDataset;
pub use split::{TrainTestSplit, train_test_split};
