//! Bagged ensemble of `linfa-trees` Gini trees.
//!
//! Every tree sees a bootstrap draw of the training rows; a row drawn `k` times
//! enters its tree once with `k` folded into its sample weight, alongside the
//! balanced class weight. Trees vote and ties resolve to the lowest class index.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::error::ClassifierError;
use super::multiclass::first_max;
use super::weights::balanced_class_weights;
use super::{Classifier, ClassifierKind, check_prediction_input, check_training_input, to_records};

#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    /// Smallest impurity drop a split must achieve.
    pub min_impurity_decrease: f64,
    pub bootstrap: bool,
    pub balanced: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_impurity_decrease: 1e-7,
            bootstrap: true,
            balanced: true,
            seed: crate::constants::DEFAULT_RANDOM_SEED,
        }
    }
}

pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree<f64, usize>>,
    n_features: usize,
    n_classes: usize,
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
            n_classes: 0,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Share of trees voting for each class, one row per sample.
    pub fn vote_shares(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        let votes = self.votes(x)?;
        let n = self.trees.len() as f64;
        Ok(votes
            .into_iter()
            .map(|tally| tally.into_iter().map(|v| v as f64 / n).collect())
            .collect())
    }

    fn votes(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<usize>>, ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::NotFitted {
                model: ClassifierKind::RandomForest.display_name(),
            });
        }
        check_prediction_input(x, self.n_features)?;

        let records = to_records(x, self.n_features);
        let mut votes = vec![vec![0usize; self.n_classes]; x.len()];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&records);
            for (tally, &class) in votes.iter_mut().zip(predicted.iter()) {
                tally[class] += 1;
            }
        }
        Ok(votes)
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::RandomForest
    }

    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
    ) -> Result<(), ClassifierError> {
        let n_features = check_training_input(x, y, n_classes)?;

        let class_weights = if self.config.balanced {
            balanced_class_weights(y, n_classes)
        } else {
            vec![1.0; n_classes]
        };
        let records = to_records(x, n_features);
        let params = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(self.config.max_depth)
            .min_weight_split(0.0)
            .min_weight_leaf(0.0)
            .min_impurity_decrease(self.config.min_impurity_decrease);

        let mut master = StdRng::seed_from_u64(self.config.seed);
        let n = x.len();
        let mut trees = Vec::with_capacity(self.config.n_estimators);

        for _ in 0..self.config.n_estimators {
            let mut rng = StdRng::seed_from_u64(master.random());
            let counts: Vec<f64> = if self.config.bootstrap {
                let mut counts = vec![0.0; n];
                for _ in 0..n {
                    counts[rng.random_range(0..n)] += 1.0;
                }
                counts
            } else {
                vec![1.0; n]
            };

            let rows: Vec<usize> = (0..n).filter(|&row| counts[row] > 0.0).collect();
            let targets: Array1<usize> = rows.iter().map(|&row| y[row]).collect();
            let weights: Array1<f32> = rows
                .iter()
                .map(|&row| (counts[row] * class_weights[y[row]]) as f32)
                .collect();
            let dataset =
                Dataset::new(records.select(Axis(0), &rows), targets).with_weights(weights);

            let tree = params.fit(&dataset).map_err(|err| ClassifierError::SolverFailed {
                model: ClassifierKind::RandomForest.display_name(),
                reason: err.to_string(),
            })?;
            trees.push(tree);
        }

        debug!(trees = trees.len(), n_features, "Random forest grown");

        self.trees = trees;
        self.n_features = n_features;
        self.n_classes = n_classes;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>, ClassifierError> {
        Ok(self.votes(x)?.iter().map(|tally| first_max(tally)).collect())
    }
}
