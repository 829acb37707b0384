//! Seeded random-forest classifier
//!
//! An ensemble of CART trees fitted on bootstrap samples with per-split
//! feature subsetting. Each tree gets its own RNG seeded from the base
//! seed plus the tree index, so the forest is reproducible and would stay
//! reproducible even if tree construction were parallelized.

use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::error::MlError;
use crate::tree::{DecisionTree, TreeParams};

/// Random-forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth per tree; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum rows required to attempt a split
    pub min_samples_split: usize,
    /// Base RNG seed; tree `t` uses `seed + t`
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// A fitted ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    config: ForestConfig,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Fit a forest on a feature matrix and encoded targets
    ///
    /// # Errors
    ///
    /// Fails when `x` is empty, when `x` and `y` disagree on row count, or
    /// when any target code is `>= n_classes`.
    pub fn fit(
        config: ForestConfig,
        x: &Array2<f64>,
        y: &Array1<usize>,
        n_classes: usize,
    ) -> Result<Self, MlError> {
        let n_rows = x.nrows();
        if n_rows == 0 || config.n_trees == 0 {
            return Err(MlError::EmptyTrainingSet);
        }
        if y.len() != n_rows {
            return Err(MlError::RowCountMismatch {
                x_rows: n_rows,
                y_rows: y.len(),
            });
        }
        if let Some(&code) = y.iter().find(|&&code| code >= n_classes) {
            return Err(MlError::ClassOutOfRange { code, n_classes });
        }

        let y_slice: Vec<usize> = y.iter().copied().collect();
        // sqrt(n_features) candidate features per split, the usual
        // classification default.
        let max_features = ((x.ncols() as f64).sqrt().floor() as usize).max(1);
        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features,
        };

        let mut trees = Vec::with_capacity(config.n_trees);
        for t in 0..config.n_trees {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t as u64));
            let indices: Vec<usize> = (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();
            trees.push(DecisionTree::fit(
                x.view(),
                &y_slice,
                &indices,
                n_classes,
                params,
                &mut rng,
            ));
        }

        Ok(Self {
            trees,
            config,
            n_classes,
            n_features: x.ncols(),
        })
    }

    /// Averaged class distribution for one feature row
    ///
    /// The result has exactly `n_classes` entries and sums to 1 (each leaf
    /// distribution does, and averaging preserves that).
    ///
    /// # Errors
    ///
    /// Fails when the row width differs from the training data.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, MlError> {
        if row.len() != self.n_features {
            return Err(MlError::DimensionMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut sums = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            for (sum, p) in sums.iter_mut().zip(tree.predict_proba(row)?) {
                *sum += p;
            }
        }
        let n = self.trees.len() as f64;
        for sum in &mut sums {
            *sum /= n;
        }
        Ok(sums)
    }

    /// Most probable class code for one feature row
    ///
    /// Ties break toward the lowest class code, which is stable across
    /// runs because the probability vector is deterministic.
    ///
    /// # Errors
    ///
    /// Fails when the row width differs from the training data.
    pub fn predict(&self, row: &[f64]) -> Result<usize, MlError> {
        let proba = self.predict_proba(row)?;
        let code = proba
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(&a.0)))
            .map_or(0, |(i, _)| i);
        Ok(code)
    }

    /// Number of classes the forest predicts over
    #[must_use]
    pub const fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of features per input row
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of fitted trees
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The configuration the forest was fitted with
    #[must_use]
    pub const fn config(&self) -> &ForestConfig {
        &self.config
    }
}
