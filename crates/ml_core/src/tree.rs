//! CART-style classification tree
//!
//! Binary splits on single features chosen by Gini impurity. Leaves store
//! the full class distribution of the rows that reached them, so the tree
//! can answer probability queries, not just argmax labels.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::MlError;

/// A fitted tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    /// Terminal node holding `P(class)` for rows that land here
    Leaf { distribution: Vec<f64> },
    /// Internal node: rows with `feature <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Growth limits and per-split feature sampling for one tree
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    /// Maximum tree depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum rows required to attempt a split
    pub min_samples_split: usize,
    /// Number of candidate features drawn per split
    pub max_features: usize,
}

/// A fitted decision tree over a fixed number of classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
    n_classes: usize,
    n_features: usize,
}

impl DecisionTree {
    /// Fit a tree on the rows named by `indices` (bootstrap sample)
    ///
    /// Caller guarantees `indices` is non-empty and every `y` value is
    /// `< n_classes`; the forest validates this once up front.
    pub(crate) fn fit(
        x: ArrayView2<'_, f64>,
        y: &[usize],
        indices: &[usize],
        n_classes: usize,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut builder = TreeBuilder {
            x,
            y,
            n_classes,
            params,
            rng,
        };
        let root = builder.grow(indices, 0);
        Self {
            root,
            n_classes,
            n_features: x.ncols(),
        }
    }

    /// Class distribution for a single feature row
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
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { distribution } => return Ok(distribution.clone()),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                },
            }
        }
    }

    /// Number of classes the tree distributes probability over
    #[must_use]
    pub const fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of features the tree was fitted on
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }
}

struct TreeBuilder<'a, 'b, 'c> {
    x: ArrayView2<'a, f64>,
    y: &'b [usize],
    n_classes: usize,
    params: TreeParams,
    rng: &'c mut StdRng,
}

impl TreeBuilder<'_, '_, '_> {
    fn grow(&mut self, indices: &[usize], depth: usize) -> Node {
        let counts = self.class_counts(indices);

        let at_depth_limit = self.params.max_depth.is_some_and(|limit| depth >= limit);
        let too_small = indices.len() < self.params.min_samples_split;
        if at_depth_limit || too_small || is_pure(&counts) {
            return leaf(&counts);
        }

        let Some((feature, threshold)) = self.best_split(indices, &counts) else {
            return leaf(&counts);
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.x[[i, feature]] <= threshold);

        // A degenerate partition means the threshold search and the
        // partition disagree on float comparison; fall back to a leaf.
        if left_idx.is_empty() || right_idx.is_empty() {
            return leaf(&counts);
        }

        let left = self.grow(&left_idx, depth + 1);
        let right = self.grow(&right_idx, depth + 1);
        Node::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    /// Find the (feature, threshold) pair minimizing weighted Gini impurity
    /// over a random feature subset. Returns `None` when no split improves
    /// on the parent node.
    fn best_split(&mut self, indices: &[usize], parent_counts: &[usize]) -> Option<(usize, f64)> {
        let n_features = self.x.ncols();
        let k = self.params.max_features.clamp(1, n_features);
        let candidates = rand::seq::index::sample(self.rng, n_features, k);

        let total = indices.len() as f64;
        let parent_gini = gini(parent_counts, indices.len());
        let mut best: Option<(usize, f64, f64)> = None;

        for feature in candidates {
            let mut values: Vec<(f64, usize)> = indices
                .iter()
                .map(|&i| (self.x[[i, feature]], self.y[i]))
                .collect();
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = parent_counts.to_vec();

            for w in 0..values.len() - 1 {
                let (value, class) = values[w];
                left_counts[class] += 1;
                right_counts[class] -= 1;

                let next_value = values[w + 1].0;
                if next_value <= value {
                    continue; // ties cannot form a threshold
                }

                let n_left = w + 1;
                let n_right = values.len() - n_left;
                let weighted = (n_left as f64).mul_add(
                    gini(&left_counts, n_left),
                    (n_right as f64) * gini(&right_counts, n_right),
                ) / total;

                if best.is_none_or(|(_, _, g)| weighted < g) {
                    let threshold = f64::midpoint(value, next_value);
                    best = Some((feature, threshold, weighted));
                }
            }
        }

        // Require a real impurity reduction, otherwise stop growing.
        best.filter(|&(_, _, g)| parent_gini - g > 1e-12)
            .map(|(feature, threshold, _)| (feature, threshold))
    }
}

fn leaf(counts: &[usize]) -> Node {
    let total: usize = counts.iter().sum();
    let distribution = counts
        .iter()
        .map(|&c| {
            if total == 0 {
                0.0
            } else {
                c as f64 / total as f64
            }
        })
        .collect();
    Node::Leaf { distribution }
}

fn is_pure(counts: &[usize]) -> bool {
    counts.iter().filter(|&&c| c > 0).count() <= 1
}

/// Gini impurity of a class-count vector with `total` samples
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    const PARAMS: TreeParams = TreeParams {
        max_depth: None,
        min_samples_split: 2,
        max_features: 2,
    };

    #[test]
    fn gini_of_pure_node_is_zero() {
        assert!(gini(&[5, 0], 5).abs() < f64::EPSILON);
    }

    #[test]
    fn gini_of_even_binary_split_is_half() {
        assert!((gini(&[5, 5], 10) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fits_separable_data_perfectly() {
        // Class 0 in the lower-left corner, class 1 in the upper-right.
        let x = array![
            [0.0, 0.0],
            [0.1, 0.2],
            [0.2, 0.1],
            [5.0, 5.0],
            [5.1, 4.9],
            [4.8, 5.2],
        ];
        let y = [0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, PARAMS, &mut rng);

        for (row, expected) in x.rows().into_iter().zip(y) {
            let proba = tree.predict_proba(row.as_slice().unwrap()).unwrap();
            let argmax = proba
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(argmax, expected);
        }
    }

    #[test]
    fn leaf_distribution_sums_to_one() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = [0, 1, 0, 1];
        let indices: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, PARAMS, &mut rng);
        let proba = tree.predict_proba(&[2.5]).unwrap();
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(proba.len(), 2);
    }

    #[test]
    fn constant_features_yield_single_leaf() {
        let x = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let y = [0, 1, 0];
        let indices: Vec<usize> = (0..3).collect();
        let mut rng = StdRng::seed_from_u64(11);

        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, PARAMS, &mut rng);
        let proba = tree.predict_proba(&[1.0, 1.0]).unwrap();
        // No split is possible, so we get the prior distribution back.
        assert!((proba[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((proba[1] - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn depth_limit_is_honored() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = [0, 1, 0, 1];
        let indices: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(5);

        let params = TreeParams {
            max_depth: Some(0),
            ..PARAMS
        };
        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, params, &mut rng);
        // Depth zero means the root is a leaf with the prior.
        let proba = tree.predict_proba(&[1.0]).unwrap();
        assert!((proba[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn predict_proba_rejects_wrong_width() {
        let x = array![[0.0, 0.0], [5.0, 5.0]];
        let y = [0, 1];
        let indices = vec![0, 1];
        let mut rng = StdRng::seed_from_u64(2);

        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, PARAMS, &mut rng);
        // A deserialized tree can be queried directly, so short rows must
        // error instead of panicking on an out-of-bounds feature index.
        let result = tree.predict_proba(&[1.0]);
        assert!(matches!(
            result.unwrap_err(),
            MlError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn serde_round_trip() {
        let x = array![[0.0], [1.0]];
        let y = [0, 1];
        let indices = vec![0, 1];
        let mut rng = StdRng::seed_from_u64(1);

        let tree = DecisionTree::fit(x.view(), &y, &indices, 2, PARAMS, &mut rng);
        let json = serde_json::to_string(&tree).unwrap();
        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }
}
