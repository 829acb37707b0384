//! Seeded train/test splitting

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::error::MlError;

/// Indices for a train/test partition of `n_rows` rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with a seeded RNG and cut off `test_fraction` for
/// the test set. The same `(n_rows, test_fraction, seed)` triple always
/// yields the same partition.
///
/// # Errors
///
/// Fails when `n_rows` is zero or `test_fraction` lies outside `(0, 1)`.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices, MlError> {
    // One row cannot be partitioned, so treat it like an empty set.
    if n_rows < 2 {
        return Err(MlError::EmptyTrainingSet);
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(MlError::InvalidTestFraction(test_fraction));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    // Keep at least one row on each side of the cut.
    let n_test = ((n_rows as f64 * test_fraction).round() as usize).clamp(1, n_rows - 1);
    let train = indices.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_is_a_partition() {
        let split = train_test_split(100, 0.25, 42).unwrap();
        assert_eq!(split.train.len(), 75);
        assert_eq!(split.test.len(), 25);

        let mut all: Vec<usize> = split
            .train
            .iter()
            .chain(split.test.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let a = train_test_split(50, 0.25, 42).unwrap();
        let b = train_test_split(50, 0.25, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_order() {
        let a = train_test_split(50, 0.25, 42).unwrap();
        let b = train_test_split(50, 0.25, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tiny_dataset_keeps_a_row_on_each_side() {
        let split = train_test_split(2, 0.25, 42).unwrap();
        assert_eq!(split.train.len(), 1);
        assert_eq!(split.test.len(), 1);
    }

    #[test]
    fn rejects_empty_or_single_row_input() {
        assert_eq!(
            train_test_split(0, 0.25, 42).unwrap_err(),
            MlError::EmptyTrainingSet
        );
        assert_eq!(
            train_test_split(1, 0.25, 42).unwrap_err(),
            MlError::EmptyTrainingSet
        );
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        assert!(matches!(
            train_test_split(10, 1.0, 42).unwrap_err(),
            MlError::InvalidTestFraction(_)
        ));
        assert!(matches!(
            train_test_split(10, 0.0, 42).unwrap_err(),
            MlError::InvalidTestFraction(_)
        ));
    }
}
