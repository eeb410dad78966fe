//! Stratified train/test partitioning.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};
use crate::ml::types::Label;

/// Indices of the train and test partitions, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition `labels` so that each class contributes `round(test_size * n)`
/// examples to the test set, keeping at least one of every class for
/// training. Deterministic for a given `seed`.
pub fn stratified_split(labels: &[Label], test_size: f64, seed: u64) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PeltaError::invalid_config(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    if labels.len() < 2 {
        return Err(PeltaError::data(format!(
            "Need at least 2 examples to split, got {}",
            labels.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in Label::ALL {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(idx, _)| idx)
            .collect();
        if indices.is_empty() {
            return Err(PeltaError::data(format!(
                "No '{class}' examples: both classes are required"
            )));
        }

        indices.shuffle(&mut rng);
        let n = indices.len();
        let n_test = ((n as f64 * test_size).round() as usize).min(n - 1);
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}
