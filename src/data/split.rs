use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::DemoError;

/// Train/test partition of a feature matrix and its targets.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<usize>,
    pub y_test: Array1<usize>,
}

impl TrainTestSplit {
    pub fn train_len(&self) -> usize {
        self.x_train.nrows()
    }

    pub fn test_len(&self) -> usize {
        self.x_test.nrows()
    }
}

/// Number of held-out rows: `ceil(rows * test_size)`.
pub fn test_rows(rows: usize, test_size: f64) -> usize {
    (rows as f64 * test_size).ceil() as usize
}

/// Shuffle row indices with `seed` and hold out `ceil(rows * test_size)` rows.
///
/// Both partitions must be non-empty.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<usize>,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, DemoError> {
    let rows = x.nrows();
    let invalid = DemoError::InvalidSplit { rows, test_size };

    if y.len() != rows {
        return Err(DemoError::LengthMismatch {
            expected: rows,
            actual: y.len(),
        });
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(invalid);
    }
    let n_test = test_rows(rows, test_size);
    if n_test == 0 || n_test >= rows {
        return Err(invalid);
    }

    let mut indices: Vec<usize> = (0..rows).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}
