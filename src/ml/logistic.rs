use linfa::prelude::*;
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2};

use crate::error::DemoError;

const MAX_ITERATIONS: u64 = 100;

/// Binary logistic regression over the split's training rows.
pub struct LogisticModel {
    fitted: FittedLogisticRegression<f64, usize>,
}

impl LogisticModel {
    /// Fit on `x`/`y`. Both labels must be present in `y`.
    pub fn fit(x: &Array2<f64>, y: &Array1<usize>) -> Result<Self, DemoError> {
        let dataset = Dataset::new(x.clone(), y.clone());
        let fitted = LogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)
            .map_err(|e| DemoError::Fit {
                model: "logistic regression",
                reason: e.to_string(),
            })?;
        Ok(Self { fitted })
    }

    pub fn predict(&self, x: &Array2<f64>) -> Array1<usize> {
        self.fitted.predict(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separable_points_are_classified() {
        let x = array![
            [-3.0, -2.5],
            [-2.0, -3.0],
            [-2.5, -2.0],
            [-3.5, -3.0],
            [2.0, 3.0],
            [3.0, 2.5],
            [2.5, 2.0],
            [3.5, 3.0]
        ];
        let y = array![0, 0, 0, 0, 1, 1, 1, 1];
        let model = LogisticModel::fit(&x, &y).unwrap();

        let pred = model.predict(&array![[-3.0, -3.0], [3.0, 3.0]]);
        assert_eq!(pred.to_vec(), vec![0, 1]);
    }

    #[test]
    fn single_class_cannot_be_fitted() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 2.0]];
        let y = array![1, 1, 1];
        assert!(matches!(
            LogisticModel::fit(&x, &y),
            Err(DemoError::Fit { .. })
        ));
    }
}
