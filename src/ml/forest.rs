use std::collections::BTreeMap;

use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DemoError;

// ---------------------------------------------------------------------------
// Random forest – bagged linfa decision trees
// ---------------------------------------------------------------------------

/// Bootstrap-aggregated Gini trees with majority-vote prediction.
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    n_features: usize,
}

impl RandomForest {
    /// Fit `n_estimators` fully grown trees, each on a bootstrap resample of
    /// `x`/`y` drawn from one seeded RNG.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<usize>,
        n_estimators: usize,
        seed: u64,
    ) -> Result<Self, DemoError> {
        let rows = x.nrows();
        if n_estimators == 0 || rows == 0 {
            return Err(DemoError::Fit {
                model: "random forest",
                reason: format!("need at least one tree and one row (got {n_estimators} trees, {rows} rows)"),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_estimators);

        for i in 0..n_estimators {
            let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
            let bootstrap = Dataset::new(x.select(Axis(0), &sample), y.select(Axis(0), &sample));

            let tree = DecisionTree::<f64, usize>::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(None)
                .fit(&bootstrap)
                .map_err(|e| DemoError::Fit {
                    model: "random forest",
                    reason: format!("tree {i}: {e}"),
                })?;
            trees.push(tree);
        }

        log::debug!("fitted {} trees on {rows} rows", trees.len());
        Ok(Self {
            trees,
            n_features: x.ncols(),
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Majority vote over all trees; ties go to the smallest label.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<usize> {
        let votes: Vec<Array1<usize>> = self.trees.iter().map(|t| t.predict(x)).collect();

        (0..x.nrows())
            .map(|row| {
                let mut tally: BTreeMap<usize, usize> = BTreeMap::new();
                for tree_votes in &votes {
                    *tally.entry(tree_votes[row]).or_default() += 1;
                }
                // max_by_key keeps the last maximum, so walk labels in reverse.
                tally
                    .into_iter()
                    .rev()
                    .max_by_key(|(_, count)| *count)
                    .map(|(label, _)| label)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Mean impurity-based importance per feature, normalised to sum to 1.
    ///
    /// All zeros when no tree ever split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (total, value) in totals.iter_mut().zip(tree.feature_importance().iter()) {
                let value: f64 = *value;
                if value.is_finite() {
                    *total += value;
                }
            }
        }

        let sum: f64 = totals.iter().sum();
        if sum <= 0.0 {
            return totals;
        }
        totals.into_iter().map(|t| t / sum).collect()
    }
}

/// Render `{name: 0.1234, ...}` pairs.
pub fn format_importances(names: &[&str], importances: &[f64]) -> String {
    let body: Vec<String> = names
        .iter()
        .zip(importances)
        .map(|(name, value)| format!("{name}: {value:.4}"))
        .collect();
    format!("{{{}}}", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Label depends only on the first column.
    fn first_column_data() -> (Array2<f64>, Array1<usize>) {
        let x = Array2::from_shape_fn((40, 2), |(i, j)| {
            if j == 0 {
                i as f64
            } else {
                ((i * 7) % 5) as f64
            }
        });
        let y = (0..40).map(|i| usize::from(i >= 20)).collect();
        (x, y)
    }

    #[test]
    fn learns_a_threshold() {
        let (x, y) = first_column_data();
        let forest = RandomForest::fit(&x, &y, 15, 42).unwrap();
        assert_eq!(forest.n_estimators(), 15);

        let pred = forest.predict(&array![[2.0, 1.0], [37.0, 1.0]]);
        assert_eq!(pred.to_vec(), vec![0, 1]);
    }

    #[test]
    fn importances_sum_to_one_and_favor_the_signal() {
        let (x, y) = first_column_data();
        let forest = RandomForest::fit(&x, &y, 10, 7).unwrap();
        let importances = forest.feature_importances();

        assert_eq!(importances.len(), 2);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances[0] > importances[1]);
    }

    #[test]
    fn fitting_is_deterministic_per_seed() {
        let (x, y) = first_column_data();
        let a = RandomForest::fit(&x, &y, 5, 3).unwrap();
        let b = RandomForest::fit(&x, &y, 5, 3).unwrap();
        assert_eq!(a.predict(&x), b.predict(&x));
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn zero_trees_is_rejected() {
        let (x, y) = first_column_data();
        assert!(matches!(
            RandomForest::fit(&x, &y, 0, 42),
            Err(DemoError::Fit { .. })
        ));
    }

    #[test]
    fn importances_render_in_feature_order() {
        assert_eq!(
            format_importances(&["feature_1", "feature_2"], &[0.75, 0.25]),
            "{feature_1: 0.7500, feature_2: 0.2500}"
        );
    }
}
