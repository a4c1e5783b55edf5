use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{Category, Record, SampleFrame};

// ---------------------------------------------------------------------------
// Column distributions
// ---------------------------------------------------------------------------

const FEATURE_1_MEAN: f64 = 0.0;
const FEATURE_1_STD: f64 = 1.0;
const FEATURE_2_MEAN: f64 = 2.0;
const FEATURE_2_STD: f64 = 1.5;

/// Box-Muller transform for a normal draw.
fn gauss<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.gen::<f64>().max(1e-15);
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

// ---------------------------------------------------------------------------
// Frame generation
// ---------------------------------------------------------------------------

/// Generate `samples` rows deterministically from `seed`.
///
/// Columns are drawn one after another (all of `feature_1`, then all of
/// `feature_2`, ...), so growing one column's distribution never perturbs the
/// draws of the columns before it.
pub fn generate_frame(samples: usize, seed: u64) -> SampleFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let feature_1: Vec<f64> = (0..samples)
        .map(|_| gauss(&mut rng, FEATURE_1_MEAN, FEATURE_1_STD))
        .collect();
    let feature_2: Vec<f64> = (0..samples)
        .map(|_| gauss(&mut rng, FEATURE_2_MEAN, FEATURE_2_STD))
        .collect();
    let category: Vec<Category> = (0..samples)
        .map(|_| Category::ALL[rng.gen_range(0..Category::ALL.len())])
        .collect();
    let target: Vec<usize> = (0..samples).map(|_| rng.gen_range(0..2)).collect();

    let records = feature_1
        .into_iter()
        .zip(feature_2)
        .zip(category)
        .zip(target)
        .map(|(((feature_1, feature_2), category), target)| Record {
            feature_1,
            feature_2,
            category,
            target,
        })
        .collect();

    log::debug!("generated {samples} rows with seed {seed}");
    SampleFrame::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Feature;

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn std_dev(values: &[f64]) -> f64 {
        let m = mean(values);
        (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
    }

    #[test]
    fn same_seed_same_frame() {
        assert_eq!(generate_frame(50, 42), generate_frame(50, 42));
        assert_ne!(generate_frame(50, 42), generate_frame(50, 43));
    }

    #[test]
    fn labels_stay_in_range() {
        let frame = generate_frame(500, 1);
        assert_eq!(frame.len(), 500);
        assert!(frame.records.iter().all(|r| r.target <= 1));
        for cat in Category::ALL {
            assert!(frame.records.iter().any(|r| r.category == cat));
        }
    }

    #[test]
    fn feature_moments_roughly_match() {
        let frame = generate_frame(5000, 7);
        let f1 = frame.column_values(Feature::One);
        let f2 = frame.column_values(Feature::Two);
        assert!(mean(&f1).abs() < 0.1);
        assert!((std_dev(&f1) - 1.0).abs() < 0.1);
        assert!((mean(&f2) - 2.0).abs() < 0.15);
        assert!((std_dev(&f2) - 1.5).abs() < 0.15);
    }

    #[test]
    fn zero_samples_is_empty() {
        assert!(generate_frame(0, 42).is_empty());
    }
}
