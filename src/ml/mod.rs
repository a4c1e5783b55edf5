//! Classifiers and evaluation.
//!
//! Fitting is delegated to `linfa`: `linfa-logistic` for the logistic
//! regression, `linfa-trees` for the trees the random forest bags together.

pub mod forest;
pub mod logistic;
pub mod metrics;

pub use forest::RandomForest;
pub use logistic::LogisticModel;
pub use metrics::{accuracy, ClassificationReport};
