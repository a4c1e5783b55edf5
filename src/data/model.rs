use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array1, Array2};
use serde::Serialize;

/// Column order of a [`SampleFrame`].
pub const COLUMNS: [&str; 4] = ["feature_1", "feature_2", "category", "target"];

/// The numeric columns fed to the classifiers.
pub const FEATURE_NAMES: [&str; 2] = ["feature_1", "feature_2"];

// ---------------------------------------------------------------------------
// Category – the categorical column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub feature_1: f64,
    pub feature_2: f64,
    pub category: Category,
    /// Binary label, always 0 or 1.
    pub target: usize,
}

// ---------------------------------------------------------------------------
// SampleFrame – the complete generated table
// ---------------------------------------------------------------------------

/// An in-memory table of generated rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleFrame {
    pub records: Vec<Record>,
}

impl SampleFrame {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), COLUMNS.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Feature matrix `[feature_1, feature_2]`, one row per record.
    pub fn features(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.records.len(), FEATURE_NAMES.len()));
        for (mut row, rec) in matrix.rows_mut().into_iter().zip(&self.records) {
            row[0] = rec.feature_1;
            row[1] = rec.feature_2;
        }
        matrix
    }

    pub fn targets(&self) -> Array1<usize> {
        self.records.iter().map(|r| r.target).collect()
    }

    pub fn column_values(&self, column: Feature) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| match column {
                Feature::One => r.feature_1,
                Feature::Two => r.feature_2,
            })
            .collect()
    }

    /// Count of each target label, most frequent first (ties by label).
    pub fn target_counts(&self) -> Vec<(usize, usize)> {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for rec in &self.records {
            *counts.entry(rec.target).or_default() += 1;
        }
        let mut counts: Vec<(usize, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

/// Selector for the numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    One,
    Two,
}

/// Render `[(label, count)]` as `{label: count, ...}`.
pub fn format_counts(counts: &[(usize, usize)]) -> String {
    let body: Vec<String> = counts.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{{}}}", body.join(", "))
}
