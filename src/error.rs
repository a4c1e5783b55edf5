use thiserror::Error;

// ---------------------------------------------------------------------------
// Demo runner errors
// ---------------------------------------------------------------------------

/// Anything that can make a single demo step fail.
///
/// The runner never propagates these past the step that raised them; they are
/// printed next to a failure marker and the next step runs.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("cannot split {rows} rows with test_size={test_size}")]
    InvalidSplit { rows: usize, test_size: f64 },

    #[error("{model} failed to fit: {reason}")]
    Fit { model: &'static str, reason: String },

    #[error("input length mismatch: {expected} targets vs {actual} predictions")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error("built without the `{0}` feature")]
    FeatureDisabled(&'static str),

    #[error("{0} is unavailable (an earlier step failed)")]
    Unavailable(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Smoke-test client errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SmokeError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("{0}")]
    Transport(String),

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{field}' is not {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
