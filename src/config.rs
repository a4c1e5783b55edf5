//! Environment-driven configuration for both binaries.
//!
//! Values are read from the process environment (optionally seeded from a
//! `.env` file by the binaries through `dotenvy`). Unparseable values fall back
//! to the default and are reported with a warning.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

// ---------------------------------------------------------------------------
// Demo runner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Seed shared by data generation, the split and the forest.
    pub seed: u64,
    /// Number of synthetic rows.
    pub samples: usize,
    /// Fraction of rows held out for evaluation.
    pub test_size: f64,
    /// Trees in the random forest.
    pub n_estimators: usize,
    /// Where the two-panel PNG is written.
    pub plot_path: PathBuf,
    /// Optional CSV dump of the generated frame.
    pub export_csv: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 100,
            test_size: 0.3,
            n_estimators: 50,
            plot_path: PathBuf::from("demo_plots.png"),
            export_csv: None,
        }
    }
}

impl DemoConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            seed: parse_or(&lookup, "DEMO_SEED", defaults.seed),
            samples: parse_or(&lookup, "DEMO_SAMPLES", defaults.samples),
            test_size: parse_or(&lookup, "DEMO_TEST_SIZE", defaults.test_size),
            n_estimators: parse_or(&lookup, "DEMO_N_ESTIMATORS", defaults.n_estimators),
            plot_path: lookup("DEMO_PLOT_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.plot_path),
            export_csv: lookup("DEMO_EXPORT_CSV")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Smoke-test client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SmokeConfig {
    /// Service root, e.g. `http://localhost:5000` (no trailing slash).
    pub base_url: String,
    /// Skip the "press Enter" gate.
    pub skip_prompt: bool,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_prompt: false,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl SmokeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("SMOKE_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(defaults.base_url);

        Self {
            base_url: normalize_base_url(&base_url),
            skip_prompt: lookup("SMOKE_SKIP_PROMPT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.skip_prompt),
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SMOKE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )),
            read_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SMOKE_READ_TIMEOUT_SECS",
                defaults.read_timeout.as_secs(),
            )),
        }
    }

    /// Apply command-line overrides: `--yes`/`-y` and an optional positional
    /// base URL.
    pub fn apply_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            match arg.as_ref() {
                "--yes" | "-y" => self.skip_prompt = true,
                other if other.starts_with('-') => {
                    log::warn!("ignoring unknown flag {other}");
                }
                url => self.base_url = normalize_base_url(url),
            }
        }
    }

    /// `{base}/api`
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("{key}={raw:?} is not valid, using the default");
                default
            }
        },
        None => default,
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
