//! Smoke tests for the companion ML web service.
//!
//! ```text
//!   SmokeConfig ──► ServiceClient (ureq agent)
//!                        │
//!                        ▼
//!                 checks::TEST_GROUPS   six groups, run in order
//!                        │
//!                        ▼
//!                  SuiteSummary         pass/fail per group
//! ```

pub mod checks;
pub mod client;

use std::io::Write;

pub use client::{Reply, ServiceClient};

use checks::{CheckFn, TEST_GROUPS};

const RULE: &str = "============================================================";

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteSummary {
    pub results: Vec<(String, bool)>,
}

impl SuiteSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, ok)| *ok).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True only when at least one group ran and none failed.
    pub fn all_passed(&self) -> bool {
        self.total() > 0 && self.passed() == self.total()
    }

    pub fn percentage(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed() as f64 / self.total() as f64 * 100.0
        }
    }

    pub fn render(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "📊 Test Results Summary:")?;
        writeln!(out, "{RULE}")?;
        for (name, ok) in &self.results {
            let (icon, status) = if *ok { ("✅", "PASS") } else { ("❌", "FAIL") };
            writeln!(out, "{icon} {name}: {status}")?;
        }

        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "📈 Overall Results: {}/{} tests passed ({:.1}%)",
            self.passed(),
            self.total(),
            self.percentage()
        )?;
        if self.all_passed() {
            writeln!(out, "🎉 All tests passed! Web application is ready for deployment.")
        } else {
            writeln!(out, "⚠️  Some tests failed. Please check the web application.")
        }
    }
}

// ---------------------------------------------------------------------------
// Suite runner
// ---------------------------------------------------------------------------

/// Run the standard groups and print the summary.
pub fn run_suite(client: &ServiceClient, out: &mut dyn Write) -> std::io::Result<SuiteSummary> {
    run_groups(client, out, &TEST_GROUPS)
}

/// Run `groups` in order. A group that cannot even write its own output is
/// reported as a failed suite and the next group still runs.
pub fn run_groups(
    client: &ServiceClient,
    out: &mut dyn Write,
    groups: &[(&str, CheckFn)],
) -> std::io::Result<SuiteSummary> {
    writeln!(out, "🧪 Starting Web Application Tests")?;
    writeln!(out, "{RULE}")?;

    let mut summary = SuiteSummary::default();
    for (name, check) in groups {
        writeln!(out)?;
        writeln!(out, "🔬 Testing {name}...")?;
        let ok = match check(client, out) {
            Ok(ok) => ok,
            Err(err) => {
                log::debug!("{name} suite aborted: {err}");
                writeln!(out, "❌ {name} test suite failed: {err}")?;
                false
            }
        };
        summary.results.push((name.to_string(), ok));
    }

    summary.render(out)?;
    Ok(summary)
}
