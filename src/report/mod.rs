//! Check results and the run report.
//!
//! The runner produces one [`CheckResult`] per registered check, in
//! registration order. [`summarize`] turns them into an immutable [`Report`]
//! plus the exit signal: zero iff no executed check failed or errored.
//! Skipped checks are counted on their own and never affect the signal.
//!
//! # Example
//!
//! ```
//! use nodeverify::report::{summarize, CheckResult};
//!
//! let (report, exit) = summarize(vec![
//!     CheckResult::pass("port 9200 is listening", "port 9200 is listening", 1),
//!     CheckResult::skipped("x-pack plugin directory", "requires legacy major version"),
//! ]);
//! assert_eq!(exit, 0);
//! assert_eq!(report.summary().skipped, 1);
//! ```

pub mod output;
pub mod theme;

pub use output::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};
pub use theme::{should_use_colors, ReportTheme};

use serde::Serialize;
use std::fmt;

/// Exit code when every executed check passed.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when any check failed or errored.
pub const EXIT_CHECKS_FAILED: i32 = 1;
/// Exit code for a fatal profile or suite error.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Status of one check in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Evaluated and matched.
    Pass,
    /// Evaluated and mismatched, including exhausted retries.
    Fail,
    /// Could not be evaluated (transport failure, unreadable file).
    Error,
    /// Not applicable to this variant; never evaluated.
    Skipped,
}

impl CheckStatus {
    /// Whether this status makes the run fail.
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Fail | CheckStatus::Error)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Error => write!(f, "error"),
            CheckStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// The check's description.
    pub description: String,
    pub status: CheckStatus,
    /// What was observed, the mismatch, the error, or why it was skipped.
    pub message: String,
    /// Attempts made; 0 for skipped checks.
    pub attempts: u32,
}

impl CheckResult {
    pub fn pass(description: impl Into<String>, message: impl Into<String>, attempts: u32) -> Self {
        Self::new(description, CheckStatus::Pass, message, attempts)
    }

    pub fn fail(description: impl Into<String>, message: impl Into<String>, attempts: u32) -> Self {
        Self::new(description, CheckStatus::Fail, message, attempts)
    }

    pub fn error(description: impl Into<String>, message: impl Into<String>, attempts: u32) -> Self {
        Self::new(description, CheckStatus::Error, message, attempts)
    }

    pub fn skipped(description: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(description, CheckStatus::Skipped, reason, 0)
    }

    fn new(
        description: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
        attempts: u32,
    ) -> Self {
        Self {
            description: description.into(),
            status,
            message: message.into(),
            attempts,
        }
    }
}

/// Counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            total: results.len(),
            passed: count(CheckStatus::Pass),
            failed: count(CheckStatus::Fail),
            errors: count(CheckStatus::Error),
            skipped: count(CheckStatus::Skipped),
        }
    }

    /// Checks that were actually evaluated.
    pub fn executed(&self) -> usize {
        self.total - self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// The complete, ordered outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    results: Vec<CheckResult>,
    summary: Summary,
}

impl Report {
    /// Results in registration order, skipped checks included.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Results with a given status, in order.
    pub fn with_status(&self, status: CheckStatus) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(move |r| r.status == status)
    }

    /// Look up a result by check description.
    pub fn get(&self, description: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.description == description)
    }

    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }

    /// Process exit code for this report.
    pub fn exit_signal(&self) -> i32 {
        if self.is_success() {
            EXIT_SUCCESS
        } else {
            EXIT_CHECKS_FAILED
        }
    }
}

/// Build the report and its exit signal.
pub fn summarize(results: Vec<CheckResult>) -> (Report, i32) {
    let summary = Summary::from_results(&results);
    let report = Report { results, summary };
    let exit = report.exit_signal();
    (report, exit)
}
