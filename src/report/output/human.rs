//! Human-readable output formatter.
//!
//! One line per check with a status marker, the failure or skip reason
//! indented underneath, and a summary line at the end.

use super::ReportFormatter;
use crate::report::theme::ReportTheme;
use crate::report::{CheckResult, CheckStatus, Report};
use std::io::Write;

/// Formats a report for terminal display.
pub struct HumanFormatter {
    theme: ReportTheme,
    /// Also print what was observed for passing checks.
    pub verbose: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            theme: if use_color {
                ReportTheme::new()
            } else {
                ReportTheme::plain()
            },
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn headline(result: &CheckResult) -> String {
        if result.attempts > 1 {
            format!("{} ({} attempts)", result.description, result.attempts)
        } else {
            result.description.clone()
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        for result in report.results() {
            let headline = Self::headline(result);
            let (line, show_detail) = match result.status {
                CheckStatus::Pass => (self.theme.format_pass(&headline), self.verbose),
                CheckStatus::Fail => (self.theme.format_fail(&headline), true),
                CheckStatus::Error => (self.theme.format_error(&headline), true),
                CheckStatus::Skipped => (self.theme.format_skipped(&headline), self.verbose),
            };
            writeln!(writer, "{}", line)?;
            if show_detail && !result.message.is_empty() {
                writeln!(writer, "{}", self.theme.format_detail(&result.message))?;
            }
        }

        let summary = report.summary();
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.theme.highlight.apply_to(format!(
                "{} checks: {} passed, {} failed, {} error(s), {} skipped",
                summary.total, summary.passed, summary.failed, summary.errors, summary.skipped
            ))
        )?;

        Ok(())
    }
}
