//! Check execution.
//!
//! The [`Runner`] walks a registry in order. For each check it evaluates the
//! applicability predicate; inapplicable checks are recorded as skipped.
//! Applicable checks are evaluated (through their retry policy, if any) and
//! every outcome, including errors and panics, becomes a [`CheckResult`].
//! Nothing a single check does can stop the run.

use crate::assertions::{Outcome, Target};
use crate::checks::check::Check;
use crate::checks::registry::CheckRegistry;
use crate::error::ProbeError;
use crate::profile::VariantContext;
use crate::report::{summarize, CheckResult, Report};
use crate::retry::{with_retry, RetryPolicy, Sleeper};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

/// Runs checks against a target.
pub struct Runner<'a> {
    target: Target<'a>,
    sleeper: &'a dyn Sleeper,
    retry_wait: Option<Duration>,
    only: Option<String>,
}

impl<'a> Runner<'a> {
    /// Create a runner that waits between retries with `sleeper`.
    pub fn new(target: Target<'a>, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            target,
            sleeper,
            retry_wait: None,
            only: None,
        }
    }

    /// Replace the wait of every retry policy.
    pub fn with_retry_wait(mut self, wait: Option<Duration>) -> Self {
        self.retry_wait = wait;
        self
    }

    /// Run only checks whose description contains `filter`.
    pub fn with_only(mut self, filter: Option<String>) -> Self {
        self.only = filter;
        self
    }

    /// Run every registered check and summarize the results.
    pub fn run(&self, registry: &CheckRegistry, ctx: &VariantContext) -> Report {
        tracing::info!("Running {} checks", registry.len());

        let results = registry
            .iter()
            .map(|check| self.run_check(check, ctx))
            .collect();
        let (report, exit) = summarize(results);

        let summary = report.summary();
        tracing::info!(
            "Finished: {} passed, {} failed, {} errors, {} skipped (exit {})",
            summary.passed,
            summary.failed,
            summary.errors,
            summary.skipped,
            exit
        );
        report
    }

    /// Evaluate one check, converting every outcome into a result.
    ///
    /// A retried check whose last attempt mismatched is `fail`; one whose
    /// last attempt could not observe the node at all (transport error,
    /// panic) stays `error`, so a broken check is never reported as a wrong
    /// node. Both carry the attempts made and count against the exit code.
    pub fn run_check(&self, check: &Check, ctx: &VariantContext) -> CheckResult {
        let description = check.description();

        if let Some(filter) = &self.only {
            if !description.contains(filter.as_str()) {
                return CheckResult::skipped(description, format!("filtered by '{}'", filter));
            }
        }

        if !check.applies_to(ctx) {
            tracing::debug!("Skipping '{}'", description);
            return CheckResult::skipped(description, check.applicability().requirement());
        }

        let policy = self.policy_for(check);
        tracing::debug!(
            "Evaluating '{}' (up to {} attempts)",
            description,
            policy.max_attempts
        );

        let attempted = with_retry(&policy, self.sleeper, |_| {
            catch_unwind(AssertUnwindSafe(|| check.assertion().evaluate(&self.target)))
                .unwrap_or_else(|panic| {
                    Err(ProbeError::Panicked {
                        message: panic_message(panic.as_ref()),
                    })
                })
        });

        let result = match attempted.result {
            Ok(Outcome::Match(msg)) => CheckResult::pass(description, msg, attempted.attempts),
            Ok(Outcome::Mismatch(msg)) => CheckResult::fail(description, msg, attempted.attempts),
            Err(e) => CheckResult::error(description, e.to_string(), attempted.attempts),
        };

        if result.status.is_failure() {
            tracing::warn!("'{}' {}: {}", description, result.status, result.message);
        }
        result
    }

    fn policy_for(&self, check: &Check) -> RetryPolicy {
        match (check.retry(), self.retry_wait) {
            (Some(policy), Some(wait)) => policy.with_wait(wait),
            (Some(policy), None) => *policy,
            (None, _) => RetryPolicy::once(),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
