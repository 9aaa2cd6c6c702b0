//! Fixed-interval retry for checks against eventually-consistent state.
//!
//! Some cluster state (a template registered during provisioning, say)
//! converges after the node comes up. Checks on such state are wrapped in a
//! [`RetryPolicy`]: evaluate, and on mismatch or error wait a fixed interval
//! and evaluate again, up to a bounded number of attempts. The first match
//! short-circuits. No jitter, no backoff.
//!
//! Waiting goes through a [`Sleeper`] so tests can run retries instantly.

use crate::assertions::Outcome;
use crate::error::ProbeError;
use std::cell::RefCell;
use std::time::Duration;

/// Something that can block the current thread for a while.
pub trait Sleeper {
    /// Block for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested waits without blocking.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    waits: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

/// Bounded, fixed-interval retry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; never less than 1.
    pub max_attempts: u32,
    /// Wait between consecutive attempts.
    pub wait: Duration,
}

impl RetryPolicy {
    /// Up to `max_attempts` attempts (at least one), `wait` apart.
    pub fn new(max_attempts: u32, wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            wait,
        }
    }

    /// A single attempt, no retry.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Same attempt budget with a different wait.
    pub fn with_wait(self, wait: Duration) -> Self {
        Self { wait, ..self }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// Final outcome of a retried evaluation with the attempt count reached.
#[derive(Debug)]
pub struct Attempted {
    /// Result of the last attempt made.
    pub result: Result<Outcome, ProbeError>,
    /// Attempts made, from 1.
    pub attempts: u32,
}

/// Evaluate `attempt` under `policy`.
///
/// `attempt` receives the 1-based attempt number. On exhaustion the last
/// attempt's result is returned unchanged; callers decide how to report it.
pub fn with_retry<F>(policy: &RetryPolicy, sleeper: &dyn Sleeper, mut attempt: F) -> Attempted
where
    F: FnMut(u32) -> Result<Outcome, ProbeError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut number = 1;

    loop {
        let result = attempt(number);
        let matched = matches!(result, Ok(Outcome::Match(_)));

        if matched || number >= max_attempts {
            return Attempted {
                result,
                attempts: number,
            };
        }

        match &result {
            Ok(outcome) => tracing::warn!(
                "Attempt {}/{} failed: {}; retrying in {:?}",
                number,
                max_attempts,
                outcome.message(),
                policy.wait
            ),
            Err(e) => tracing::warn!(
                "Attempt {}/{} errored: {}; retrying in {:?}",
                number,
                max_attempts,
                e,
                policy.wait
            ),
        }

        sleeper.sleep(policy.wait);
        number += 1;
    }
}
