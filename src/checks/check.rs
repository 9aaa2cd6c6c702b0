//! Check definitions.
//!
//! A [`Check`] pairs an [`Assertion`] with an [`Applicability`] predicate
//! and an optional [`RetryPolicy`]. Whether a check applies is decided by
//! the runner before the assertion runs, so assertion bodies never branch
//! on the profile.

use crate::assertions::Assertion;
use crate::profile::{MajorVersion, OsFamily, VariantContext};
use crate::retry::RetryPolicy;

/// When a check is relevant to a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Applicability {
    /// Every variant.
    #[default]
    Always,
    /// Only this major-version class.
    MajorVersion(MajorVersion),
    /// Only hosts whose OS family is one of these.
    OsFamilyIn(Vec<OsFamily>),
    /// Every inner predicate holds.
    All(Vec<Applicability>),
}

impl Applicability {
    /// Only the legacy major version.
    pub fn legacy() -> Self {
        Self::MajorVersion(MajorVersion::Legacy)
    }

    /// Only the current major version.
    pub fn current() -> Self {
        Self::MajorVersion(MajorVersion::Current)
    }

    /// Evaluate against a variant. Pure.
    pub fn applies(&self, ctx: &VariantContext) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::MajorVersion(major) => ctx.profile().major_version == *major,
            Applicability::OsFamilyIn(families) => ctx.os_family_in(families),
            Applicability::All(inner) => inner.iter().all(|a| a.applies(ctx)),
        }
    }

    /// Why a check with this predicate would be skipped.
    pub fn requirement(&self) -> String {
        match self {
            Applicability::Always => "always applies".to_string(),
            Applicability::MajorVersion(major) => format!("requires {} major version", major),
            Applicability::OsFamilyIn(families) => format!(
                "requires OS family {}",
                families
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(" or ")
            ),
            Applicability::All(inner) => inner
                .iter()
                .map(|a| a.requirement())
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

/// One independently evaluable expectation about the target host.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    description: String,
    applicability: Applicability,
    assertion: Assertion,
    retry: Option<RetryPolicy>,
}

impl Check {
    /// A check that always applies and runs once.
    pub fn new(description: impl Into<String>, assertion: Assertion) -> Self {
        Self {
            description: description.into(),
            applicability: Applicability::Always,
            assertion,
            retry: None,
        }
    }

    /// Restrict the check to variants matching `applicability`.
    pub fn when(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    /// Retry the assertion under `policy`.
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Get the description, unique within a registry.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the applicability predicate.
    pub fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    /// Get the assertion.
    pub fn assertion(&self) -> &Assertion {
        &self.assertion
    }

    /// Get the retry policy, if the check is retried.
    pub fn retry(&self) -> Option<&RetryPolicy> {
        self.retry.as_ref()
    }

    /// Whether the check is relevant to `ctx`.
    pub fn applies_to(&self, ctx: &VariantContext) -> bool {
        self.applicability.applies(ctx)
    }
}

/// Build one check per list element.
///
/// Each expanded check is registered, applied and reported on its own.
pub fn expand<T, F>(items: &[T], build: F) -> Vec<Check>
where
    F: Fn(&T) -> Check,
{
    items.iter().map(build).collect()
}
