//! Check registry.
//!
//! The [`CheckRegistry`] holds the checks of a suite in declaration order.
//! Descriptions identify checks in the report and must be unique.

use crate::checks::check::Check;
use crate::error::{Result, VerifyError};
use std::collections::HashSet;

/// Ordered collection of checks.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: Vec<Check>,
    descriptions: HashSet<String>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check at the end of the suite.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCheck` if a check with the same description exists.
    pub fn register(&mut self, check: Check) -> Result<()> {
        if !self.descriptions.insert(check.description().to_string()) {
            return Err(VerifyError::DuplicateCheck {
                description: check.description().to_string(),
            });
        }
        self.checks.push(check);
        Ok(())
    }

    /// Register several checks in order.
    pub fn register_all(&mut self, checks: impl IntoIterator<Item = Check>) -> Result<()> {
        for check in checks {
            self.register(check)?;
        }
        Ok(())
    }

    /// Get a check by description.
    pub fn get(&self, description: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.description() == description)
    }

    /// Iterate over checks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::Assertion;

    fn check(description: &str) -> Check {
        Check::new(description, Assertion::exists("/etc/elasticsearch"))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn keeps_registration_order() {
        let mut registry = CheckRegistry::new();
        registry.register(check("b")).unwrap();
        registry.register(check("a")).unwrap();
        registry.register(check("c")).unwrap();

        let names: Vec<_> = registry.iter().map(|c| c.description()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn rejects_duplicate_description() {
        let mut registry = CheckRegistry::new();
        registry.register(check("port 9200 is listening")).unwrap();
        let err = registry.register(check("port 9200 is listening")).unwrap_err();

        assert!(matches!(err, VerifyError::DuplicateCheck { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_all_stops_at_duplicate() {
        let mut registry = CheckRegistry::new();
        let result = registry.register_all(vec![check("a"), check("a"), check("b")]);
        assert!(result.is_err());
        assert!(registry.get("a").is_some());
        assert!(registry.get("b").is_none());
    }
}
