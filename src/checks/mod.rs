//! Check registry and execution.
//!
//! - [`check`] - A check and its applicability predicate
//! - [`registry`] - Ordered, uniquely-described collection of checks
//! - [`runner`] - Evaluates a registry against a target into a report
//! - [`suite`] - The security-node suite
//!
//! # Example
//!
//! ```
//! use nodeverify::assertions::Assertion;
//! use nodeverify::checks::{Applicability, Check, CheckRegistry};
//!
//! let mut registry = CheckRegistry::new();
//! registry
//!     .register(
//!         Check::new("plugins directory exists", Assertion::is_directory("/usr/share/elasticsearch/plugins"))
//!             .when(Applicability::legacy()),
//!     )
//!     .unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

pub mod check;
pub mod registry;
pub mod runner;
pub mod suite;

pub use check::{expand, Applicability, Check};
pub use registry::CheckRegistry;
pub use runner::Runner;
pub use suite::security_node_suite;
