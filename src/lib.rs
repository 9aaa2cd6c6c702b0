//! nodeverify - Post-provisioning verification of a security-hardened search node.
//!
//! nodeverify checks a provisioned node against an expected profile: files
//! and their ownership, system users, packages and services, listening
//! ports, and the node's authenticated HTTP API. Each check is independent;
//! the run always produces a complete report.
//!
//! # Modules
//!
//! - [`assertions`] - Declarative assertion primitives and their evaluation
//! - [`checks`] - Check registry, runner and the security-node suite
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`host`] - Target host abstraction and its local implementation
//! - [`http`] - HTTP API client and JSON path navigation
//! - [`profile`] - Expected profile loading and the variant context
//! - [`report`] - Check results, summaries and output formatting
//! - [`retry`] - Fixed-interval retry policy
//!
//! # Example
//!
//! ```
//! use nodeverify::checks::security_node_suite;
//! use nodeverify::profile::{parse_profile, ProfileFormat};
//! use std::path::Path;
//!
//! let profile = parse_profile(
//!     "es_version: 6.2.4\nes_major_version: 6.x\nes_package_name: elasticsearch\n\
//!      es_plugins: []\nes_xpack_conf_subdir: ''\n",
//!     ProfileFormat::Yaml,
//!     Path::new("vars.yml"),
//! )
//! .unwrap();
//!
//! let suite = security_node_suite(&profile).unwrap();
//! assert!(suite.get("license is active").is_some());
//! ```
//!
//! For end-to-end runs against a mock node, see the integration tests.

pub mod assertions;
pub mod checks;
pub mod cli;
pub mod error;
pub mod host;
pub mod http;
pub mod profile;
pub mod report;
pub mod retry;

pub use error::{ProbeError, Result, VerifyError};
