//! Expected profile loading and the variant context.
//!
//! This module handles everything about the expected configuration of a
//! node:
//! - Raw document schema in [`schema`]
//! - File loading in [`loader`]
//! - Validation into a typed profile in [`validator`]
//! - Variant predicates (major version, OS family, plugins) in [`variant`]
//!
//! A malformed or incomplete profile is the one fatal condition: it is
//! rejected here, before any check runs.
//!
//! # Example
//!
//! ```
//! use nodeverify::profile::{parse_profile, ProfileFormat, VariantContext};
//! use std::path::Path;
//!
//! let profile = parse_profile(
//!     r#"{"es_version": "6.2.4", "es_major_version": "6.x",
//!         "es_package_name": "elasticsearch", "es_plugins": [],
//!         "es_xpack_conf_subdir": ""}"#,
//!     ProfileFormat::Json,
//!     Path::new("vars.json"),
//! )
//! .unwrap();
//!
//! let ctx = VariantContext::new(profile, None);
//! assert!(!ctx.is_legacy_major_version());
//! assert_eq!(ctx.plugin_count(), 0);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;
pub mod variant;

pub use loader::{load_profile, parse_profile, ProfileFormat};
pub use schema::{PluginEntry, ProfileDocument};
pub use validator::{validate, validate_document, ValidationError};
pub use variant::{ExpectedProfile, MajorVersion, OsFamily, VariantContext};
