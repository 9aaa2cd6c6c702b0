//! Profile validation.
//!
//! Turns a raw [`ProfileDocument`] into an [`ExpectedProfile`], collecting
//! every problem rather than stopping at the first one so the operator can
//! fix the document in a single pass.

use crate::error::{Result, VerifyError};
use crate::profile::schema::ProfileDocument;
use crate::profile::variant::{ExpectedProfile, MajorVersion, OsFamily};
use std::collections::HashSet;

/// A single problem found in a profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Document key the problem refers to.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a document and return all problems found.
pub fn validate_document(doc: &ProfileDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require_text(&mut errors, "es_version", doc.version.as_deref());
    require_text(&mut errors, "es_package_name", doc.package_name.as_deref());

    match doc.major_version.as_deref() {
        None => errors.push(ValidationError::new("es_major_version", "is required")),
        Some(raw) => {
            if let Err(message) = raw.parse::<MajorVersion>() {
                errors.push(ValidationError::new("es_major_version", message));
            }
        }
    }

    // Empty suffix is meaningful (no subdirectory); only absence is an error.
    match doc.config_subdir_suffix.as_deref() {
        None => errors.push(ValidationError::new("es_xpack_conf_subdir", "is required")),
        Some(suffix) if !suffix.is_empty() && !suffix.starts_with('/') => {
            errors.push(ValidationError::new(
                "es_xpack_conf_subdir",
                format!("'{}' must be empty or start with '/'", suffix),
            ));
        }
        Some(_) => {}
    }

    match &doc.plugins {
        None => errors.push(ValidationError::new("es_plugins", "is required")),
        Some(entries) => {
            let mut seen = HashSet::new();
            for (index, entry) in entries.iter().enumerate() {
                match entry.plugin.as_deref().map(str::trim) {
                    None | Some("") => errors.push(ValidationError::new(
                        "es_plugins",
                        format!("entry {} has no plugin name", index),
                    )),
                    Some(name) => {
                        if !seen.insert(name) {
                            errors.push(ValidationError::new(
                                "es_plugins",
                                format!("plugin '{}' is listed more than once", name),
                            ));
                        }
                    }
                }
            }
        }
    }

    if let Some(family) = doc.os_family.as_deref() {
        if family.trim().is_empty() {
            errors.push(ValidationError::new("os_family", "must not be empty when set"));
        }
    }

    errors
}

fn require_text(errors: &mut Vec<ValidationError>, field: &'static str, value: Option<&str>) {
    match value.map(str::trim) {
        None => errors.push(ValidationError::new(field, "is required")),
        Some("") => errors.push(ValidationError::new(field, "must not be empty")),
        Some(_) => {}
    }
}

/// Validate a document and build the typed profile.
///
/// # Errors
///
/// Returns `ProfileValidationError` listing every problem found.
pub fn validate(doc: ProfileDocument) -> Result<ExpectedProfile> {
    let errors = validate_document(&doc);
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(VerifyError::ProfileValidationError { message });
    }

    let invalid = |field: &str| VerifyError::ProfileValidationError {
        message: format!("{} is required", field),
    };

    let major_version = doc
        .major_version
        .as_deref()
        .ok_or_else(|| invalid("es_major_version"))?
        .parse::<MajorVersion>()
        .map_err(|message| VerifyError::ProfileValidationError { message })?;

    Ok(ExpectedProfile {
        version: doc
            .version
            .map(|v| v.trim().to_string())
            .ok_or_else(|| invalid("es_version"))?,
        major_version,
        package_name: doc
            .package_name
            .map(|p| p.trim().to_string())
            .ok_or_else(|| invalid("es_package_name"))?,
        plugins: doc
            .plugins
            .unwrap_or_default()
            .into_iter()
            .filter_map(|e| e.plugin.map(|p| p.trim().to_string()))
            .collect(),
        config_subdir_suffix: doc
            .config_subdir_suffix
            .ok_or_else(|| invalid("es_xpack_conf_subdir"))?,
        os_family: doc.os_family.as_deref().map(OsFamily::from_name),
    })
}
