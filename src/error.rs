//! Error types for nodeverify operations.
//!
//! This module defines [`VerifyError`], the fatal error type that may reach
//! the process boundary, and [`ProbeError`], the non-fatal error raised while
//! observing the target host.
//!
//! # Error Handling Strategy
//!
//! - `VerifyError` aborts the run before any check executes (bad profile,
//!   broken suite definition)
//! - `ProbeError` is caught by the runner at the per-check boundary and
//!   recorded as an `error` result
//! - Use `anyhow::Error` (via `VerifyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error type for nodeverify operations.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Profile document not found at the given location.
    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    /// Failed to parse the profile document.
    #[error("Failed to parse profile at {path}: {message}")]
    ProfileParseError { path: PathBuf, message: String },

    /// Profile parsed but a required field is missing or invalid.
    #[error("Invalid profile: {message}")]
    ProfileValidationError { message: String },

    /// Two checks registered under the same description.
    #[error("Duplicate check: {description}")]
    DuplicateCheck { description: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VerifyError {
    /// Whether this error comes from loading the profile.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VerifyError::ProfileNotFound { .. }
                | VerifyError::ProfileParseError { .. }
                | VerifyError::ProfileValidationError { .. }
        )
    }
}

/// Result type alias for nodeverify operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// An observation of the target host could not be completed.
///
/// Distinct from a mismatch: the check is broken, not failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// HTTP request could not be sent or its body could not be read.
    #[error("HTTP request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Response body was expected to be JSON but is not.
    #[error("Response from {path} is not valid JSON: {message}")]
    InvalidJson { path: String, message: String },

    /// A file exists but could not be read or inspected.
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An OS query command could not be run.
    #[error("Query '{command}' could not be run: {message}")]
    Query { command: String, message: String },

    /// A content or body pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The check panicked while evaluating.
    #[error("Check panicked: {message}")]
    Panicked { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_not_found_displays_path() {
        let err = VerifyError::ProfileNotFound {
            path: PathBuf::from("/tmp/vars.json"),
        };
        assert!(err.to_string().contains("/tmp/vars.json"));
    }

    #[test]
    fn profile_parse_error_displays_path_and_message() {
        let err = VerifyError::ProfileParseError {
            path: PathBuf::from("/tmp/vars.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/vars.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn profile_errors_are_config_errors() {
        let err = VerifyError::ProfileValidationError {
            message: "missing es_version".into(),
        };
        assert!(err.is_config_error());
        assert!(err.to_string().contains("missing es_version"));
    }

    #[test]
    fn duplicate_check_is_not_config_error() {
        let err = VerifyError::DuplicateCheck {
            description: "port 9200 is listening".into(),
        };
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("port 9200"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: VerifyError = io_err.into();
        assert!(matches!(err, VerifyError::Io(_)));
    }

    #[test]
    fn transport_error_displays_url() {
        let err = ProbeError::Transport {
            url: "http://localhost:9200/_license".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/_license"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn unreadable_error_keeps_source() {
        let err = ProbeError::Unreadable {
            path: PathBuf::from("/etc/elasticsearch/users"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/etc/elasticsearch/users"));
    }
}
