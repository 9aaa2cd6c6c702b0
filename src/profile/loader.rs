//! Profile document loading.
//!
//! The provisioning system writes the profile as JSON; YAML is accepted for
//! hand-written profiles. The format is chosen by file extension.

use crate::error::{Result, VerifyError};
use crate::profile::schema::ProfileDocument;
use crate::profile::validator::validate;
use crate::profile::variant::ExpectedProfile;
use std::fs;
use std::path::Path;

/// Encoding of a profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Yaml,
}

impl ProfileFormat {
    /// Pick a format from the file extension; anything but `.yml`/`.yaml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load, parse and validate a profile document.
///
/// # Errors
///
/// Returns `ProfileNotFound` if the file doesn't exist.
/// Returns `ProfileParseError` if the document is not valid JSON/YAML.
/// Returns `ProfileValidationError` if required fields are missing.
pub fn load_profile(path: &Path) -> Result<ExpectedProfile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VerifyError::ProfileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VerifyError::Io(e)
        }
    })?;

    let profile = parse_profile(&content, ProfileFormat::from_path(path), path)?;
    tracing::debug!(
        "Loaded profile {} (version {}, {}, {} plugins)",
        path.display(),
        profile.version,
        profile.major_version,
        profile.plugins.len()
    );
    Ok(profile)
}

/// Parse and validate profile content.
///
/// # Arguments
///
/// * `content` - The document text
/// * `format` - How to decode it
/// * `source_path` - Path for error reporting
pub fn parse_profile(
    content: &str,
    format: ProfileFormat,
    source_path: &Path,
) -> Result<ExpectedProfile> {
    let parse_error = |message: String| VerifyError::ProfileParseError {
        path: source_path.to_path_buf(),
        message,
    };

    let doc: ProfileDocument = match format {
        ProfileFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        ProfileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    validate(doc)
}
