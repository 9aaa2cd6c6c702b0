//! Filesystem assertions.

use super::{quoted, Outcome};
use crate::error::ProbeError;
use crate::host::{FileKind, Host};
use regex::Regex;
use std::path::Path;

/// Something exists at `path`.
pub fn exists(host: &dyn Host, path: &Path) -> Result<Outcome, ProbeError> {
    Ok(match host.file_info(path)? {
        Some(info) => Outcome::Match(format!("{} exists ({})", path.display(), info.kind)),
        None => Outcome::Mismatch(format!("{} does not exist", path.display())),
    })
}

/// A regular file exists at `path`.
pub fn is_file(host: &dyn Host, path: &Path) -> Result<Outcome, ProbeError> {
    is_kind(host, path, FileKind::File)
}

/// A directory exists at `path`.
pub fn is_directory(host: &dyn Host, path: &Path) -> Result<Outcome, ProbeError> {
    is_kind(host, path, FileKind::Directory)
}

fn is_kind(host: &dyn Host, path: &Path, expected: FileKind) -> Result<Outcome, ProbeError> {
    Ok(match host.file_info(path)? {
        Some(info) if info.kind == expected => {
            Outcome::Match(format!("{} is a {}", path.display(), expected))
        }
        Some(info) => Outcome::Mismatch(format!(
            "{} is a {}, expected a {}",
            path.display(),
            info.kind,
            expected
        )),
        None => Outcome::Mismatch(format!("{} does not exist", path.display())),
    })
}

/// `path` is owned by `owner`.
pub fn owned_by(host: &dyn Host, path: &Path, owner: &str) -> Result<Outcome, ProbeError> {
    let Some(info) = host.file_info(path)? else {
        return Ok(Outcome::Mismatch(format!("{} does not exist", path.display())));
    };

    Ok(match info.owner.as_deref() {
        Some(actual) if actual == owner => {
            Outcome::Match(format!("{} is owned by {}", path.display(), owner))
        }
        Some(actual) => Outcome::Mismatch(format!(
            "{} is owned by {}, expected {}",
            path.display(),
            actual,
            owner
        )),
        None => Outcome::Mismatch(format!(
            "owner of {} cannot be determined on this platform",
            path.display()
        )),
    })
}

/// The file at `path` contains `literal`.
pub fn contains(host: &dyn Host, path: &Path, literal: &str) -> Result<Outcome, ProbeError> {
    let Some(content) = host.read_file(path)? else {
        return Ok(Outcome::Mismatch(format!("{} does not exist", path.display())));
    };

    Ok(if content.contains(literal) {
        Outcome::Match(format!("{} contains {}", path.display(), quoted(literal)))
    } else {
        Outcome::Mismatch(format!(
            "{} does not contain {}",
            path.display(),
            quoted(literal)
        ))
    })
}

/// The content of the file at `path` matches `pattern`.
pub fn matches(host: &dyn Host, path: &Path, pattern: &str) -> Result<Outcome, ProbeError> {
    let regex = compile(pattern)?;
    let Some(content) = host.read_file(path)? else {
        return Ok(Outcome::Mismatch(format!("{} does not exist", path.display())));
    };

    Ok(if regex.is_match(&content) {
        Outcome::Match(format!("{} matches /{}/", path.display(), pattern))
    } else {
        Outcome::Mismatch(format!("{} does not match /{}/", path.display(), pattern))
    })
}

/// Compile a pattern, reporting failures as a broken check.
pub(crate) fn compile(pattern: &str) -> Result<Regex, ProbeError> {
    Regex::new(pattern).map_err(|e| ProbeError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
