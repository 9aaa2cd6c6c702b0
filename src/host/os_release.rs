//! OS family detection from `/etc/os-release`.

use crate::profile::OsFamily;
use std::path::Path;

/// Detect the OS family of the host rooted at `root`.
///
/// Uses `ID`; when that is not a known family, the first known entry of
/// `ID_LIKE` wins. Returns `None` when the file is missing or has no `ID`.
pub fn detect_os_family(root: &Path) -> Option<OsFamily> {
    let content = std::fs::read_to_string(root.join("etc/os-release")).ok()?;
    let family = parse_os_release(&content);
    tracing::debug!("Detected OS family {:?} under {}", family, root.display());
    family
}

/// Parse os-release content into a family.
pub fn parse_os_release(content: &str) -> Option<OsFamily> {
    let mut id = None;
    let mut id_like = None;

    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'');
        match key.trim() {
            "ID" => id = Some(value.to_string()),
            "ID_LIKE" => id_like = Some(value.to_string()),
            _ => {}
        }
    }

    let family = OsFamily::from_name(&id?);
    if !matches!(family, OsFamily::Other(_)) {
        return Some(family);
    }

    let like = id_like
        .iter()
        .flat_map(|l| l.split_whitespace())
        .map(OsFamily::from_name)
        .find(|f| !matches!(f, OsFamily::Other(_)));

    Some(like.unwrap_or(family))
}
