//! Typed profile and the variant context checks are selected against.

use std::fmt;
use std::str::FromStr;

/// Major-version class of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorVersion {
    /// 5.x: x-pack installed as a plugin, `path.conf` in the node config.
    Legacy,
    /// 6.x: x-pack bundled.
    Current,
}

impl FromStr for MajorVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5.x" | "legacy" => Ok(Self::Legacy),
            "6.x" | "current" => Ok(Self::Current),
            other => Err(format!(
                "unsupported major version class '{}' (expected 5.x/legacy or 6.x/current)",
                other
            )),
        }
    }
}

impl fmt::Display for MajorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MajorVersion::Legacy => write!(f, "legacy"),
            MajorVersion::Current => write!(f, "current"),
        }
    }
}

/// Operating-system family of the target host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Debian,
    Ubuntu,
    Centos,
    Redhat,
    Other(String),
}

impl OsFamily {
    /// Map an os-release `ID` or a user-supplied name to a family.
    pub fn from_name(name: &str) -> Self {
        match name.trim().trim_matches('"').to_lowercase().as_str() {
            "debian" => Self::Debian,
            "ubuntu" => Self::Ubuntu,
            "centos" => Self::Centos,
            "redhat" | "rhel" => Self::Redhat,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether packages on this family are managed with dpkg.
    pub fn uses_dpkg(&self) -> bool {
        matches!(self, Self::Debian | Self::Ubuntu)
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Debian => write!(f, "debian"),
            OsFamily::Ubuntu => write!(f, "ubuntu"),
            OsFamily::Centos => write!(f, "centos"),
            OsFamily::Redhat => write!(f, "redhat"),
            OsFamily::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Validated, immutable expected profile.
///
/// Built once by [`load_profile`](super::load_profile) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedProfile {
    pub version: String,
    pub major_version: MajorVersion,
    pub package_name: String,
    /// Plugin names in document order, without duplicates.
    pub plugins: Vec<String>,
    /// Appended to the instance config dir; empty means no subdirectory.
    pub config_subdir_suffix: String,
    /// Family named by the profile, if any.
    pub os_family: Option<OsFamily>,
}

/// The profile plus the resolved host OS family.
///
/// Applicability predicates are evaluated against this and nothing else.
#[derive(Debug, Clone)]
pub struct VariantContext {
    profile: ExpectedProfile,
    os_family: Option<OsFamily>,
}

impl VariantContext {
    /// Build a context; the profile's own OS family wins over `detected`.
    pub fn new(profile: ExpectedProfile, detected: Option<OsFamily>) -> Self {
        let os_family = profile.os_family.clone().or(detected);
        Self { profile, os_family }
    }

    pub fn profile(&self) -> &ExpectedProfile {
        &self.profile
    }

    pub fn os_family(&self) -> Option<&OsFamily> {
        self.os_family.as_ref()
    }

    pub fn is_legacy_major_version(&self) -> bool {
        self.profile.major_version == MajorVersion::Legacy
    }

    /// Whether the host OS family is one of `families`. False when unknown.
    pub fn os_family_in(&self, families: &[OsFamily]) -> bool {
        self.os_family
            .as_ref()
            .map(|f| families.contains(f))
            .unwrap_or(false)
    }

    pub fn plugin_count(&self) -> usize {
        self.profile.plugins.len()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.profile.plugins.iter().any(|p| p == name)
    }
}
