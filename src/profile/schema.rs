//! Raw profile document schema.
//!
//! The document is produced by the provisioning system and carries many
//! more keys than the suite needs; unknown keys are ignored. Every field
//! here is optional so that [`validate`](super::validator::validate) can
//! report all missing fields at once instead of stopping at the first.

use serde::Deserialize;

/// A profile document exactly as deserialized from JSON or YAML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDocument {
    /// Full product version, e.g. "6.2.4".
    #[serde(rename = "es_version", alias = "version")]
    pub version: Option<String>,

    /// Major-version class, e.g. "5.x" or "current".
    #[serde(rename = "es_major_version", alias = "major_version_class")]
    pub major_version: Option<String>,

    /// OS package name.
    #[serde(rename = "es_package_name", alias = "package_name")]
    pub package_name: Option<String>,

    /// Plugins expected on the node.
    #[serde(rename = "es_plugins", alias = "plugins")]
    pub plugins: Option<Vec<PluginEntry>>,

    /// Suffix appended to the instance config dir for security files.
    #[serde(rename = "es_xpack_conf_subdir", alias = "config_subdir_suffix")]
    pub config_subdir_suffix: Option<String>,

    /// OS family override; detected from the host when absent.
    #[serde(default)]
    pub os_family: Option<String>,
}

/// One element of the plugin list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginEntry {
    /// Plugin name.
    pub plugin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provisioning_keys() {
        let doc: ProfileDocument = serde_json::from_str(
            r#"{
                "es_version": "6.2.4",
                "es_major_version": "6.x",
                "es_package_name": "elasticsearch",
                "es_plugins": [{"plugin": "ingest-attachment"}],
                "es_xpack_conf_subdir": "",
                "es_heap_size": "1g"
            }"#,
        )
        .unwrap();

        assert_eq!(doc.version.as_deref(), Some("6.2.4"));
        assert_eq!(doc.major_version.as_deref(), Some("6.x"));
        assert_eq!(doc.plugins.unwrap()[0].plugin.as_deref(), Some("ingest-attachment"));
        assert_eq!(doc.config_subdir_suffix.as_deref(), Some(""));
        assert!(doc.os_family.is_none());
    }

    #[test]
    fn parses_descriptive_aliases() {
        let doc: ProfileDocument = serde_yaml::from_str(
            r#"
version: "5.6.9"
major_version_class: legacy
package_name: elasticsearch
plugins: []
config_subdir_suffix: /x-pack
os_family: debian
"#,
        )
        .unwrap();

        assert_eq!(doc.major_version.as_deref(), Some("legacy"));
        assert_eq!(doc.config_subdir_suffix.as_deref(), Some("/x-pack"));
        assert_eq!(doc.os_family.as_deref(), Some("debian"));
    }

    #[test]
    fn missing_keys_are_none() {
        let doc: ProfileDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.version.is_none());
        assert!(doc.plugins.is_none());
    }
}
