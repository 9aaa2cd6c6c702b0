//! Runtime settings shared by the commands.
//!
//! Resolved once from the parsed [`Cli`] so commands never touch clap types.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::args::Cli;
use crate::error::{Result, VerifyError};
use crate::host::detect_os_family;
use crate::profile::{load_profile, OsFamily, VariantContext};
use crate::report::{should_use_colors, OutputFormat};

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: Option<PathBuf>,
    pub base_url: String,
    pub host_root: PathBuf,
    pub os_family: Option<OsFamily>,
    pub timeout: Duration,
    pub retry_wait: Option<Duration>,
    pub format: OutputFormat,
    pub only: Option<String>,
    pub use_color: bool,
}

impl Settings {
    /// Resolve settings from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            profile: cli.profile.clone(),
            base_url: cli.base_url.clone(),
            host_root: cli.host_root.clone(),
            os_family: cli.os_family.as_deref().map(OsFamily::from_name),
            timeout: Duration::from_secs(cli.timeout),
            retry_wait: cli.retry_wait.map(Duration::from_secs),
            format: cli.format.parse().unwrap_or_default(),
            only: cli.only.clone(),
            use_color: !cli.no_color && should_use_colors(),
        }
    }

    /// Address the port checks connect to: the host of `--base-url`.
    ///
    /// Falls back to the loopback address when the URL does not parse; the
    /// API checks report that URL on their own.
    pub fn node_address(&self) -> String {
        reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(|host| host.trim_matches(['[', ']']).to_string()))
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    /// Load the profile and build the variant context.
    ///
    /// The OS family comes from the profile, then `--os-family`, then
    /// `/etc/os-release` under the host root.
    pub fn variant(&self) -> Result<VariantContext> {
        let path = self
            .profile
            .as_ref()
            .ok_or_else(|| VerifyError::ProfileValidationError {
                message: "no profile given; pass --profile or set NODEVERIFY_PROFILE".to_string(),
            })?;

        let profile = load_profile(path)?;
        let detected = self
            .os_family
            .clone()
            .or_else(|| detect_os_family(&self.host_root));

        let ctx = VariantContext::new(profile, detected);
        tracing::debug!(
            "Verifying {} ({}) on OS family {:?}",
            ctx.profile().version,
            ctx.profile().major_version,
            ctx.os_family()
        );
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["nodeverify"];
        argv.extend_from_slice(args);
        Settings::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn resolves_durations_and_format() {
        let s = settings(&["--timeout", "3", "--retry-wait", "0", "--format", "json"]);
        assert_eq!(s.timeout, Duration::from_secs(3));
        assert_eq!(s.retry_wait, Some(Duration::ZERO));
        assert_eq!(s.format, OutputFormat::Json);
    }

    #[test]
    fn node_address_follows_base_url() {
        assert_eq!(settings(&[]).node_address(), "localhost");
        assert_eq!(
            settings(&["--base-url", "https://es1.example.com:9200/"]).node_address(),
            "es1.example.com"
        );
        assert_eq!(
            settings(&["--base-url", "http://[::1]:9200"]).node_address(),
            "::1"
        );
        assert_eq!(
            settings(&["--base-url", "not a url"]).node_address(),
            "127.0.0.1"
        );
    }

    #[test]
    fn no_color_flag_wins() {
        assert!(!settings(&["--no-color"]).use_color);
    }

    #[test]
    fn missing_profile_is_config_error() {
        let err = settings(&[]).variant().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn detects_os_family_under_host_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("etc")).unwrap();
        fs::write(temp.path().join("etc/os-release"), "ID=ubuntu\n").unwrap();
        let profile = temp.path().join("vars.json");
        fs::write(
            &profile,
            r#"{"es_version": "6.2.4", "es_major_version": "6.x",
                "es_package_name": "elasticsearch", "es_plugins": [],
                "es_xpack_conf_subdir": ""}"#,
        )
        .unwrap();

        let root = temp.path().to_str().unwrap();
        let profile = profile.to_str().unwrap();
        let ctx = settings(&["--profile", profile, "--host-root", root])
            .variant()
            .unwrap();
        assert_eq!(ctx.os_family(), Some(&OsFamily::Ubuntu));

        let ctx = settings(&["--profile", profile, "--host-root", root, "--os-family", "centos"])
            .variant()
            .unwrap();
        assert_eq!(ctx.os_family(), Some(&OsFamily::Centos));
    }
}
