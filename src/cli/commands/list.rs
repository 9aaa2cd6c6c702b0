//! List command implementation.
//!
//! The `nodeverify list` command prints every check of the suite and
//! whether it applies to the node, without evaluating anything.

use std::io::Write;

use serde::Serialize;

use crate::checks::security_node_suite;
use crate::cli::settings::Settings;
use crate::error::Result;
use crate::report::{OutputFormat, ReportTheme};

use super::dispatcher::{Command, CommandResult};

/// One line of the listing.
#[derive(Debug, Serialize)]
struct ListedCheck<'a> {
    description: &'a str,
    applies: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirement: Option<String>,
    retried: bool,
}

/// The list command implementation.
pub struct ListCommand {
    settings: Settings,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let ctx = self.settings.variant()?;
        let registry = security_node_suite(ctx.profile())?;

        let listed: Vec<ListedCheck<'_>> = registry
            .iter()
            .map(|check| {
                let applies = check.applies_to(&ctx);
                ListedCheck {
                    description: check.description(),
                    applies,
                    requirement: (!applies).then(|| check.applicability().requirement()),
                    retried: check.retry().is_some_and(|p| p.max_attempts > 1),
                }
            })
            .collect();

        if self.settings.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut *out, &listed).map_err(std::io::Error::other)?;
            writeln!(out)?;
            return Ok(CommandResult::success());
        }

        let theme = if self.settings.use_color {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };
        let os = ctx
            .os_family()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown OS".to_string());
        writeln!(
            out,
            "{}",
            theme.highlight.apply_to(format!(
                "{} checks for {} ({}, {})",
                listed.len(),
                ctx.profile().version,
                ctx.profile().major_version,
                os
            ))
        )?;

        for item in &listed {
            let retried = if item.retried { " (retried)" } else { "" };
            match &item.requirement {
                None => writeln!(out, "  {}{}", item.description, retried)?,
                Some(requirement) => writeln!(
                    out,
                    "  {}",
                    theme
                        .dim
                        .apply_to(format!("{} [skipped: {}]", item.description, requirement))
                )?,
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn list(profile: &str, extra: &[&str]) -> String {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.yml");
        fs::write(&path, profile).unwrap();
        let mut argv = vec![
            "nodeverify".to_string(),
            "list".to_string(),
            "--profile".to_string(),
            path.display().to_string(),
            "--host-root".to_string(),
            temp.path().display().to_string(),
            "--no-color".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        let settings = Settings::from_cli(&Cli::try_parse_from(argv).unwrap());

        let mut out = Vec::new();
        let result = ListCommand::new(settings).execute(&mut out).unwrap();
        assert!(result.success);
        String::from_utf8(out).unwrap()
    }

    const LEGACY: &str = "es_version: 5.6.9\n\
        es_major_version: 5.x\n\
        es_package_name: elasticsearch\n\
        es_plugins:\n  - plugin: ingest-geoip\n\
        es_xpack_conf_subdir: /x-pack\n\
        os_family: centos\n";

    #[test]
    fn lists_legacy_checks() {
        let text = list(LEGACY, &[]);
        assert!(text.contains("for 5.6.9 (legacy, centos)"));
        assert!(text.contains("  x-pack is listed in node plugins\n"));
        assert!(text.contains("  plugin ingest-geoip directory is owned by elasticsearch\n"));
        assert!(text.contains("template basic is registered (retried)"));
        assert!(text.contains(
            "/etc/default/elasticsearch is readable [skipped: requires OS family debian or ubuntu]"
        ));
    }

    #[test]
    fn lists_as_json() {
        let text = list(LEGACY, &["--format", "json"]);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = json.as_array().unwrap();

        let sysconfig = entries
            .iter()
            .find(|e| e["description"] == "/etc/sysconfig/elasticsearch is readable")
            .unwrap();
        assert_eq!(sysconfig["applies"], true);
        assert!(sysconfig.get("requirement").is_none());
    }
}
