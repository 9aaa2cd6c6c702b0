//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Every global flag can also be
//! set through a `NODEVERIFY_*` environment variable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nodeverify - Verify a provisioned security node against its profile.
#[derive(Debug, Parser)]
#[command(name = "nodeverify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the expected profile (JSON, or YAML by .yml/.yaml extension)
    #[arg(short, long, global = true, env = "NODEVERIFY_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Root URL of the node's HTTP API
    #[arg(
        long,
        global = true,
        env = "NODEVERIFY_BASE_URL",
        default_value = "http://localhost:9200"
    )]
    pub base_url: String,

    /// Filesystem root under which node paths are resolved
    #[arg(long, global = true, env = "NODEVERIFY_HOST_ROOT", default_value = "/")]
    pub host_root: PathBuf,

    /// OS family of the node (detected from os-release if omitted)
    #[arg(long, global = true, env = "NODEVERIFY_OS_FAMILY")]
    pub os_family: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "NODEVERIFY_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Override the wait between retries, in seconds
    #[arg(long, global = true, env = "NODEVERIFY_RETRY_WAIT")]
    pub retry_wait: Option<u64>,

    /// Output format: human, json
    #[arg(
        long,
        global = true,
        env = "NODEVERIFY_FORMAT",
        default_value = "human",
        value_parser = ["human", "json"]
    )]
    pub format: String,

    /// Run only checks whose description contains this text
    #[arg(long, global = true, env = "NODEVERIFY_ONLY")]
    pub only: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, env = "NODEVERIFY_NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "NODEVERIFY_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the checks (default if no command specified)
    Run(RunArgs),

    /// List the checks and whether each applies to this node
    List,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Also show what was observed for passing and skipped checks
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_means_run() {
        let cli = Cli::try_parse_from(["nodeverify", "--profile", "vars.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.profile, Some(PathBuf::from("vars.json")));
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["nodeverify", "run"]).unwrap();
        assert_eq!(cli.base_url, "http://localhost:9200");
        assert_eq!(cli.host_root, PathBuf::from("/"));
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.format, "human");
        assert!(cli.retry_wait.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nodeverify",
            "run",
            "--verbose",
            "--format",
            "json",
            "--only",
            "license",
            "--retry-wait",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        assert_eq!(cli.only.as_deref(), Some("license"));
        assert_eq!(cli.retry_wait, Some(0));
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.verbose),
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn list_subcommand() {
        let cli = Cli::try_parse_from(["nodeverify", "list", "--os-family", "ubuntu"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
        assert_eq!(cli.os_family.as_deref(), Some("ubuntu"));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["nodeverify", "--format", "sarif"]).is_err());
    }
}
