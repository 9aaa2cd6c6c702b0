//! Run command implementation.
//!
//! The `nodeverify run` command evaluates the security-node suite against
//! the local host and the node's HTTP API, then writes the report.

use std::io::Write;

use crate::assertions::Target;
use crate::checks::{security_node_suite, Runner};
use crate::cli::args::RunArgs;
use crate::cli::settings::Settings;
use crate::error::Result;
use crate::host::LocalHost;
use crate::http::HttpApi;
use crate::report::{HumanFormatter, JsonFormatter, OutputFormat, Report, ReportFormatter};
use crate::retry::ThreadSleeper;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    settings: Settings,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(settings: Settings, args: RunArgs) -> Self {
        Self { settings, args }
    }

    fn write_report(&self, report: &Report, out: &mut dyn Write) -> std::io::Result<()> {
        let mut out = out;
        match self.settings.format {
            OutputFormat::Human => HumanFormatter::new(self.settings.use_color)
                .verbose(self.args.verbose)
                .format(report, &mut out),
            OutputFormat::Json => JsonFormatter::new().format(report, &mut out),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let ctx = self.settings.variant()?;
        let registry = security_node_suite(ctx.profile())?;

        let host = LocalHost::new(&self.settings.host_root)
            .with_os_family(ctx.os_family().cloned())
            .with_address(self.settings.node_address());
        let api = HttpApi::new(&self.settings.base_url, self.settings.timeout)?;
        let sleeper = ThreadSleeper;

        let runner = Runner::new(Target::new(&host, &api), &sleeper)
            .with_retry_wait(self.settings.retry_wait)
            .with_only(self.settings.only.clone());
        let report = runner.run(&registry, &ctx);

        self.write_report(&report, out)?;

        Ok(if report.is_success() {
            CommandResult::success()
        } else {
            CommandResult::failure(report.exit_signal())
        })
    }
}
