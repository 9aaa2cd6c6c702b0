//! OS query command execution.
//!
//! Package and service state are read by running the distribution's own
//! query tools. Commands are spawned directly, never through a shell.

use crate::error::ProbeError;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Result of running a query command.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    /// Standard output.
    pub stdout: String,

    /// Whether the command exited 0.
    pub success: bool,
}

/// Run `program` with `args` and capture its output.
///
/// A non-zero exit is a normal answer ("not installed", "not running");
/// only failing to spawn the program is an error.
pub fn run_query(program: &str, args: &[&str]) -> Result<QueryOutput, ProbeError> {
    let start = Instant::now();
    let command_line = format!("{} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ProbeError::Query {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        "Query '{}' exited with {:?} in {:?}",
        command_line,
        output.status.code(),
        start.elapsed()
    );

    Ok(QueryOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        success: output.status.success(),
    })
}
