//! nodeverify CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use nodeverify::cli::{Cli, CommandDispatcher, Settings};
use nodeverify::report::{ReportTheme, EXIT_CONFIG_ERROR};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries only the report.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("nodeverify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nodeverify=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("nodeverify starting with args: {:?}", cli);

    let settings = Settings::from_cli(&cli);
    let theme = if settings.use_color {
        ReportTheme::new()
    } else {
        ReportTheme::plain()
    };
    let dispatcher = CommandDispatcher::new(settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatcher.dispatch(&cli, &mut out);
    let _ = out.flush();

    match result {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("{}", theme.format_fail(&format!("Error: {}", e)));
            if e.is_config_error() {
                eprintln!("Check the profile given with --profile.");
            }
            ExitCode::from(EXIT_CONFIG_ERROR as u8)
        }
    }
}
