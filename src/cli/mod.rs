//! Command-line interface for nodeverify.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`settings`] - Runtime settings resolved from the arguments
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;
pub mod settings;

pub use args::{Cli, Commands, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use settings::Settings;
