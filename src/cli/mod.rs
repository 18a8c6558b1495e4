//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the books table
//! - serve: Run the HTTP API until interrupted

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
