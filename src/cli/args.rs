//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf init --config <path>
//! - bookshelf serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - track books and reading progress over HTTP
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file (if absent) and create the books table
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bookshelf.json")]
        config: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./bookshelf.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
