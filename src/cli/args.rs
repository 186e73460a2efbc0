//! CLI argument definitions using clap
//!
//! Commands:
//! - regform validate
//! - regform session [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// regform - registration form validation and submission driver
#[derive(Parser, Debug)]
#[command(name = "regform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one JSON form document read from stdin
    Validate,

    /// Replay JSON-line form events from stdin against a mounted form
    Session {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
