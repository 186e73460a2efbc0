//! CLI module for regform
//!
//! Provides command-line interface for:
//! - validate: One-shot validation of a form document
//! - session: Replay of UI events against a mounted form

mod args;
mod commands;
mod errors;
mod io;
mod session;

pub use args::{Cli, Command};
pub use commands::{run, run_command, session, validate, validation_report};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
pub use session::{Session, SessionEvent};
