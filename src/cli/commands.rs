//! CLI command implementations

use std::path::Path;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::form::{validate as validate_form, FormData};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{
    error_envelope, ok_envelope, parse_line, read_request, write_envelope, write_response,
};
use super::session::{Session, SessionEvent};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate => validate(),
        Command::Session { config } => session(config.as_deref()),
    }
}

/// Validate one form document from stdin
pub fn validate() -> CliResult<()> {
    let request = read_request()?;
    write_response(validation_report(request)?)
}

/// `{"valid": bool, "errors": {field: message}}` for a form document
pub fn validation_report(request: Value) -> CliResult<Value> {
    let data: FormData = serde_json::from_value(request)?;
    let errors = validate_form(&data);

    Ok(json!({
        "valid": errors.is_empty(),
        "errors": errors,
    }))
}

fn load_config(config_path: Option<&Path>) -> CliResult<AppConfig> {
    let config = match config_path {
        Some(path) => {
            let config = AppConfig::load(path)?;
            let shown = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
            config
        }
        None => AppConfig::default(),
    };
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

/// Replay stdin events against a mounted form
///
/// One response line per event; a bad line yields an error line and the
/// session continues. At end of input a pending submission is awaited.
pub fn session(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(replay_stdin(&config))
}

async fn replay_stdin(config: &AppConfig) -> CliResult<()> {
    let mut session = Session::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match replay_line(&mut session, &line).await {
            Ok(screen) => ok_envelope(screen),
            Err(e) => error_envelope(e.code_str(), e.message()),
        };
        write_envelope(&response)?;
    }

    let screen = session.finish().await?;
    write_response(screen)
}

async fn replay_line(session: &mut Session, line: &str) -> CliResult<Value> {
    let event = SessionEvent::from_value(parse_line(line)?)?;
    session.apply(event).await
}
