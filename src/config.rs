//! Application configuration
//!
//! JSON file, every field optional:
//!
//! ```json
//! { "submit_delay_ms": 2000, "prefers_dark": false, "log_level": "info" }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::{CliError, CliResult};
use crate::form::DEFAULT_SUBMIT_DELAY;
use crate::observability::Severity;

/// Upper bound for the simulated submission latency
pub const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated backend latency in milliseconds (default 2000)
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// Initial OS color-scheme preference (default: light)
    #[serde(default)]
    pub prefers_dark: bool,

    /// Minimum log severity: trace, info, warn or error (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY.as_millis() as u64
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            prefers_dark: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.submit_delay_ms > MAX_SUBMIT_DELAY_MS {
            return Err(CliError::config_error(format!(
                "submit_delay_ms must be <= {}, got {}",
                MAX_SUBMIT_DELAY_MS, self.submit_delay_ms
            )));
        }

        self.severity()?;

        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error.",
                self.log_level
            ))
        })
    }
}
