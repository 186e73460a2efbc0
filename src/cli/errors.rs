//! CLI-specific error types

use std::fmt;
use std::io;

use crate::form::FormError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Input line is not a valid event or form document
    InvalidInput,
    /// Form rejected the event
    FormError,
    /// Event sent after the form was unmounted
    FormUnmounted,
    /// Runtime could not start
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "REGFORM_CLI_CONFIG_ERROR",
            Self::IoError => "REGFORM_CLI_IO_ERROR",
            Self::InvalidInput => "REGFORM_CLI_INVALID_INPUT",
            Self::FormError => "REGFORM_CLI_FORM_ERROR",
            Self::FormUnmounted => "REGFORM_CLI_FORM_UNMOUNTED",
            Self::BootFailed => "REGFORM_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn form_unmounted() -> Self {
        Self::new(CliErrorCode::FormUnmounted, "Form has been unmounted")
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

impl From<FormError> for CliError {
    fn from(e: FormError) -> Self {
        Self::new(CliErrorCode::FormError, format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad delay");
        assert_eq!(err.to_string(), "REGFORM_CLI_CONFIG_ERROR: bad delay");
    }

    #[test]
    fn test_form_error_conversion() {
        let err: CliError = FormError::UnknownField("age".into()).into();
        assert_eq!(err.code(), &CliErrorCode::FormError);
        assert!(err.message().starts_with("REGFORM_UNKNOWN_FIELD"));
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert_eq!(err.code_str(), "REGFORM_CLI_INVALID_INPUT");
    }
}
