//! # Form Errors
//!
//! Error types for the registration form core.
//!
//! Field validation failures are not errors: they are data carried by
//! [`ErrorMap`](super::validator::ErrorMap). These errors cover misuse of the
//! form API (bad field names, wrong input kinds) and scheduling faults.

use thiserror::Error;

use super::model::Field;

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Registration form errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    // ==================
    // Input Errors
    // ==================

    /// Field name does not belong to the registration form
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Checkbox input sent to a text field or vice versa
    #[error("Field {field} expects {expected} input")]
    TypeMismatch { field: Field, expected: &'static str },

    /// Select value outside of its option list
    #[error("Invalid choice for {field}: '{value}'")]
    InvalidChoice { field: Field, value: String },

    /// Fields are disabled while a submission is loading or finished
    #[error("Form is locked while a submission is in flight")]
    SubmissionInFlight,

    // ==================
    // Internal Errors
    // ==================

    /// No async runtime to schedule the deferred completion on
    #[error("Internal error: no runtime available to schedule submission")]
    SchedulerUnavailable,

    /// Shared form state lock was poisoned
    #[error("Internal error: form state lock poisoned")]
    StatePoisoned,
}

impl FormError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            FormError::UnknownField(_) => "REGFORM_UNKNOWN_FIELD",
            FormError::TypeMismatch { .. } => "REGFORM_TYPE_MISMATCH",
            FormError::InvalidChoice { .. } => "REGFORM_INVALID_CHOICE",
            FormError::SubmissionInFlight => "REGFORM_SUBMISSION_IN_FLIGHT",
            FormError::SchedulerUnavailable => "REGFORM_SCHEDULER_UNAVAILABLE",
            FormError::StatePoisoned => "REGFORM_STATE_POISONED",
        }
    }

    /// Returns whether the caller caused this error
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            FormError::SchedulerUnavailable | FormError::StatePoisoned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FormError::UnknownField("age".into()).code(),
            "REGFORM_UNKNOWN_FIELD"
        );
        assert_eq!(FormError::StatePoisoned.code(), "REGFORM_STATE_POISONED");
    }

    #[test]
    fn test_client_errors() {
        assert!(FormError::SubmissionInFlight.is_client_error());
        assert!(FormError::TypeMismatch {
            field: Field::Terms,
            expected: "checkbox"
        }
        .is_client_error());
        assert!(!FormError::SchedulerUnavailable.is_client_error());
    }

    #[test]
    fn test_messages_use_wire_field_names() {
        let err = FormError::InvalidChoice {
            field: Field::Role,
            value: "root".into(),
        };
        assert_eq!(err.to_string(), "Invalid choice for role: 'root'");
    }
}
