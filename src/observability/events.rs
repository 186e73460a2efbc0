//! Observable events of the registration form
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Form lifecycle
    /// Form state created with empty defaults
    FormMounted,
    /// Form torn down
    FormUnmounted,

    // Field interaction
    /// Field value stored and form re-validated
    FieldUpdated,
    /// Field input refused (unknown field, wrong kind, locked form)
    FieldRejected,
    /// Field blurred
    FieldTouched,

    // Submission
    /// Submit attempted on an invalid form
    SubmitBlocked,
    /// Submit accepted, loading entered
    SubmitAccepted,
    /// Submit ignored, a cycle is in flight or finished
    SubmitIgnored,
    /// Deferred completion applied
    SubmissionCompleted,
    /// Pending completion revoked on teardown
    SubmissionCancelled,
    /// Completion fired after teardown and was dropped
    SubmissionSuppressed,
    /// Completion task died before applying its effects
    SubmissionFailed,

    // Application shell
    /// Router moved to a new path
    RouteChanged,
    /// Theme switched (toggle or OS preference)
    ThemeChanged,
    /// Configuration loaded
    ConfigLoaded,
    /// CLI session finished replaying events
    SessionComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::FormMounted => "FORM_MOUNTED",
            Event::FormUnmounted => "FORM_UNMOUNTED",

            Event::FieldUpdated => "FIELD_UPDATED",
            Event::FieldRejected => "FIELD_REJECTED",
            Event::FieldTouched => "FIELD_TOUCHED",

            Event::SubmitBlocked => "SUBMIT_BLOCKED",
            Event::SubmitAccepted => "SUBMIT_ACCEPTED",
            Event::SubmitIgnored => "SUBMIT_IGNORED",
            Event::SubmissionCompleted => "SUBMISSION_COMPLETED",
            Event::SubmissionCancelled => "SUBMISSION_CANCELLED",
            Event::SubmissionSuppressed => "SUBMISSION_SUPPRESSED",
            Event::SubmissionFailed => "SUBMISSION_FAILED",

            Event::RouteChanged => "ROUTE_CHANGED",
            Event::ThemeChanged => "THEME_CHANGED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SessionComplete => "SESSION_COMPLETE",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::FieldUpdated | Event::FieldTouched => Severity::Trace,
            Event::FieldRejected | Event::SubmitIgnored => Severity::Warn,
            Event::SubmissionFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
