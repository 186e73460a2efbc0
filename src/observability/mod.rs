//! Observability for the registration form
//!
//! Provides:
//! - Structured logging (JSON, one line per event)
//! - Typed form lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on form state
//! 3. Field values are never logged
//!
//! # Usage
//!
//! ```ignore
//! use regform::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SubmitBlocked, &[("failing", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a form event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a form event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
