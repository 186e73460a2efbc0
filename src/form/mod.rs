//! # Registration Form Core
//!
//! Field validation, touched/error bookkeeping, submit gating, simulated
//! submission latency and role-based redirect.
//!
//! Data flow: input event -> `FormState` mutation -> full re-validation ->
//! render contract gated by touched flags. Submit goes through the
//! `SubmissionController`, which either blocks (invalid) or enters loading
//! and redirects through the injected `Navigator` once the delay elapses.

pub mod component;
pub mod errors;
pub mod model;
pub mod navigator;
pub mod state;
pub mod submission;
pub mod validator;
pub mod view;

pub use component::RegistrationForm;
pub use errors::{FormError, FormResult};
pub use model::{Field, FieldInput, FieldKind, FormData, Role};
pub use navigator::{Navigator, RecordingNavigator};
pub use state::{FormState, SubmissionPhase, TouchedSet};
pub use submission::{
    CompletionHandle, Destination, SharedFormState, SubmissionController, SubmitOutcome,
    DEFAULT_SUBMIT_DELAY,
};
pub use validator::{validate, ErrorMap};
pub use view::{FieldView, FormView, View};
