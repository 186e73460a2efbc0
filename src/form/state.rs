//! # Form State
//!
//! Owns the form values, the derived `ErrorMap`, the touched set and the
//! UI-transient flags.
//!
//! ## Invariants
//! - `errors` is always `validate(&data)` for the current `data`
//! - Validity is `errors.is_empty()`, never stored separately
//! - Touching a field changes display only, never `errors`

use std::collections::BTreeSet;

use serde::Serialize;

use super::errors::{FormError, FormResult};
use super::model::{Field, FieldInput, FormData};
use super::validator::{validate, ErrorMap};

/// Fields the user has blurred, or that a failed submit forced visible
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TouchedSet {
    fields: BTreeSet<Field>,
}

impl TouchedSet {
    pub fn mark(&mut self, field: Field) {
        self.fields.insert(field);
    }

    pub fn mark_all(&mut self) {
        self.fields.extend(Field::ALL);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Where the form is in its submission cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    /// Editable; a blocked submit also lands here
    #[default]
    Idle,
    /// Waiting for the simulated backend
    Loading,
    /// Completion applied and redirect dispatched
    Redirected,
}

/// State of one mounted registration form
#[derive(Debug, Clone)]
pub struct FormState {
    data: FormData,
    errors: ErrorMap,
    touched: TouchedSet,
    phase: SubmissionPhase,
    show_password: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Empty form; every required field already reported, nothing touched
    pub fn new() -> Self {
        Self::with_data(FormData::new())
    }

    /// Form prefilled with `data`
    pub fn with_data(data: FormData) -> Self {
        let errors = validate(&data);
        Self {
            data,
            errors,
            touched: TouchedSet::default(),
            phase: SubmissionPhase::Idle,
            show_password: false,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmissionPhase::Loading
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == SubmissionPhase::Redirected
    }

    /// Whether inputs are disabled
    pub fn is_locked(&self) -> bool {
        self.phase != SubmissionPhase::Idle
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// Store a raw input and re-validate the whole form
    ///
    /// This is the only path that mutates `data`.
    pub fn update_field(&mut self, field: Field, input: FieldInput) -> FormResult<()> {
        if self.is_locked() {
            return Err(FormError::SubmissionInFlight);
        }
        self.data.set(field, input)?;
        self.errors = validate(&self.data);
        Ok(())
    }

    pub fn mark_touched(&mut self, field: Field) {
        self.touched.mark(field);
    }

    /// Force every error visible (failed submit attempt)
    pub fn mark_all_touched(&mut self) {
        self.touched.mark_all();
    }

    /// Flip the single visibility flag shared by both password inputs
    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Error to display for `field`: failing AND touched
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = SubmissionPhase::Loading;
    }

    pub(crate) fn finish_submission(&mut self) {
        self.phase = SubmissionPhase::Redirected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validator::{PASSWORDS_DO_NOT_MATCH, PASSWORD_TOO_SHORT};

    #[test]
    fn test_mount_state() {
        let state = FormState::new();
        assert!(!state.is_valid());
        assert!(state.touched().is_empty());
        assert_eq!(state.phase(), SubmissionPhase::Idle);
        assert!(!state.show_password());
        for field in Field::ALL {
            assert_eq!(state.visible_error(field), None);
        }
    }

    #[test]
    fn test_update_recomputes_errors() {
        let mut state = FormState::new();
        state.update_field(Field::FullName, "Jane".into()).unwrap();
        assert!(!state.errors().contains(Field::FullName));
        assert_eq!(state.errors(), &validate(state.data()));
    }

    #[test]
    fn test_password_change_revalidates_confirm() {
        let mut state = FormState::new();
        state.update_field(Field::ConfirmPassword, "password1".into()).unwrap();
        assert_eq!(
            state.errors().get(Field::ConfirmPassword),
            Some(PASSWORDS_DO_NOT_MATCH)
        );

        // Only password changes; confirmPassword's entry must follow.
        state.update_field(Field::Password, "password1".into()).unwrap();
        assert!(!state.errors().contains(Field::ConfirmPassword));

        state.update_field(Field::Password, "pass".into()).unwrap();
        assert_eq!(state.errors().get(Field::Password), Some(PASSWORD_TOO_SHORT));
        assert_eq!(
            state.errors().get(Field::ConfirmPassword),
            Some(PASSWORDS_DO_NOT_MATCH)
        );
    }

    #[test]
    fn test_touch_gates_display_only() {
        let mut state = FormState::new();
        let before = state.errors().clone();

        state.mark_touched(Field::Email);

        assert_eq!(state.errors(), &before);
        assert!(state.visible_error(Field::Email).is_some());
        assert!(state.visible_error(Field::FullName).is_none());
    }

    #[test]
    fn test_touched_valid_field_shows_nothing() {
        let mut state = FormState::new();
        state.update_field(Field::FullName, "Jane".into()).unwrap();
        state.mark_touched(Field::FullName);
        assert_eq!(state.visible_error(Field::FullName), None);
    }

    #[test]
    fn test_mark_all_touched() {
        let mut state = FormState::new();
        state.mark_all_touched();
        assert_eq!(state.touched().len(), Field::ALL.len());
    }

    #[test]
    fn test_toggle_show_password_is_shared() {
        let mut state = FormState::new();
        state.toggle_show_password();
        assert!(state.show_password());
        state.toggle_show_password();
        assert!(!state.show_password());
    }

    #[test]
    fn test_locked_while_loading() {
        let mut state = FormState::new();
        state.begin_loading();
        assert!(state.is_loading());

        let err = state.update_field(Field::FullName, "Jane".into()).unwrap_err();
        assert_eq!(err, FormError::SubmissionInFlight);
        assert_eq!(state.data().full_name, "");

        // Blur and visibility stay live
        state.mark_touched(Field::FullName);
        state.toggle_show_password();
        assert!(state.touched().is_touched(Field::FullName));
    }

    #[test]
    fn test_finish_submission() {
        let mut state = FormState::new();
        state.begin_loading();
        state.finish_submission();
        assert!(!state.is_loading());
        assert!(state.is_submitted());
        assert!(state.is_locked());
    }
}
