//! # Registration Form
//!
//! The mounted form instance: sole owner of its `FormState`, entry point for
//! every UI event, and responsible for revoking a pending submission when it
//! is torn down.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::observability::{log_event, log_event_with_fields, Event};

use super::errors::FormResult;
use super::model::{Field, FieldInput};
use super::navigator::Navigator;
use super::state::FormState;
use super::submission::{lock_state, SharedFormState, SubmissionController, SubmitOutcome};
use super::view::View;

pub struct RegistrationForm {
    state: SharedFormState,
    controller: SubmissionController,
    mounted: bool,
}

impl RegistrationForm {
    /// Mount an empty form with the default submission delay
    pub fn mount(navigator: Arc<dyn Navigator>) -> Self {
        Self::from_parts(SubmissionController::new(navigator))
    }

    /// Mount an empty form with a custom submission delay
    pub fn mount_with_delay(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        Self::from_parts(SubmissionController::with_delay(navigator, delay))
    }

    fn from_parts(controller: SubmissionController) -> Self {
        log_event_with_fields(
            Event::FormMounted,
            &[("delay_ms", controller.delay().as_millis().to_string().as_str())],
        );
        Self {
            state: Arc::new(Mutex::new(FormState::new())),
            controller,
            mounted: true,
        }
    }

    /// Input change event
    pub fn handle_change(&self, name: &str, input: impl Into<FieldInput>) -> FormResult<()> {
        let result = name.parse::<Field>().and_then(|field| {
            let mut state = lock_state(&self.state)?;
            state.update_field(field, input.into())?;
            Ok(state.is_valid())
        });

        match result {
            Ok(valid) => {
                log_event_with_fields(
                    Event::FieldUpdated,
                    &[("field", name), ("form_valid", if valid { "true" } else { "false" })],
                );
                Ok(())
            }
            Err(e) => {
                log_event_with_fields(Event::FieldRejected, &[("code", e.code()), ("field", name)]);
                Err(e)
            }
        }
    }

    /// Blur event
    pub fn handle_blur(&self, name: &str) -> FormResult<()> {
        let field = name.parse::<Field>()?;
        lock_state(&self.state)?.mark_touched(field);
        log_event_with_fields(Event::FieldTouched, &[("field", field.as_str())]);
        Ok(())
    }

    /// Show/Hide button shared by both password inputs
    pub fn toggle_password_visibility(&self) -> FormResult<()> {
        lock_state(&self.state)?.toggle_show_password();
        Ok(())
    }

    /// Submit event
    ///
    /// There is no page navigation to suppress: the only effect of a submit
    /// is the controller's transition.
    pub fn handle_submit(&mut self) -> FormResult<SubmitOutcome> {
        self.controller.submit(&self.state)
    }

    /// Current render contract
    pub fn render(&self) -> FormResult<View> {
        Ok(View::render(&*lock_state(&self.state)?))
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FormResult<FormState> {
        Ok(lock_state(&self.state)?.clone())
    }

    pub fn is_submission_pending(&self) -> bool {
        self.controller.is_pending()
    }

    /// Wait for a pending submission to complete; `true` if it was applied
    pub async fn settle(&mut self) -> bool {
        self.controller.settle().await
    }

    /// Tear the form down, revoking any pending completion
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.controller.cancel_pending(&self.state);
        log_event(Event::FormUnmounted);
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        self.teardown();
    }
}
