//! Event replay session
//!
//! Mounts one `RegistrationForm` wired to a `Router` and a `ThemeController`
//! and applies UI events to it, one at a time.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::{Router, SystemColorScheme, ThemeController};
use crate::config::AppConfig;
use crate::form::{FieldInput, RegistrationForm, SubmitOutcome};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{CliError, CliResult};

/// One UI event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionEvent {
    Change { field: String, value: FieldInput },
    Blur { field: String },
    Submit,
    TogglePassword,
    ToggleTheme,
    SystemTheme { dark: bool },
    Wait { ms: u64 },
    Unmount,
}

impl SessionEvent {
    pub fn from_value(value: Value) -> CliResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

pub struct Session {
    form: Option<RegistrationForm>,
    router: Arc<Router>,
    system: SystemColorScheme,
    theme: ThemeController,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let router = Arc::new(Router::new());
        let system = SystemColorScheme::new(config.prefers_dark);
        let theme = ThemeController::new(&system);
        let form = RegistrationForm::mount_with_delay(router.clone(), config.submit_delay());

        Self {
            form: Some(form),
            router,
            system,
            theme,
        }
    }

    /// Apply one event and describe the resulting screen
    pub async fn apply(&mut self, event: SessionEvent) -> CliResult<Value> {
        let mut outcome = None;

        match event {
            SessionEvent::Change { field, value } => self.form()?.handle_change(&field, value)?,
            SessionEvent::Blur { field } => self.form()?.handle_blur(&field)?,
            SessionEvent::Submit => {
                outcome = Some(self.form_mut()?.handle_submit()?);
            }
            SessionEvent::TogglePassword => self.form()?.toggle_password_visibility()?,
            SessionEvent::ToggleTheme => {
                self.theme.toggle();
            }
            SessionEvent::SystemTheme { dark } => {
                self.system.set_prefers_dark(dark);
                self.theme.sync_with_system();
            }
            SessionEvent::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
            SessionEvent::Unmount => {
                if let Some(form) = self.form.take() {
                    form.unmount();
                }
            }
        }

        let mut screen = self.screen()?;
        if let Some(outcome) = outcome {
            screen["outcome"] = outcome_json(&outcome);
        }
        Ok(screen)
    }

    /// Let a pending submission complete, then describe the final screen
    pub async fn finish(&mut self) -> CliResult<Value> {
        if let Some(form) = self.form.as_mut() {
            form.settle().await;
        }
        let screen = self.screen()?;
        log_event_with_fields(
            Event::SessionComplete,
            &[("route", self.router.current_route().as_str())],
        );
        Ok(screen)
    }

    fn form(&self) -> CliResult<&RegistrationForm> {
        self.form.as_ref().ok_or_else(CliError::form_unmounted)
    }

    fn form_mut(&mut self) -> CliResult<&mut RegistrationForm> {
        self.form.as_mut().ok_or_else(CliError::form_unmounted)
    }

    fn screen(&self) -> CliResult<Value> {
        let view = match &self.form {
            Some(form) => serde_json::to_value(form.render()?)?,
            None => Value::Null,
        };

        Ok(json!({
            "mounted": self.form.is_some(),
            "view": view,
            "route": self.router.current_path(),
            "theme": self.theme.current().as_str(),
        }))
    }
}

fn outcome_json(outcome: &SubmitOutcome) -> Value {
    match outcome {
        SubmitOutcome::Blocked { failing } => json!({"result": "blocked", "failing": failing}),
        SubmitOutcome::Accepted { cycle, destination } => json!({
            "result": "accepted",
            "cycle": cycle.to_string(),
            "destination": destination.path(),
        }),
        SubmitOutcome::Ignored => json!({"result": "ignored"}),
    }
}
