//! # Render Contract
//!
//! What the view layer needs to draw the form: per-field value, visible
//! error and disabled flag, plus the submit control and the success panel.

use serde::Serialize;

use super::model::{Field, FieldInput, FieldKind};
use super::state::FormState;

pub const SUCCESS_TITLE: &str = "Thank you for registering!";
pub const SUCCESS_MESSAGE: &str = "Your account has been created successfully.";
pub const SUBMIT_LABEL: &str = "Register";
pub const SUBMIT_LABEL_LOADING: &str = "Registering...";

/// Rendered form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Form(FormView),
    Success { title: &'static str, message: &'static str },
}

impl View {
    pub fn render(state: &FormState) -> Self {
        if state.is_submitted() {
            View::Success {
                title: SUCCESS_TITLE,
                message: SUCCESS_MESSAGE,
            }
        } else {
            View::Form(FormView::render(state))
        }
    }

    pub fn as_form(&self) -> Option<&FormView> {
        match self {
            View::Form(form) => Some(form),
            View::Success { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    /// Label of the shared password show/hide toggle
    pub password_toggle: &'static str,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub is_loading: bool,
    pub is_valid: bool,
}

impl FormView {
    pub fn render(state: &FormState) -> Self {
        let fields = Field::ALL
            .into_iter()
            .map(|field| FieldView::render(state, field))
            .collect();

        let is_loading = state.is_loading();
        Self {
            fields,
            password_toggle: if state.show_password() { "Hide" } else { "Show" },
            submit_label: if is_loading {
                SUBMIT_LABEL_LOADING
            } else {
                SUBMIT_LABEL
            },
            submit_disabled: is_loading,
            is_loading,
            is_valid: state.is_valid(),
        }
    }

    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }

    /// Messages currently on screen, in render order
    pub fn visible_errors(&self) -> Vec<(Field, &'static str)> {
        self.fields
            .iter()
            .filter_map(|view| view.error.map(|msg| (view.field, msg)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub value: FieldInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub disabled: bool,
}

impl FieldView {
    fn render(state: &FormState, field: Field) -> Self {
        let kind = field.kind();
        let input_type = match kind {
            FieldKind::Password if state.show_password() => FieldKind::Text.input_type(),
            other => other.input_type(),
        };

        Self {
            field,
            label: label(field),
            placeholder: placeholder(field),
            input_type,
            value: state.data().get(field),
            error: state.visible_error(field),
            disabled: state.is_loading(),
        }
    }
}

fn label(field: Field) -> &'static str {
    match field {
        Field::FullName => "Full Name",
        Field::Email => "Email Address",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm Password",
        Field::Phone => "Phone Number",
        Field::Role => "Role",
        Field::Terms => "I agree to the Terms & Conditions",
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::FullName => "Enter your full name",
        Field::Email => "Enter your email",
        Field::Password => "Enter your password",
        Field::ConfirmPassword => "Confirm your password",
        Field::Phone => "Enter your phone number",
        Field::Role => "Select a role",
        Field::Terms => "",
    }
}
