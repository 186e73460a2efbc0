//! # Form Model
//!
//! Field identifiers, raw inputs and the `FormData` record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{FormError, FormResult};

/// Registration form field
///
/// Declaration order is render order and `ErrorMap` iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    Role,
    Terms,
}

impl Field {
    /// All fields, in render order
    pub const ALL: [Field; 7] = [
        Field::FullName,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Phone,
        Field::Role,
        Field::Terms,
    ];

    /// Wire name of the field (matches the input `name` attribute)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Phone => "phone",
            Field::Role => "role",
            Field::Terms => "terms",
        }
    }

    /// Input control kind
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::FullName => FieldKind::Text,
            Field::Email => FieldKind::Email,
            Field::Password | Field::ConfirmPassword => FieldKind::Password,
            Field::Phone => FieldKind::Tel,
            Field::Role => FieldKind::Select,
            Field::Terms => FieldKind::Checkbox,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Kind of input control backing a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Tel,
    Select,
    Checkbox,
}

impl FieldKind {
    /// HTML input type for this kind
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Tel => "tel",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }
}

/// Account role selected in the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Placeholder option, nothing chosen yet
    #[default]
    #[serde(rename = "")]
    Unselected,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Option value as submitted by the select control
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unselected => "",
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a raw select value
    pub fn parse(raw: &str) -> FormResult<Self> {
        match raw {
            "" => Ok(Role::Unselected),
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(FormError::InvalidChoice {
                field: Field::Role,
                value: other.to_string(),
            }),
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Role::Unselected)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw value coming from an input control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    /// Checkbox state
    Checked(bool),
    /// Text, email, password, tel or select value
    Text(String),
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        FieldInput::Text(value.into())
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}

impl From<bool> for FieldInput {
    fn from(checked: bool) -> Self {
        FieldInput::Checked(checked)
    }
}

/// Values currently held by the form
///
/// Text values are stored verbatim: no trimming, no coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub role: Role,
    pub terms: bool,
}

impl FormData {
    /// Empty form, as presented at mount
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw input to one field
    ///
    /// On error the record is left untouched.
    pub fn set(&mut self, field: Field, input: FieldInput) -> FormResult<()> {
        match (field, input) {
            (Field::Terms, FieldInput::Checked(checked)) => self.terms = checked,
            (Field::Terms, FieldInput::Text(_)) => {
                return Err(FormError::TypeMismatch {
                    field,
                    expected: "checkbox",
                })
            }
            (_, FieldInput::Checked(_)) => {
                return Err(FormError::TypeMismatch {
                    field,
                    expected: "text",
                })
            }
            (Field::Role, FieldInput::Text(raw)) => self.role = Role::parse(&raw)?,
            (Field::FullName, FieldInput::Text(value)) => self.full_name = value,
            (Field::Email, FieldInput::Text(value)) => self.email = value,
            (Field::Password, FieldInput::Text(value)) => self.password = value,
            (Field::ConfirmPassword, FieldInput::Text(value)) => self.confirm_password = value,
            (Field::Phone, FieldInput::Text(value)) => self.phone = value,
        }
        Ok(())
    }

    /// Current value of one field as a raw input
    pub fn get(&self, field: Field) -> FieldInput {
        match field {
            Field::FullName => FieldInput::text(&self.full_name),
            Field::Email => FieldInput::text(&self.email),
            Field::Password => FieldInput::text(&self.password),
            Field::ConfirmPassword => FieldInput::text(&self.confirm_password),
            Field::Phone => FieldInput::text(&self.phone),
            Field::Role => FieldInput::text(self.role.as_str()),
            Field::Terms => FieldInput::Checked(self.terms),
        }
    }
}
