//! # Form Validator
//!
//! Pure mapping from `FormData` to the set of failing fields.
//!
//! ## Invariants
//! - `validate` is total and side-effect free
//! - At most one message per field, first failing rule wins
//! - Absence of a field in the map means the field passes

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::model::{Field, FormData};

pub const FULL_NAME_REQUIRED: &str = "Full Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is not valid";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Phone number contains invalid characters";
pub const ROLE_REQUIRED: &str = "Role is required";
pub const TERMS_REQUIRED: &str = "You must accept the terms";

/// Minimum password length, in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Browser (ECMAScript) whitespace set, used in place of the Unicode
/// `White_Space` property: includes U+FEFF, excludes U+0085.
const WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `local@domain.tld`, unanchored: some non-whitespace on each side of `@` and `.`
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        let visible = format!("[^{WHITESPACE}]+");
        Regex::new(&format!(r"{visible}@{visible}\.{visible}")).expect("email pattern compiles")
    })
}

/// Digits, `+`, parentheses, whitespace and `-` only
fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| {
        Regex::new(&format!(r"^[0-9+(){WHITESPACE}-]+$")).expect("phone pattern compiles")
    })
}

/// Per-field validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<Field, &'static str>,
}

impl ErrorMap {
    /// Message for a failing field
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Overall validity: no field is failing
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in render order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, *msg))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

/// Validate every field of the form
pub fn validate(data: &FormData) -> ErrorMap {
    let mut errors = ErrorMap::default();

    let checks = [
        (Field::FullName, check_full_name(data)),
        (Field::Email, check_email(data)),
        (Field::Password, check_password(data)),
        (Field::ConfirmPassword, check_confirm_password(data)),
        (Field::Phone, check_phone(data)),
        (Field::Role, check_role(data)),
        (Field::Terms, check_terms(data)),
    ];

    for (field, failure) in checks {
        if let Some(message) = failure {
            errors.insert(field, message);
        }
    }

    errors
}

fn check_full_name(data: &FormData) -> Option<&'static str> {
    data.full_name.is_empty().then_some(FULL_NAME_REQUIRED)
}

fn check_email(data: &FormData) -> Option<&'static str> {
    if data.email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !email_pattern().is_match(&data.email) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

fn check_password(data: &FormData) -> Option<&'static str> {
    if data.password.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if data.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        Some(PASSWORD_TOO_SHORT)
    } else {
        None
    }
}

/// Plain equality, evaluated even when `password` itself fails.
fn check_confirm_password(data: &FormData) -> Option<&'static str> {
    (data.password != data.confirm_password).then_some(PASSWORDS_DO_NOT_MATCH)
}

fn check_phone(data: &FormData) -> Option<&'static str> {
    if data.phone.is_empty() {
        Some(PHONE_REQUIRED)
    } else if !phone_pattern().is_match(&data.phone) {
        Some(PHONE_INVALID)
    } else {
        None
    }
}

fn check_role(data: &FormData) -> Option<&'static str> {
    (!data.role.is_selected()).then_some(ROLE_REQUIRED)
}

fn check_terms(data: &FormData) -> Option<&'static str> {
    (!data.terms).then_some(TERMS_REQUIRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::model::Role;

    fn valid_data() -> FormData {
        FormData {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            phone: "+1 555-123-4567".into(),
            role: Role::User,
            terms: true,
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_data()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&FormData::new());
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(Field::FullName), Some(FULL_NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        assert_eq!(errors.get(Field::Phone), Some(PHONE_REQUIRED));
        assert_eq!(errors.get(Field::Role), Some(ROLE_REQUIRED));
        assert_eq!(errors.get(Field::Terms), Some(TERMS_REQUIRED));
        // "" == "", so no mismatch yet
        assert!(!errors.contains(Field::ConfirmPassword));
    }

    #[test]
    fn test_email_patterns() {
        let mut data = valid_data();
        for bad in ["jane", "jane@example", "@example.com", "jane @example.com"] {
            data.email = bad.into();
            assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_INVALID), "{bad}");
        }
        for good in ["a@b.c", "first.last@sub.example.org", "x y@b.c"] {
            data.email = good.into();
            assert!(!validate(&data).contains(Field::Email), "{good}");
        }
    }

    #[test]
    fn test_password_length_boundary() {
        let mut data = valid_data();
        data.password = "1234567".into();
        data.confirm_password = "1234567".into();
        assert_eq!(validate(&data).get(Field::Password), Some(PASSWORD_TOO_SHORT));

        data.password = "12345678".into();
        data.confirm_password = "12345678".into();
        assert!(validate(&data).is_empty());
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        let mut data = valid_data();
        data.password = "ééééééé".into();
        data.confirm_password = data.password.clone();
        assert_eq!(validate(&data).get(Field::Password), Some(PASSWORD_TOO_SHORT));

        // four astral characters are eight UTF-16 units
        data.password = "😀😀😀😀".into();
        data.confirm_password = data.password.clone();
        assert!(!validate(&data).contains(Field::Password));

        data.password = "😀😀😀".into();
        data.confirm_password = data.password.clone();
        assert_eq!(validate(&data).get(Field::Password), Some(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn test_confirm_password_checked_against_empty_password() {
        let mut data = valid_data();
        data.password = String::new();
        data.confirm_password = "something".into();
        let errors = validate(&data);
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORDS_DO_NOT_MATCH));
    }

    #[test]
    fn test_phone_characters() {
        let mut data = valid_data();
        for good in ["5551234", "(555) 123-4567", "+44 20 7946 0958"] {
            data.phone = good.into();
            assert!(!validate(&data).contains(Field::Phone), "{good}");
        }
        for bad in ["555-CALL-NOW", "555.123.4567", "#5551234"] {
            data.phone = bad.into();
            assert_eq!(validate(&data).get(Field::Phone), Some(PHONE_INVALID), "{bad}");
        }
    }

    #[test]
    fn test_whitespace_follows_browser_set() {
        let mut data = valid_data();

        // U+0085 is not whitespace in a browser
        data.phone = "555\u{0085}1234".into();
        assert_eq!(validate(&data).get(Field::Phone), Some(PHONE_INVALID));
        data.email = "jane\u{0085}@example.com".into();
        assert!(!validate(&data).contains(Field::Email));

        // U+FEFF is
        data.phone = "555\u{FEFF}1234".into();
        assert!(!validate(&data).contains(Field::Phone));
        data.email = "jane\u{FEFF}@example.com".into();
        assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_INVALID));

        data.phone = "555\t123\u{A0}4567".into();
        assert!(!validate(&data).contains(Field::Phone));
    }

    #[test]
    fn test_terms_required() {
        let mut data = valid_data();
        data.terms = false;
        let errors = validate(&data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Terms), Some(TERMS_REQUIRED));
    }

    #[test]
    fn test_error_map_serializes_by_field_name() {
        let json = serde_json::to_value(validate(&FormData::new())).unwrap();
        assert_eq!(json["fullName"], FULL_NAME_REQUIRED);
        assert_eq!(json["terms"], TERMS_REQUIRED);
        assert!(json.get("confirmPassword").is_none());
    }
}
