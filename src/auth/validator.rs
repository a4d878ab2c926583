//! Pure form checks run on submit. Every violated rule is collected so the
//! form can render all field errors at once; nothing here touches the network
//! or storage.

use crate::auth::types::{Credentials, RegistrationInput};
use regex::Regex;
use secrecy::ExposeSecret;
use std::{collections::BTreeMap, fmt, sync::LazyLock};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const DISPLAY_NAME_REQUIRED: &str = "Display name is required";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";

static EMAIL_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Form field an error is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    DisplayName,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::DisplayName => "display_name",
        }
    }
}

/// Field-level messages, at most one per field. Empty means the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.0.values().any(|value| *value == message)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.iter() {
            if !first {
                formatter.write_str("; ")?;
            }
            formatter.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

#[must_use]
pub fn validate_login(credentials: &Credentials) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if credentials.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    }

    if credentials.password.expose_secret().is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    }

    errors
}

#[must_use]
pub fn validate_registration(input: &RegistrationInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let password = input.password().expose_secret();

    if !valid_email(input.email().trim()) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    }

    if input.display_name().trim().is_empty() {
        errors.insert(Field::DisplayName, DISPLAY_NAME_REQUIRED);
    }

    if password != input.confirm_password().expose_secret() {
        errors.insert(Field::ConfirmPassword, PASSWORDS_MISMATCH);
    }

    errors
}
