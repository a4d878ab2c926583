//! Data model shared by the auth feature: form drafts, the token pair, storage
//! scopes and the request payloads sent to the API. Secrets are held as
//! `SecretString` and token values are redacted from `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which the JSON-encoded token pair is stored.
pub const TOKEN_STORAGE_KEY: &str = "joovi_auth_tokens";

/// Storage area holding the token pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Cleared when the session ends.
    Session,
    /// Survives restarts.
    Persistent,
}

impl StorageScope {
    /// The scope that must be empty whenever this one holds the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Session => Self::Persistent,
            Self::Persistent => Self::Session,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Persistent => "persistent",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Access/refresh token combination issued by the API. Values are opaque.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Active form tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Destination signalled once after a successful authentication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Profile,
}

impl Navigation {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Profile => "/profile",
        }
    }
}

/// Login form draft.
#[derive(Debug, Default)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        let password: String = password.into();
        Self {
            email: email.into(),
            password: SecretString::from(password),
            remember_me,
        }
    }

    /// Copies the draft for an in-flight submission.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            email: self.email.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            remember_me: self.remember_me,
        }
    }

    pub(crate) fn wipe_secrets(&mut self) {
        self.password = SecretString::default();
    }
}

/// Whether the display name still follows the email's local part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayNameMode {
    #[default]
    Auto,
    Manual,
}

/// Registration form draft.
///
/// While the display name is in [`DisplayNameMode::Auto`], every email change
/// recomputes it from the part of the email before `@`. The first manual edit
/// switches to [`DisplayNameMode::Manual`] for the lifetime of the draft.
#[derive(Debug, Default)]
pub struct RegistrationInput {
    email: String,
    password: SecretString,
    confirm_password: SecretString,
    display_name: String,
    display_name_mode: DisplayNameMode,
}

impl RegistrationInput {
    /// Builds a complete draft. A `Some` display name counts as a manual edit.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        let mut input = Self::default();
        input.set_email(email);
        input.set_password(password);
        input.set_confirm_password(confirm_password);
        if let Some(name) = display_name {
            input.set_display_name(name);
        }
        input
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    #[must_use]
    pub fn confirm_password(&self) -> &SecretString {
        &self.confirm_password
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn display_name_mode(&self) -> DisplayNameMode {
        self.display_name_mode
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        if self.display_name_mode == DisplayNameMode::Auto {
            self.display_name = derive_display_name(&self.email);
        }
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
        self.display_name_mode = DisplayNameMode::Manual;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        let password: String = password.into();
        self.password = SecretString::from(password);
    }

    pub fn set_confirm_password(&mut self, confirm_password: impl Into<String>) {
        let confirm_password: String = confirm_password.into();
        self.confirm_password = SecretString::from(confirm_password);
    }

    pub(crate) fn snapshot(&self) -> Self {
        Self {
            email: self.email.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            confirm_password: SecretString::from(
                self.confirm_password.expose_secret().to_owned(),
            ),
            display_name: self.display_name.clone(),
            display_name_mode: self.display_name_mode,
        }
    }

    pub(crate) fn wipe_secrets(&mut self) {
        self.password = SecretString::default();
        self.confirm_password = SecretString::default();
    }
}

/// Local part of an email address, empty when there is no `@`.
#[must_use]
pub fn derive_display_name(email: &str) -> String {
    email
        .trim()
        .split_once('@')
        .map(|(local, _)| local.to_string())
        .unwrap_or_default()
}

/// Body of `POST /users/login`. Must never be logged.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /users/register`. `confirm_password` is never sent.
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub display_name: &'a str,
}
