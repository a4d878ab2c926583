use crate::auth::validator::FieldErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing a storage area.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid stored token pair: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Coarse error classes surfaced to the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field-scoped, fixed by editing the form.
    Validation,
    /// Endpoint or network failure, fixed by retrying.
    Transport,
    /// Local storage failure, reported as a failed login.
    Storage,
}

impl AuthError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_)
            | Self::Network(_)
            | Self::Timeout(_)
            | Self::Http { .. }
            | Self::Parse(_) => ErrorKind::Transport,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Form-level message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) => {
                "Signed in, but your session could not be saved. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
