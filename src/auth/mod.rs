//! Auth feature covering form validation, credential submission, token
//! persistence and the session controller that ties them together. This module
//! sits on a security boundary: it must never log passwords or token material.
//!
//! Flow Overview: the controller validates the active form on submit, hands a
//! snapshot of the draft to the submitter, stores the returned pair under the
//! scope picked by the user and queues a single navigation to the profile.

pub mod client;
pub mod error;
pub mod state;
pub mod storage;
pub mod types;
pub mod validator;

pub use client::{HttpSubmitter, Submitter};
pub use error::{AuthError, ErrorKind, StorageError};
pub use state::{AuthController, AuthState, Submission};
pub use storage::{FileArea, MemoryArea, StorageArea, TokenStore};
pub use types::{
    AuthMode, Credentials, DisplayNameMode, Navigation, RegistrationInput, StorageScope,
    TokenPair, TOKEN_STORAGE_KEY,
};
pub use validator::{Field, FieldErrors};
