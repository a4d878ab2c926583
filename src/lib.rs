//! # Joovi (authentication client)
//!
//! `joovi` drives the Joovi login and registration flow from the client side:
//! form drafts are validated locally, credentials are exchanged for an
//! access/refresh token pair against the Joovi API, and the pair is persisted
//! under the storage policy the user picked.
//!
//! ## Flow
//!
//! 1. **Validate:** the active form (login or register) is checked on submit;
//!    every violated rule is reported at once and nothing leaves the process.
//! 2. **Submit:** `POST /users/login` or `POST /users/register` with only the
//!    fields the API needs. `confirm_password` is never transmitted.
//! 3. **Store:** the returned pair is written under `joovi_auth_tokens` in
//!    exactly one storage area. "Remember me" selects the persistent area,
//!    otherwise the session area is used. Registration always persists.
//! 4. **Navigate:** a successful flow queues a single navigation to `/profile`.
//!
//! Passwords are held as `SecretString` and tokens are redacted from `Debug`
//! output; neither is ever logged.

pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
