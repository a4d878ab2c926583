//! Client wrappers for the Joovi auth endpoints. The submitter only sends the
//! fields each endpoint needs and maps every failure into an `AuthError`; it
//! never touches token storage, that happens in the controller once a pair is
//! received.

use crate::{
    auth::{
        error::AuthError,
        types::{Credentials, LoginRequest, RegisterRequest, RegistrationInput, TokenPair},
    },
    APP_USER_AGENT,
};
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};
use url::Url;

pub const LOGIN_PATH: &str = "/users/login";
pub const REGISTER_PATH: &str = "/users/register";
pub const HEALTH_PATH: &str = "/health";

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to the form.
const MAX_ERROR_CHARS: usize = 200;

/// Exchanges credentials for a token pair. The health probe is not part of
/// the contract, see [`HttpSubmitter::health`].
pub trait Submitter {
    fn submit_login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenPair, AuthError>> + Send;

    fn submit_registration(
        &self,
        input: &RegistrationInput,
    ) -> impl Future<Output = Result<TokenPair, AuthError>> + Send;
}

/// `reqwest` backed submitter talking to the Joovi API.
#[derive(Clone, Debug)]
pub struct HttpSubmitter {
    client: Client,
    base_url: String,
}

impl HttpSubmitter {
    /// # Errors
    /// Returns `AuthError::Config` if `base_url` is not an http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let url = Url::parse(base_url.trim())
            .map_err(|err| AuthError::Config(format!("Invalid API base URL {base_url}: {err}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AuthError::Config(format!(
                "Unsupported API base URL scheme: {}",
                url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| AuthError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes `GET /health`.
    ///
    /// # Errors
    /// Returns a transport error when the API is unreachable or unhealthy.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<(), AuthError> {
        let url = build_url_with_base(&self.base_url, HEALTH_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let url = build_url_with_base(&self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }
}

impl Submitter for HttpSubmitter {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn submit_login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        let request = LoginRequest {
            email: credentials.email.trim(),
            password: credentials.password.expose_secret(),
        };

        self.post_json(LOGIN_PATH, &request).await
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn submit_registration(&self, input: &RegistrationInput) -> Result<TokenPair, AuthError> {
        let request = RegisterRequest {
            email: input.email().trim(),
            password: input.password().expose_secret(),
            display_name: input.display_name().trim(),
        };

        self.post_json(REGISTER_PATH, &request).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps `reqwest` failures into transport errors with timeout detection.
fn map_request_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AuthError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        });
    }

    let body = response.bytes().await.map_err(map_request_error)?;
    serde_json::from_slice::<T>(&body)
        .map_err(|err| AuthError::Parse(format!("Failed to decode response: {err}")))
}

/// Handles responses without a meaningful body.
async fn handle_empty_response(response: Response) -> Result<(), AuthError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
