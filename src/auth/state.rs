//! Auth session controller. It owns both form drafts, the token store and the
//! observable `AuthState`, and moves through
//! `Idle -> Validating -> Invalid | Submitting -> Authenticated | Failed`.
//!
//! Submission is split in two so an event loop can keep running while a
//! request is in flight: `begin_submit` validates and hands out a snapshot,
//! `complete` applies the submitter's result. `submit` chains both around the
//! submitter call. At most one submission is in flight; duplicate submits are
//! ignored while `Submitting`.

use crate::auth::{
    client::Submitter,
    error::AuthError,
    storage::TokenStore,
    types::{AuthMode, Credentials, Navigation, RegistrationInput, StorageScope, TokenPair},
    validator::{self, FieldErrors},
};
use secrecy::SecretString;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub enum AuthState {
    Idle,
    Validating,
    /// Field errors from the last submit; no request was sent.
    Invalid(FieldErrors),
    Submitting,
    Authenticated {
        scope: StorageScope,
    },
    /// The last attempt failed; the form is editable again.
    Failed(AuthError),
}

impl AuthState {
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Snapshot of a validated draft handed to the submitter.
#[derive(Debug)]
pub enum Submission {
    Login(Credentials),
    Register(RegistrationInput),
}

impl Submission {
    /// Storage scope for the pair this submission yields. Registration always
    /// persists; login persists only with "remember me".
    #[must_use]
    pub const fn scope(&self) -> StorageScope {
        match self {
            Self::Login(credentials) if credentials.remember_me => StorageScope::Persistent,
            Self::Login(_) => StorageScope::Session,
            Self::Register(_) => StorageScope::Persistent,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        match self {
            Self::Login(_) => AuthMode::Login,
            Self::Register(_) => AuthMode::Register,
        }
    }

    /// Sends the snapshot through `submitter`.
    ///
    /// # Errors
    /// Returns whatever the submitter reports.
    pub async fn send<S: Submitter>(&self, submitter: &S) -> Result<TokenPair, AuthError> {
        match self {
            Self::Login(credentials) => submitter.submit_login(credentials).await,
            Self::Register(input) => submitter.submit_registration(input).await,
        }
    }
}

pub struct AuthController<S> {
    submitter: S,
    store: TokenStore,
    mode: AuthMode,
    login: Credentials,
    register: RegistrationInput,
    state: AuthState,
    navigation: Option<Navigation>,
}

impl<S: Submitter> AuthController<S> {
    pub fn new(submitter: S, store: TokenStore) -> Self {
        Self {
            submitter,
            store,
            mode: AuthMode::default(),
            login: Credentials::default(),
            register: RegistrationInput::default(),
            state: AuthState::Idle,
            navigation: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub const fn login_form(&self) -> &Credentials {
        &self.login
    }

    #[must_use]
    pub const fn registration_form(&self) -> &RegistrationInput {
        &self.register
    }

    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }

    #[must_use]
    pub const fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Switches the active tab and returns to `Idle`. Displayed errors are
    /// dropped and secrets typed into the other tab are wiped. Stored tokens
    /// are left alone.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        if self.mode == mode || self.state.is_submitting() {
            return;
        }
        match self.mode {
            AuthMode::Login => self.login.wipe_secrets(),
            AuthMode::Register => self.register.wipe_secrets(),
        }
        self.mode = mode;
        self.state = AuthState::Idle;
    }

    pub fn set_login_email(&mut self, email: impl Into<String>) {
        self.login.email = email.into();
        self.touch();
    }

    pub fn set_login_password(&mut self, password: impl Into<String>) {
        let password: String = password.into();
        self.login.password = SecretString::from(password);
        self.touch();
    }

    pub fn set_remember_me(&mut self, remember_me: bool) {
        self.login.remember_me = remember_me;
        self.touch();
    }

    /// Also recomputes the display name until it has been edited manually.
    pub fn set_register_email(&mut self, email: impl Into<String>) {
        self.register.set_email(email);
        self.touch();
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.register.set_display_name(display_name);
        self.touch();
    }

    pub fn set_register_password(&mut self, password: impl Into<String>) {
        self.register.set_password(password);
        self.touch();
    }

    pub fn set_confirm_password(&mut self, confirm_password: impl Into<String>) {
        self.register.set_confirm_password(confirm_password);
        self.touch();
    }

    /// Any edit after a failed or invalid attempt returns the form to `Idle`.
    fn touch(&mut self) {
        if matches!(self.state, AuthState::Invalid(_) | AuthState::Failed(_)) {
            self.state = AuthState::Idle;
        }
    }

    /// Validates the active form. Returns the submission to send when the form
    /// is valid, `None` when it is invalid or a submission is already pending.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        match self.state {
            AuthState::Submitting => {
                debug!("submission already in flight, ignoring submit");
                return None;
            }
            AuthState::Authenticated { .. } => {
                debug!("already authenticated, ignoring submit");
                return None;
            }
            _ => {}
        }

        self.state = AuthState::Validating;

        let errors = match self.mode {
            AuthMode::Login => validator::validate_login(&self.login),
            AuthMode::Register => validator::validate_registration(&self.register),
        };

        if !errors.is_empty() {
            debug!(fields = errors.len(), "form validation failed");
            self.state = AuthState::Invalid(errors);
            return None;
        }

        self.state = AuthState::Submitting;

        Some(match self.mode {
            AuthMode::Login => Submission::Login(self.login.snapshot()),
            AuthMode::Register => Submission::Register(self.register.snapshot()),
        })
    }

    /// Applies the submitter's result for `submission`.
    pub fn complete(
        &mut self,
        submission: Submission,
        result: Result<TokenPair, AuthError>,
    ) -> &AuthState {
        if !self.state.is_submitting() {
            warn!("submission result arrived while not submitting, ignoring");
            return &self.state;
        }

        let scope = submission.scope();
        drop(submission);

        match result {
            Ok(tokens) => match self.store.save(&tokens, scope) {
                Ok(()) => {
                    info!(%scope, "authenticated");
                    self.login = Credentials::default();
                    self.register = RegistrationInput::default();
                    self.state = AuthState::Authenticated { scope };
                    self.navigation = Some(Navigation::Profile);
                }
                Err(err) => {
                    error!("failed to store token pair: {}", err);
                    self.wipe_secrets();
                    self.state = AuthState::Failed(AuthError::Storage(err));
                }
            },
            Err(err) => {
                warn!("authentication failed: {}", err);
                self.wipe_secrets();
                self.state = AuthState::Failed(err);
            }
        }

        &self.state
    }

    /// Validates, submits and stores in one go.
    pub async fn submit(&mut self) -> &AuthState {
        let Some(submission) = self.begin_submit() else {
            return &self.state;
        };

        let result = submission.send(&self.submitter).await;

        self.complete(submission, result)
    }

    /// Yields the pending navigation once.
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }

    /// Hydrates the state from a previously stored pair without navigating.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read.
    pub fn restore(&mut self) -> Result<Option<StorageScope>, AuthError> {
        if self.state.is_submitting() {
            return Ok(None);
        }

        let scope = self.store.load_scoped()?.map(|(_, scope)| scope);
        if let Some(scope) = scope {
            debug!(%scope, "restored stored session");
            self.state = AuthState::Authenticated { scope };
        }

        Ok(scope)
    }

    /// Drops the stored pair from both areas and returns to `Idle`.
    ///
    /// # Errors
    /// Returns an error if either area cannot be cleared.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.navigation = None;
        self.state = AuthState::Idle;
        info!("signed out");
        Ok(())
    }

    fn wipe_secrets(&mut self) {
        self.login.wipe_secrets();
        self.register.wipe_secrets();
    }
}
