pub mod health;
pub mod login;
pub mod register;
pub mod session;

// Single dispatch point for `Action` lives in `run`.
mod run;

use crate::{
    auth::{AuthController, AuthState, Submitter},
    cli::globals::GlobalArgs,
};
use anyhow::{anyhow, Result};

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
    Status(GlobalArgs),
    Logout(GlobalArgs),
    Health(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Summarises a finished submit. Field errors go to stderr one per line;
/// anything but an authenticated state becomes an error.
fn report<S: Submitter>(controller: &mut AuthController<S>) -> Result<String> {
    let navigation = controller.take_navigation();

    match controller.state() {
        AuthState::Authenticated { scope } => {
            let signed_in = format!("Signed in, tokens kept in {scope} storage");
            Ok(match navigation {
                Some(navigation) => format!("{signed_in}\nRedirecting to {}", navigation.path()),
                None => signed_in,
            })
        }
        AuthState::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {message}", field.as_str());
            }
            Err(anyhow!("{} invalid field(s), nothing was sent", errors.len()))
        }
        AuthState::Failed(err) => Err(anyhow!(err.user_message())),
        state => Err(anyhow!("unexpected state after submit: {state:?}")),
    }
}
