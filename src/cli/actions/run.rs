use crate::cli::actions::{health, login, register, session, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Register(args) => register::execute(args).await,
        Action::Status(globals) => session::status(&globals),
        Action::Logout(globals) => session::logout(&globals),
        Action::Health(globals) => health::execute(&globals).await,
    }
}
