//! Local session inspection. Neither action talks to the API.

use crate::{auth::StorageScope, cli::globals::GlobalArgs};
use anyhow::{Context, Result};

/// Which area holds the tokens, if any. Token values are never shown.
///
/// # Errors
/// Returns an error if an area cannot be read or holds an invalid pair.
pub fn describe(globals: &GlobalArgs) -> Result<Option<StorageScope>> {
    let store = globals.token_store();
    let scope = store
        .load_scoped()
        .context("failed to read stored session")?
        .map(|(_, scope)| scope);

    Ok(scope)
}

/// Execute the status action.
/// # Errors
/// Returns an error if the stored session cannot be read.
pub fn status(globals: &GlobalArgs) -> Result<()> {
    match describe(globals)? {
        Some(scope) => println!("Signed in ({scope} storage)"),
        None => println!("Not signed in"),
    }

    Ok(())
}

/// Execute the logout action.
/// # Errors
/// Returns an error if either storage area cannot be cleared.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let mut controller = globals.controller()?;
    controller.logout().context("failed to clear stored session")?;

    println!("Signed out");

    Ok(())
}
