//! Maps validated CLI matches to an `Action`.

use crate::cli::{
    actions::{login, register, Action},
    commands::auth::{CMD_HEALTH, CMD_LOGIN, CMD_LOGOUT, CMD_REGISTER, CMD_STATUS},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the global options are invalid or no known subcommand
/// was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::parse(matches)?;

    match matches.subcommand() {
        Some((CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args::parse(sub_m, globals))),
        Some((CMD_REGISTER, sub_m)) => Ok(Action::Register(register::Args::parse(sub_m, globals))),
        Some((CMD_STATUS, _)) => Ok(Action::Status(globals)),
        Some((CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((CMD_HEALTH, _)) => Ok(Action::Health(globals)),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
