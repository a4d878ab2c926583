use crate::cli::{
    actions::report,
    commands::auth::{ARG_EMAIL, ARG_PASSWORD, ARG_REMEMBER_ME},
    globals::GlobalArgs,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl Args {
    /// Missing values become empty fields so validation reports them.
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches, globals: GlobalArgs) -> Self {
        Self {
            globals,
            email: matches.get_one::<String>(ARG_EMAIL).cloned().unwrap_or_default(),
            password: SecretString::from(
                matches
                    .get_one::<String>(ARG_PASSWORD)
                    .cloned()
                    .unwrap_or_default(),
            ),
            remember_me: matches.get_flag(ARG_REMEMBER_ME),
        }
    }
}

/// Execute the login action.
/// # Errors
/// Returns an error if validation, the request, or storing the tokens fails.
pub async fn execute(args: Args) -> Result<()> {
    let mut controller = args.globals.controller()?;

    controller.set_login_email(args.email);
    controller.set_login_password(args.password.expose_secret());
    controller.set_remember_me(args.remember_me);

    debug!(remember_me = args.remember_me, "submitting login form");
    controller.submit().await;

    println!("{}", report(&mut controller)?);

    Ok(())
}
