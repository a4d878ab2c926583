use crate::{
    auth::AuthMode,
    cli::{
        actions::report,
        commands::auth::{ARG_CONFIRM_PASSWORD, ARG_DISPLAY_NAME, ARG_EMAIL, ARG_PASSWORD},
        globals::GlobalArgs,
    },
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    /// `None` keeps the name derived from the email.
    pub display_name: Option<String>,
}

fn secret(matches: &clap::ArgMatches, id: &str) -> SecretString {
    SecretString::from(matches.get_one::<String>(id).cloned().unwrap_or_default())
}

impl Args {
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches, globals: GlobalArgs) -> Self {
        Self {
            globals,
            email: matches.get_one::<String>(ARG_EMAIL).cloned().unwrap_or_default(),
            password: secret(matches, ARG_PASSWORD),
            confirm_password: secret(matches, ARG_CONFIRM_PASSWORD),
            display_name: matches.get_one::<String>(ARG_DISPLAY_NAME).cloned(),
        }
    }
}

/// Execute the register action.
/// # Errors
/// Returns an error if validation, the request, or storing the tokens fails.
pub async fn execute(args: Args) -> Result<()> {
    let mut controller = args.globals.controller()?;
    controller.switch_mode(AuthMode::Register);

    controller.set_register_email(args.email);
    if let Some(display_name) = args.display_name {
        controller.set_display_name(display_name);
    }
    controller.set_register_password(args.password.expose_secret());
    controller.set_confirm_password(args.confirm_password.expose_secret());

    debug!(
        display_name = controller.registration_form().display_name(),
        "submitting registration form"
    );
    controller.submit().await;

    println!("{}", report(&mut controller)?);

    Ok(())
}
