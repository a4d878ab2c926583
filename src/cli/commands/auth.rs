use clap::{Arg, ArgAction, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_STATUS: &str = "status";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_HEALTH: &str = "health";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_DISPLAY_NAME: &str = "display-name";
pub const ARG_REMEMBER_ME: &str = "remember-me";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(login())
        .subcommand(register())
        .subcommand(Command::new(CMD_STATUS).about("Show which storage area holds the session"))
        .subcommand(Command::new(CMD_LOGOUT).about("Remove stored tokens from both storage areas"))
        .subcommand(Command::new(CMD_HEALTH).about("Check that the Joovi API is reachable"))
}

// Email and password are not marked required: missing values are reported by
// form validation like an empty field would be.
fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long("email")
        .help("Account email")
        .env("JOOVI_EMAIL")
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("JOOVI_PASSWORD")
        .hide_env_values(true)
}

fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Sign in and store the token pair")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new(ARG_REMEMBER_ME)
                .long("remember-me")
                .help("Keep the session across restarts (persistent storage)")
                .action(ArgAction::SetTrue),
        )
}

fn register() -> Command {
    Command::new(CMD_REGISTER)
        .about("Create an account; the session is always kept in persistent storage")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long("confirm-password")
                .help("Repeat the password")
                .env("JOOVI_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_DISPLAY_NAME)
                .short('n')
                .long("display-name")
                .help("Display name (default: the part of the email before @)"),
        )
}
