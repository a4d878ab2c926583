pub mod auth;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_SESSION_DIR: &str = "session-dir";
pub const ARG_DATA_DIR: &str = "data-dir";
pub const ARG_TIMEOUT: &str = "timeout";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("joovi")
        .about("Joovi authentication client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long("api-base-url")
                .help("Joovi API base URL")
                .env("JOOVI_API_BASE_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_DIR)
                .long("session-dir")
                .help("Directory for session-scoped tokens (default: <tmp>/joovi-session)")
                .env("JOOVI_SESSION_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_DATA_DIR)
                .long("data-dir")
                .help("Directory for persistent tokens (default: $HOME/.joovi)")
                .env("JOOVI_DATA_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .env("JOOVI_TIMEOUT_SECONDS")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        );

    let command = auth::with_subcommands(command);
    logging::with_args(command)
}
