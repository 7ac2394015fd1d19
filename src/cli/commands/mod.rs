pub mod cognito;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_LOGIN: &str = "login";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Authenticate once and print the session tokens as JSON")
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help("Username to authenticate")
                .env("AUTHGATE_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password; a temporary password becomes permanent on first login")
                .env("AUTHGATE_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

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

    let command = Command::new("authgate")
        .about("First-login authentication for Cognito user pools")
        .long_about(
            "Runs as an AWS Lambda function when started without a subcommand. \
             Use `login` to authenticate once from a terminal.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand(login());

    let command = cognito::with_args(command);
    logging::with_args(command)
}
