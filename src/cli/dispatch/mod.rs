//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to an action: the Lambda runtime loop when no
//! subcommand is given, or a one-shot `login`.

use crate::cli::actions::{lambda, login, Action};
use crate::cli::commands::{cognito, CMD_LOGIN, ARG_PASSWORD, ARG_USERNAME};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use secrecy::SecretString;

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let options = cognito::Options::parse(matches)?;
    Ok(GlobalArgs::new(
        options.region,
        options.client_id,
        options.user_pool_id,
    ))
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_LOGIN, sub_m)) => {
            let username = sub_m
                .get_one::<String>(ARG_USERNAME)
                .cloned()
                .context("missing required argument: --username")?;
            let password = sub_m
                .get_one::<String>(ARG_PASSWORD)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --password")?;

            Ok(Action::Login(login::Args {
                globals: globals(sub_m)?,
                username,
                password,
            }))
        }
        _ => Ok(Action::Lambda(lambda::Args {
            globals: globals(matches)?,
        })),
    }
}
