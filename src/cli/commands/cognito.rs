use crate::cognito::DEFAULT_REGION;
use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use regex::Regex;

pub const ARG_CLIENT_ID: &str = "client-id";
pub const ARG_USER_POOL_ID: &str = "user-pool-id";
pub const ARG_REGION: &str = "region";

// <region>_<id>, e.g. eu-west-1_AbCdEf123
const USER_POOL_ID_PATTERN: &str = r"^(?P<region>[a-z]{2}(?:-[a-z]+)+-\d+)_[0-9A-Za-z]+$";

/// Region prefix of a user pool id, if the id is well formed.
#[must_use]
pub fn pool_region(user_pool_id: &str) -> Option<String> {
    Regex::new(USER_POOL_ID_PATTERN)
        .ok()?
        .captures(user_pool_id)
        .and_then(|caps| caps.name("region"))
        .map(|region| region.as_str().to_string())
}

#[must_use]
pub fn validator_user_pool_id() -> ValueParser {
    ValueParser::from(move |id: &str| -> std::result::Result<String, String> {
        if pool_region(id).is_some() {
            Ok(id.to_string())
        } else {
            Err("invalid user pool id, expected <region>_<id>".to_string())
        }
    })
}

#[derive(Debug, Clone)]
pub struct Options {
    pub client_id: String,
    pub user_pool_id: String,
    pub region: String,
}

impl Options {
    /// Parse Cognito arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing or the user pool
    /// belongs to a different region.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_required = |id: &str| -> anyhow::Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        let client_id = read_required(ARG_CLIENT_ID)?;
        let user_pool_id = read_required(ARG_USER_POOL_ID)?;
        let region = matches
            .get_one::<String>(ARG_REGION)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        if pool_region(&user_pool_id).as_deref() != Some(region.as_str()) {
            anyhow::bail!("user pool {user_pool_id} does not belong to region {region}");
        }

        Ok(Self {
            client_id,
            user_pool_id,
            region,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_CLIENT_ID)
                .long(ARG_CLIENT_ID)
                .help("Cognito app client id")
                .env("COGNITO_APP_CLIENT_ID")
                .global(true),
        )
        .arg(
            Arg::new(ARG_USER_POOL_ID)
                .long(ARG_USER_POOL_ID)
                .help("Cognito user pool id, example: eu-west-1_AbCdEf123")
                .env("COGNITO_USER_POOL_ID")
                .global(true)
                .value_parser(validator_user_pool_id()),
        )
        .arg(
            Arg::new(ARG_REGION)
                .long(ARG_REGION)
                .help("AWS region of the user pool")
                .env("COGNITO_REGION")
                .default_value(DEFAULT_REGION)
                .global(true),
        )
}
