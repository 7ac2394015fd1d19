use crate::{
    auth::{AuthOrchestrator, Credentials},
    cli::globals::GlobalArgs,
    cognito::{self, CognitoProvider},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::debug;

pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("globals", &self.globals)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Execute the login action: authenticate once and print the token JSON.
/// # Errors
/// Returns an error if authentication fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Login args: {:?}", args);

    let GlobalArgs { region, pool } = args.globals;
    let sdk_config = cognito::load_config(&region).await;
    let orchestrator = AuthOrchestrator::new(CognitoProvider::new(&sdk_config), pool);

    let credentials = Credentials {
        username: args.username,
        password: args.password,
    };

    let json = orchestrator
        .authenticate_json(&credentials)
        .await
        .with_context(|| format!("login failed for {}", credentials.username))?;

    println!("{json}");

    Ok(())
}
