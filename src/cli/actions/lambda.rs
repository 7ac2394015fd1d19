use crate::{cli::globals::GlobalArgs, lambda};
use anyhow::{anyhow, Result};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Execute the Lambda action.
/// # Errors
/// Returns an error if the Lambda runtime loop fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Global args: {:?}", args.globals);

    let GlobalArgs { region, pool } = args.globals;

    lambda::serve(&region, pool)
        .await
        .map_err(|e| anyhow!("lambda runtime failed: {e}"))
}
