use crate::cli::actions::{lambda, login, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Lambda(args) => lambda::execute(args).await,
        Action::Login(args) => login::execute(args).await,
    }
}
