pub mod lambda;
pub mod login;

// Internal "interpreter" for `Action`.
// The match lives in a separate module so `mod.rs` stays small as actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Lambda(lambda::Args),
    Login(login::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
