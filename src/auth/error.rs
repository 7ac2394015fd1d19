use crate::auth::provider::ProviderError;
use thiserror::Error;

/// Step of the first-login flow that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStage {
    /// `AdminSetUserPassword` after a `NEW_PASSWORD_REQUIRED` challenge.
    SetPassword,
    /// Second `InitiateAuth` after the password was made permanent.
    Resubmit,
}

impl std::fmt::Display for ChallengeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetPassword => f.write_str("set password"),
            Self::Resubmit => f.write_str("resubmit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed")]
    ProviderCall(#[source] ProviderError),
    #[error("new password challenge failed at {stage}")]
    ChallengeHandling {
        stage: ChallengeStage,
        #[source]
        source: ProviderError,
    },
    #[error("unexpected challenge: {0}")]
    UnexpectedChallenge(String),
    #[error("authentication result is missing {0}")]
    MissingToken(&'static str),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// Provider error behind this failure, if any.
    #[must_use]
    pub const fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::ProviderCall(source) | Self::ChallengeHandling { source, .. } => Some(source),
            _ => None,
        }
    }
}
