//! First-login authentication workflow.
//!
//! [`AuthOrchestrator::authenticate`] submits credentials, resolves a
//! `NEW_PASSWORD_REQUIRED` challenge by making the password permanent, retries
//! once and returns the token pair.

pub mod error;
pub mod provider;

#[cfg(test)]
mod fake;

pub use self::error::{AuthError, ChallengeStage};
pub use self::provider::{
    AdminSetPassword, AuthResponse, IdentityProvider, InitiateAuth, ProviderError,
    NEW_PASSWORD_REQUIRED,
};

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

/// Username and password supplied with a single invocation.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(deserialize_with = "secret_string")]
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Session tokens returned to the caller.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthOutcome {
    /// Serialize as `{"accessToken":"...","refreshToken":"..."}`.
    ///
    /// # Errors
    /// Returns [`AuthError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, AuthError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::fmt::Debug for AuthOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthOutcome")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

impl TryFrom<AuthResponse> for AuthOutcome {
    type Error = AuthError;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            access_token: response
                .access_token
                .ok_or(AuthError::MissingToken("access token"))?,
            refresh_token: response
                .refresh_token
                .ok_or(AuthError::MissingToken("refresh token"))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeState {
    None,
    NewPasswordRequired,
}

impl ChallengeState {
    /// Classify a provider response.
    ///
    /// # Errors
    /// Returns [`AuthError::UnexpectedChallenge`] for any challenge other than
    /// `NEW_PASSWORD_REQUIRED`.
    pub fn of(response: &AuthResponse) -> Result<Self, AuthError> {
        match response.challenge_name.as_deref() {
            None => Ok(Self::None),
            Some(NEW_PASSWORD_REQUIRED) => Ok(Self::NewPasswordRequired),
            Some(other) => Err(AuthError::UnexpectedChallenge(other.to_string())),
        }
    }
}

/// App client and user pool the orchestrator is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub client_id: String,
    pub user_pool_id: String,
}

impl PoolConfig {
    #[must_use]
    pub fn new(client_id: impl Into<String>, user_pool_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            user_pool_id: user_pool_id.into(),
        }
    }
}

pub struct AuthOrchestrator<P> {
    provider: P,
    pool: PoolConfig,
}

impl<P: IdentityProvider> AuthOrchestrator<P> {
    #[must_use]
    pub const fn new(provider: P, pool: PoolConfig) -> Self {
        Self { provider, pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Authenticate, resolving a first-login challenge if the provider asks for one.
    ///
    /// # Errors
    /// - [`AuthError::ProviderCall`] if the initial call fails; nothing else is attempted.
    /// - [`AuthError::ChallengeHandling`] if the password reset or the retry fails.
    /// - [`AuthError::UnexpectedChallenge`] for any other challenge, including a
    ///   second challenge after the reset.
    /// - [`AuthError::MissingToken`] if a successful response lacks a token.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        let response = self
            .initiate(credentials)
            .await
            .map_err(AuthError::ProviderCall)?;

        let response = match ChallengeState::of(&response)? {
            ChallengeState::None => response,
            ChallengeState::NewPasswordRequired => self.resolve_new_password(credentials).await?,
        };

        let outcome = AuthOutcome::try_from(response)?;
        info!("authenticated");
        Ok(outcome)
    }

    /// [`Self::authenticate`] followed by JSON serialization of the tokens.
    ///
    /// # Errors
    /// Same as [`Self::authenticate`], plus [`AuthError::Json`].
    pub async fn authenticate_json(&self, credentials: &Credentials) -> Result<String, AuthError> {
        self.authenticate(credentials).await?.to_json()
    }

    async fn resolve_new_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, AuthError> {
        info!("new password required, making the supplied password permanent");

        self.provider
            .admin_set_password(AdminSetPassword {
                user_pool_id: &self.pool.user_pool_id,
                username: &credentials.username,
                password: &credentials.password,
                permanent: true,
            })
            .await
            .map_err(|source| AuthError::ChallengeHandling {
                stage: ChallengeStage::SetPassword,
                source,
            })?;

        debug!("password set, resubmitting credentials");

        let response = self
            .initiate(credentials)
            .await
            .map_err(|source| AuthError::ChallengeHandling {
                stage: ChallengeStage::Resubmit,
                source,
            })?;

        if let Some(name) = response.challenge_name {
            warn!(challenge = %name, "challenge after password reset");
            return Err(AuthError::UnexpectedChallenge(name));
        }

        Ok(response)
    }

    async fn initiate(&self, credentials: &Credentials) -> Result<AuthResponse, ProviderError> {
        self.provider
            .initiate_auth(InitiateAuth {
                client_id: &self.pool.client_id,
                username: &credentials.username,
                password: &credentials.password,
            })
            .await
    }
}
