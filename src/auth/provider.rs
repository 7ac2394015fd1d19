//! Identity provider capability.
//!
//! The orchestrator only needs two operations from the identity service, so they
//! are modelled as a trait. [`crate::cognito::CognitoProvider`] talks to Cognito;
//! tests plug in an in-memory double.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Cognito's wire name for the first-login challenge.
pub const NEW_PASSWORD_REQUIRED: &str = "NEW_PASSWORD_REQUIRED";

/// `USER_PASSWORD_AUTH` request scoped to an app client.
#[derive(Debug, Clone, Copy)]
pub struct InitiateAuth<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
    pub password: &'a SecretString,
}

/// Administrative password change for a user of a pool.
#[derive(Debug, Clone, Copy)]
pub struct AdminSetPassword<'a> {
    pub user_pool_id: &'a str,
    pub username: &'a str,
    pub password: &'a SecretString,
    pub permanent: bool,
}

/// Provider-neutral view of an initiate-auth result.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub challenge_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthResponse {
    #[must_use]
    pub fn tokens(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            challenge_name: None,
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    #[must_use]
    pub fn challenge(name: impl Into<String>) -> Self {
        Self {
            challenge_name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("challenge_name", &self.challenge_name)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Failure reported by the identity provider for a single call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct ProviderError {
    /// Provider operation name, e.g. `InitiateAuth`.
    pub operation: &'static str,
    /// Provider error code when one was reported, e.g. `NotAuthorizedException`.
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(operation: &'static str, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            operation,
            code,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Submit credentials and return either tokens or a named challenge.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the provider rejects the request.
    async fn initiate_auth(&self, request: InitiateAuth<'_>) -> Result<AuthResponse, ProviderError>;

    /// Set a user's password as an administrator.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the provider rejects the request.
    async fn admin_set_password(&self, request: AdminSetPassword<'_>) -> Result<(), ProviderError>;
}
