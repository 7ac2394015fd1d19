//! Amazon Cognito implementation of [`IdentityProvider`].

use crate::auth::{AdminSetPassword, AuthResponse, IdentityProvider, InitiateAuth, ProviderError};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_cognitoidentityprovider::{
    config::Region,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::initiate_auth::InitiateAuthOutput,
    types::AuthFlowType,
    Client,
};
use secrecy::ExposeSecret;
use tracing::{debug, error};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Load the shared AWS SDK configuration for `region`.
pub async fn load_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

#[derive(Debug, Clone)]
pub struct CognitoProvider {
    client: Client,
}

impl CognitoProvider {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn initiate_auth(&self, request: InitiateAuth<'_>) -> Result<AuthResponse, ProviderError> {
        debug!(username = request.username, "InitiateAuth");

        let output = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", request.username)
            .auth_parameters("PASSWORD", request.password.expose_secret())
            .client_id(request.client_id)
            .send()
            .await
            .map_err(|e| provider_error("InitiateAuth", &e))?;

        Ok(auth_response(output))
    }

    async fn admin_set_password(&self, request: AdminSetPassword<'_>) -> Result<(), ProviderError> {
        debug!(
            username = request.username,
            permanent = request.permanent,
            "AdminSetUserPassword"
        );

        self.client
            .admin_set_user_password()
            .user_pool_id(request.user_pool_id)
            .username(request.username)
            .password(request.password.expose_secret())
            .permanent(request.permanent)
            .send()
            .await
            .map_err(|e| provider_error("AdminSetUserPassword", &e))?;

        Ok(())
    }
}

/// Map an `InitiateAuth` output to the provider-neutral response.
#[must_use]
pub fn auth_response(output: InitiateAuthOutput) -> AuthResponse {
    let challenge_name = output
        .challenge_name
        .map(|challenge| challenge.as_str().to_string());

    let (access_token, refresh_token) = output
        .authentication_result
        .map(|result| (result.access_token, result.refresh_token))
        .unwrap_or_default();

    AuthResponse {
        challenge_name,
        access_token,
        refresh_token,
    }
}

fn provider_error<E, R>(operation: &'static str, err: &SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let context = DisplayErrorContext(err).to_string();
    error!("{operation} failed: {context}");

    ProviderError::new(
        operation,
        err.code().map(str::to_string),
        err.message().map_or(context, str::to_string),
    )
}
