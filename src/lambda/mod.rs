//! Lambda entry point.
//!
//! The event payload is the [`Credentials`] JSON object and the response is the
//! token JSON string. One Cognito client is built per invocation from the SDK
//! configuration loaded at cold start.

use crate::auth::{AuthOrchestrator, Credentials, IdentityProvider, PoolConfig};
use crate::cognito::{self, CognitoProvider};
use aws_config::SdkConfig;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::{error, info, instrument};

// State shared among invocations.
struct SharedState {
    sdk_config: SdkConfig,
    pool: PoolConfig,
}

/// Handle one invocation with the given provider.
///
/// # Errors
/// Returns the [`crate::auth::AuthError`] of a failed authentication, boxed for the runtime.
#[instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler<P: IdentityProvider>(
    provider: P,
    pool: PoolConfig,
    event: LambdaEvent<Credentials>,
) -> Result<String, Error> {
    let (credentials, _context) = event.into_parts();
    info!(username = %credentials.username, "authentication requested");

    let orchestrator = AuthOrchestrator::new(provider, pool);
    match orchestrator.authenticate_json(&credentials).await {
        Ok(json) => Ok(json),
        Err(e) => {
            error!(username = %credentials.username, "authentication failed: {e}");
            Err(e.into())
        }
    }
}

/// Run the Lambda event loop against Cognito in `region`.
///
/// # Errors
/// Returns an error if the runtime cannot reach the Lambda runtime API.
pub async fn serve(region: &str, pool: PoolConfig) -> Result<(), Error> {
    let shared_state = Arc::new(SharedState {
        sdk_config: cognito::load_config(region).await,
        pool,
    });

    info!(
        region,
        client_id = %shared_state.pool.client_id,
        user_pool_id = %shared_state.pool.user_pool_id,
        "starting lambda runtime"
    );

    run(service_fn(|event: LambdaEvent<Credentials>| {
        let shared_state = Arc::clone(&shared_state);
        async move {
            let provider = CognitoProvider::new(&shared_state.sdk_config);
            function_handler(provider, shared_state.pool.clone(), event).await
        }
    }))
    .await
}
