#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use authgate::{
    auth::{
        AdminSetPassword, AuthError, AuthResponse, ChallengeStage, Credentials,
        IdentityProvider, InitiateAuth, PoolConfig, ProviderError, NEW_PASSWORD_REQUIRED,
    },
    lambda::function_handler,
};
use lambda_runtime::{Context, LambdaEvent};
use secrecy::ExposeSecret;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Journal {
    events: Vec<String>,
}

/// Provider that answers from fixed scripts and journals each call.
struct ScriptedProvider {
    journal: Arc<Mutex<Journal>>,
    initiate: Mutex<Vec<Result<AuthResponse, ProviderError>>>,
    admin: Result<(), ProviderError>,
}

impl ScriptedProvider {
    fn new(
        journal: Arc<Mutex<Journal>>,
        mut initiate: Vec<Result<AuthResponse, ProviderError>>,
        admin: Result<(), ProviderError>,
    ) -> Self {
        initiate.reverse();
        Self {
            journal,
            initiate: Mutex::new(initiate),
            admin,
        }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn initiate_auth(&self, request: InitiateAuth<'_>) -> Result<AuthResponse, ProviderError> {
        self.journal.lock().unwrap().events.push(format!(
            "initiate:{}:{}:{}",
            request.client_id,
            request.username,
            request.password.expose_secret()
        ));
        self.initiate
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ProviderError::new("InitiateAuth", None, "exhausted")))
    }

    async fn admin_set_password(&self, request: AdminSetPassword<'_>) -> Result<(), ProviderError> {
        self.journal.lock().unwrap().events.push(format!(
            "set_password:{}:{}:{}:{}",
            request.user_pool_id,
            request.username,
            request.password.expose_secret(),
            request.permanent
        ));
        self.admin.clone()
    }
}

fn pool() -> PoolConfig {
    PoolConfig::new("app-client", "eu-west-1_TestPool")
}

fn event(payload: serde_json::Value) -> LambdaEvent<Credentials> {
    LambdaEvent::new(
        serde_json::from_value(payload).unwrap(),
        Context::default(),
    )
}

#[tokio::test]
async fn first_login_scenario() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let provider = ScriptedProvider::new(
        Arc::clone(&journal),
        vec![
            Ok(AuthResponse::challenge(NEW_PASSWORD_REQUIRED)),
            Ok(AuthResponse::tokens("at1", "rt1")),
        ],
        Ok(()),
    );

    let response = function_handler(
        provider,
        pool(),
        event(serde_json::json!({"username": "alice", "password": "temp1"})),
    )
    .await
    .unwrap();

    assert_eq!(response, r#"{"accessToken":"at1","refreshToken":"rt1"}"#);
    assert_eq!(
        journal.lock().unwrap().events,
        vec![
            "initiate:app-client:alice:temp1",
            "set_password:eu-west-1_TestPool:alice:temp1:true",
            "initiate:app-client:alice:temp1",
        ]
    );
}

#[tokio::test]
async fn returns_tokens_verbatim() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let provider = ScriptedProvider::new(
        Arc::clone(&journal),
        vec![Ok(AuthResponse::tokens("abc", "xyz"))],
        Ok(()),
    );

    let response = function_handler(
        provider,
        pool(),
        event(serde_json::json!({"username": "bob", "password": "hunter2"})),
    )
    .await
    .unwrap();

    assert_eq!(response, r#"{"accessToken":"abc","refreshToken":"xyz"}"#);
    assert_eq!(journal.lock().unwrap().events.len(), 1);
}

#[tokio::test]
async fn wrong_password_surfaces_provider_failure() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let provider = ScriptedProvider::new(
        Arc::clone(&journal),
        vec![Err(ProviderError::new(
            "InitiateAuth",
            Some("NotAuthorizedException".to_string()),
            "Incorrect username or password.",
        ))],
        Ok(()),
    );

    let err = function_handler(
        provider,
        pool(),
        event(serde_json::json!({"username": "bob", "password": "wrong"})),
    )
    .await
    .unwrap_err();

    let auth_error = err.downcast_ref::<AuthError>().unwrap();
    assert!(matches!(auth_error, AuthError::ProviderCall(_)));
    assert_eq!(
        auth_error.provider_error().and_then(|e| e.code.as_deref()),
        Some("NotAuthorizedException")
    );
    assert!(journal
        .lock()
        .unwrap()
        .events
        .iter()
        .all(|event| event.starts_with("initiate:")));
}

#[tokio::test]
async fn set_password_failure_aborts() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let provider = ScriptedProvider::new(
        Arc::clone(&journal),
        vec![
            Ok(AuthResponse::challenge(NEW_PASSWORD_REQUIRED)),
            Ok(AuthResponse::tokens("never", "returned")),
        ],
        Err(ProviderError::new(
            "AdminSetUserPassword",
            Some("InvalidPasswordException".to_string()),
            "Password does not conform to policy",
        )),
    );

    let err = function_handler(
        provider,
        pool(),
        event(serde_json::json!({"username": "alice", "password": "short"})),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AuthError>(),
        Some(AuthError::ChallengeHandling {
            stage: ChallengeStage::SetPassword,
            ..
        })
    ));
    assert_eq!(
        journal.lock().unwrap().events,
        vec![
            "initiate:app-client:alice:short",
            "set_password:eu-west-1_TestPool:alice:short:true",
        ]
    );
}

#[tokio::test]
async fn repeated_challenge_is_not_retried_again() {
    let journal = Arc::new(Mutex::new(Journal::default()));
    let provider = ScriptedProvider::new(
        Arc::clone(&journal),
        vec![
            Ok(AuthResponse::challenge(NEW_PASSWORD_REQUIRED)),
            Ok(AuthResponse::challenge(NEW_PASSWORD_REQUIRED)),
            Ok(AuthResponse::tokens("never", "returned")),
        ],
        Ok(()),
    );

    let err = function_handler(
        provider,
        pool(),
        event(serde_json::json!({"username": "alice", "password": "temp1"})),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AuthError>(),
        Some(AuthError::UnexpectedChallenge(name)) if name == NEW_PASSWORD_REQUIRED
    ));
    assert_eq!(journal.lock().unwrap().events.len(), 3);
}

#[test]
fn event_payload_requires_username_and_password() {
    assert!(serde_json::from_value::<Credentials>(serde_json::json!({"password": "x"})).is_err());
    assert!(serde_json::from_value::<Credentials>(serde_json::json!({"username": "x"})).is_err());
}
