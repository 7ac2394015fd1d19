use super::provider::{AdminSetPassword, AuthResponse, IdentityProvider, InitiateAuth, ProviderError};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::{collections::VecDeque, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InitiateAuth {
        client_id: String,
        username: String,
        password: String,
    },
    AdminSetPassword {
        user_pool_id: String,
        username: String,
        password: String,
        permanent: bool,
    },
}

/// Scripted provider that records every call it receives.
#[derive(Default)]
pub struct FakeProvider {
    initiate: Mutex<VecDeque<Result<AuthResponse, ProviderError>>>,
    admin: Mutex<VecDeque<Result<(), ProviderError>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initiate_returns(self, result: Result<AuthResponse, ProviderError>) -> Self {
        if let Ok(mut queue) = self.initiate.lock() {
            queue.push_back(result);
        }
        self
    }

    pub fn admin_returns(self, result: Result<(), ProviderError>) -> Self {
        if let Ok(mut queue) = self.admin.lock() {
            queue.push_back(result);
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn initiate_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::InitiateAuth { .. }))
            .count()
    }

    pub fn admin_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::AdminSetPassword { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn initiate_auth(&self, request: InitiateAuth<'_>) -> Result<AuthResponse, ProviderError> {
        self.record(Call::InitiateAuth {
            client_id: request.client_id.to_string(),
            username: request.username.to_string(),
            password: request.password.expose_secret().to_string(),
        });

        self.initiate
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(ProviderError::new(
                    "InitiateAuth",
                    None,
                    "no scripted response",
                ))
            })
    }

    async fn admin_set_password(&self, request: AdminSetPassword<'_>) -> Result<(), ProviderError> {
        self.record(Call::AdminSetPassword {
            user_pool_id: request.user_pool_id.to_string(),
            username: request.username.to_string(),
            password: request.password.expose_secret().to_string(),
            permanent: request.permanent,
        });

        self.admin
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(Ok(()))
    }
}
