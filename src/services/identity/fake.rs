//! In-memory provider for handler and gate tests.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::services::identity::provider::{
    IdentityProvider, Principal, ProviderError, ProviderResult, ProviderSession,
};

#[derive(Default)]
pub struct FakeProvider {
    // access token -> user
    sessions: HashMap<String, Principal>,
    // email -> (password, access token)
    accounts: HashMap<String, (String, String)>,
    fail_sign_out: bool,
    get_user_calls: AtomicUsize,
    signed_out: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, token: &str, id: &str, email: &str) -> Self {
        self.sessions.insert(
            token.to_string(),
            Principal {
                id: id.to_string(),
                email: email.to_string(),
            },
        );
        self
    }

    pub fn with_account(mut self, email: &str, password: &str, token: &str) -> Self {
        self.accounts
            .insert(email.to_string(), (password.to_string(), token.to_string()));
        self
    }

    pub fn failing_sign_out(mut self) -> Self {
        self.fail_sign_out = true;
        self
    }

    pub fn get_user_calls(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst)
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }
}

fn rejected(status: u16, message: &str) -> ProviderError {
    ProviderError::Rejected {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn provider_name(&self) -> &'static str {
        "fake"
    }

    async fn sign_up(&self, email: &str, _password: &str) -> ProviderResult<Value> {
        if self.accounts.contains_key(email) {
            return Err(rejected(422, "User already registered"));
        }
        Ok(json!({ "id": "new-user", "email": email }))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<ProviderSession> {
        match self.accounts.get(email) {
            Some((expected, token)) if expected == password => Ok(ProviderSession {
                access_token: token.clone(),
                token_type: "bearer".to_string(),
                expires_in: Some(3600),
                refresh_token: None,
            }),
            _ => Err(rejected(400, "Invalid login credentials")),
        }
    }

    async fn get_user(&self, access_token: &str) -> ProviderResult<Principal> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        self.sessions
            .get(access_token)
            .cloned()
            .ok_or_else(|| rejected(401, "invalid JWT"))
    }

    async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        if self.fail_sign_out {
            return Err(rejected(503, "auth service unavailable"));
        }
        self.signed_out.lock().unwrap().push(access_token.to_string());
        Ok(())
    }

    fn oauth_url(&self, provider: &str, redirect_to: &str) -> ProviderResult<String> {
        Ok(format!(
            "https://auth.test/authorize?provider={provider}&redirect_to={redirect_to}"
        ))
    }
}
