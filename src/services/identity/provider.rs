//! Identity provider interface used by the auth gate and the auth handlers.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider-layer errors.
///
/// Kept separate from `AppError`: each endpoint decides which status a
/// provider failure becomes (signup 400, login 401, logout 500, ...).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx answer. `message` is the provider's own explanation.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected provider response: {0}")]
    Decode(String),
    #[error("invalid provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The authenticated identity, exactly as the provider reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

/// Session returned by a successful password login.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// A hosted identity provider.
///
/// One instance is shared by every in-flight request, so implementations
/// must be safe for concurrent use.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    // Provider name (for logging).
    fn provider_name(&self) -> &'static str;

    // Register a new email/password account. Returns the provider's user object.
    async fn sign_up(&self, email: &str, password: &str) -> ProviderResult<Value>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<ProviderSession>;

    // Resolve an access token to its user. Any failure means the token is not usable.
    async fn get_user(&self, access_token: &str) -> ProviderResult<Principal>;

    // End the session the given access token belongs to.
    async fn sign_out(&self, access_token: &str) -> ProviderResult<()>;

    // Build the URL a browser should open to start an OAuth sign-in.
    fn oauth_url(&self, provider: &str, redirect_to: &str) -> ProviderResult<String>;
}
