/*
 * Responsibility
 * - request/response DTOs for the auth endpoints
 * - bodies are forwarded to the provider as-is; no local validation beyond shape
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `/auth/google/verify`.
///
/// `code` is accepted so PKCE-style callers are not rejected, but only
/// `access_token` is verified.
#[derive(Debug, Default, Deserialize)]
pub struct GoogleVerifyRequest {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl GoogleVerifyRequest {
    /// The access token, if one was actually supplied (blank counts as absent).
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: Value,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OAuthUrlResponse {
    pub url: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct GoogleVerifyResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserSummary,
}
