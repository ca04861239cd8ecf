//! Bearer auth gate: `Authorization` header -> provider validation -> Principal.
//!
//! Nothing is cached. Every call re-validates with the provider, and every
//! provider failure (rejection, network, bad body) collapses into
//! `InvalidCredential`.

use thiserror::Error;

use crate::services::identity::{IdentityProvider, Principal};

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("missing credential")]
    MissingCredential,
    #[error("malformed credential")]
    MalformedCredential,
    #[error("invalid credential")]
    InvalidCredential,
}

/// Pull the token out of a raw `Authorization` value.
///
/// The prefix is matched literally (case-sensitive, single space).
pub fn extract_bearer(header: Option<&str>) -> Result<&str, GateError> {
    let header = header.ok_or(GateError::MissingCredential)?;
    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(GateError::MalformedCredential)
}

/// Ask the provider who owns `token`.
pub async fn validate_token(
    provider: &dyn IdentityProvider,
    token: &str,
) -> Result<Principal, GateError> {
    match provider.get_user(token).await {
        Ok(principal) => Ok(principal),
        Err(err) => {
            tracing::warn!(
                provider = provider.provider_name(),
                error = %err,
                "access token validation failed"
            );
            Err(GateError::InvalidCredential)
        }
    }
}

pub async fn authenticate(
    provider: &dyn IdentityProvider,
    header: Option<&str>,
) -> Result<Principal, GateError> {
    let token = extract_bearer(header)?;
    validate_token(provider, token).await
}
