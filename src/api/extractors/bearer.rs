use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::error::AppError;
use crate::services::auth::{GateError, extract_bearer};
use crate::state::AppState;

/// The raw bearer token from `Authorization`, NOT validated.
///
/// For endpoints that pass the caller's token straight to the provider
/// (logout) and let the provider decide.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().map_err(|_| GateError::MalformedCredential))
            .transpose()?;

        let token = extract_bearer(header)?;
        Ok(BearerToken(token.to_string()))
    }
}
