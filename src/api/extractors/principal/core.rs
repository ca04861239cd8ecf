use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::identity::Principal;
use crate::state::AppState;

/// Extractor for the `Principal` the auth middleware stored in request extensions.
///
/// Missing means the route was not wrapped by the middleware.
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(principal) => Ok(CurrentPrincipal(principal.clone())),
            None => {
                tracing::error!(
                    uri = %parts.uri,
                    "principal requested on a route without the auth gate"
                );
                Err(AppError::unauthorized("UNAUTHENTICATED", "Unauthorized"))
            }
        }
    }
}
