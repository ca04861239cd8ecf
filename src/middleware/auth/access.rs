//! Bearer auth gate as middleware: validate with the provider, then put the
//! `Principal` into request extensions for the `CurrentPrincipal` extractor.
//!
//! Rejections happen here, before any handler logic runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{self as gate, GateError};
use crate::state::AppState;

/// Guard every route of `router` with the bearer auth gate.
///
/// Uses `route_layer` so unknown paths still 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| GateError::MalformedCredential))
        .transpose()?;

    let principal = gate::authenticate(state.identity.as_ref(), header).await?;

    tracing::debug!(user_id = %principal.id, "request authenticated");

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
