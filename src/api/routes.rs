/*
 * Responsibility
 * - URL structure of the gateway
 * - which routes sit behind the bearer auth gate
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{login, login_google, logout, signup, verify_google},
    health::{health, home},
    service::{protected, service},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/service", get(service))
        .route("/protected", get(protected));
    let gated = middleware::auth::access::apply(gated, state);

    Router::new()
        .route("/health", get(health))
        .route("/home", get(home))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/login/google", post(login_google))
        .route("/auth/google/verify", post(verify_google))
        .merge(gated)
}
