/*
 * Responsibility
 * - gated endpoints (/service, /protected)
 * - the auth middleware has already validated; handlers only read the Principal
 */
use axum::Json;

use crate::api::dto::pages::{GreetingResponse, ServiceResponse};
use crate::api::extractors::CurrentPrincipal;

pub async fn service(CurrentPrincipal(principal): CurrentPrincipal) -> Json<ServiceResponse> {
    Json(ServiceResponse {
        message: format!("Welcome to the service page, {}!", principal.email),
        description: "This is a protected endpoint. You are authenticated.",
        user_id: principal.id,
    })
}

pub async fn protected(CurrentPrincipal(principal): CurrentPrincipal) -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: format!("Welcome, {}!", principal.email),
    })
}
