/*
 * Responsibility
 * - GET /health (liveness)
 * - GET /home (public page payload)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::api::dto::pages::HomeResponse;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the home page!",
        description: "This is a public endpoint accessible to everyone.",
    })
}
