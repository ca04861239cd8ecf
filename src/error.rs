/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status / JSON error body)
 * - Gate failures are folded in here; provider failures are mapped per handler
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::GateError;

/// Error body. `detail` carries the same text as `error.message`; the web
/// frontend reads `detail`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{code}: {message}")]
    Unauthorized { code: &'static str, message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized { code, message } => (StatusCode::UNAUTHORIZED, code, message),
            AppError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                message,
            ),
        };

        let body = ErrorResponse {
            detail: message.clone(),
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<GateError> for AppError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::MissingCredential => {
                AppError::unauthorized("MISSING_CREDENTIAL", "Missing Authorization header")
            }
            GateError::MalformedCredential => AppError::unauthorized(
                "MALFORMED_CREDENTIAL",
                "Invalid Authorization header format",
            ),
            GateError::InvalidCredential => {
                AppError::unauthorized("INVALID_CREDENTIAL", "Unauthorized")
            }
        }
    }
}

// Body errors (bad JSON, missing field, wrong content type) keep the JSON
// error shape instead of axum's plain-text rejection.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "request body rejected");
        AppError::bad_request("INVALID_BODY", rejection.body_text())
    }
}
