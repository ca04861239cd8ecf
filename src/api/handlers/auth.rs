/*
 * Responsibility
 * - signup / login / logout / Google OAuth handoff / OAuth token verification
 * - each handler makes at most one provider call and maps its failure to a status
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::auth::{
    GoogleVerifyRequest, GoogleVerifyResponse, LoginRequest, MessageResponse, OAuthUrlResponse,
    SignupRequest, SignupResponse, TOKEN_TYPE_BEARER, TokenResponse, UserSummary,
};
use crate::api::extractors::BearerToken;
use crate::error::AppError;
use crate::services::auth::validate_token;
use crate::state::AppState;

const GOOGLE_PROVIDER: &str = "google";

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, AppError> {
    let Json(req) = body?;
    let user = state
        .identity
        .sign_up(&req.email, &req.password)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "signup rejected by provider");
            AppError::bad_request("SIGNUP_FAILED", err.to_string())
        })?;

    Ok(Json(SignupResponse {
        message: "Signup successful",
        user,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = body?;
    let session = state
        .identity
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "password login failed");
            AppError::unauthorized("INVALID_CREDENTIALS", "Invalid credentials")
        })?;

    tracing::debug!(
        token_type = %session.token_type,
        expires_in = ?session.expires_in,
        has_refresh_token = session.refresh_token.is_some(),
        "password login succeeded"
    );

    Ok(Json(TokenResponse {
        access_token: session.access_token,
        token_type: TOKEN_TYPE_BEARER,
    }))
}

/// Ends the caller's own provider session (the one its bearer token belongs to).
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<MessageResponse>, AppError> {
    state.identity.sign_out(&token).await.map_err(|err| {
        tracing::error!(error = %err, "provider sign-out failed");
        AppError::internal(err.to_string())
    })?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}

pub async fn login_google(
    State(state): State<AppState>,
) -> Result<Json<OAuthUrlResponse>, AppError> {
    let url = state
        .identity
        .oauth_url(GOOGLE_PROVIDER, &state.oauth_redirect_url)
        .map_err(|err| {
            tracing::error!(error = %err, "oauth url construction failed");
            AppError::internal(format!("OAuth initiation failed: {err}"))
        })?;

    Ok(Json(OAuthUrlResponse {
        url,
        message: "Open this URL in browser to authenticate with Google",
    }))
}

/// Checks an access token obtained from the Google OAuth callback.
pub async fn verify_google(
    State(state): State<AppState>,
    body: Result<Json<GoogleVerifyRequest>, JsonRejection>,
) -> Result<Json<GoogleVerifyResponse>, AppError> {
    let Json(req) = body?;
    let Some(token) = req.token() else {
        tracing::debug!(has_code = req.code.is_some(), "verify called without access_token");
        return Err(AppError::bad_request(
            "ACCESS_TOKEN_REQUIRED",
            "access_token is required",
        ));
    };

    let principal = validate_token(state.identity.as_ref(), token)
        .await
        .map_err(|_| AppError::unauthorized("INVALID_ACCESS_TOKEN", "Invalid access token"))?;

    Ok(Json(GoogleVerifyResponse {
        access_token: token.to_string(),
        token_type: TOKEN_TYPE_BEARER,
        user: UserSummary {
            id: principal.id,
            email: principal.email,
        },
    }))
}
