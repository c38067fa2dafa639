//! Auth HTTP handlers: signup, signin.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use validator::Validate;

use crate::auth::TokenPair;
use crate::error::AppError;
use crate::handlers::http::AppState;

/// Shared payload for both endpoints; signin carries `nickname` but ignores it.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 24))]
    pub nickname: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenPair>), AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = state
        .auth_service()
        .sign_up(&body.email, &body.nickname, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /auth/signin
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenPair>, AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = state
        .auth_service()
        .sign_in(&body.email, &body.password)
        .await?;
    Ok(Json(tokens))
}
