use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Credentials;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `POST /api/v1/auth/login`.
///
/// Verifies the credentials and returns a fresh session token. Every
/// failure surfaces as the same generic 401: whether the email exists
/// must not be observable from this endpoint.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let credentials = Credentials {
        email: body.email,
        password: body.password,
    };

    // Credential failures get the generic 401; anything else (database
    // faults and the like) is a server problem and maps to 500.
    let user = state
        .user_service
        .authenticate_by_credentials(&credentials)
        .await
        .map_err(|e| match e {
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("invalid email/password".to_string())
            }
            other => ApiError::from(other),
        })?;

    let token = state
        .token_codec
        .issue(user.token_identity(), Utc::now())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to issue session token");
            ApiError::InternalServerError(
                "something went wrong, please try again later".to_string(),
            )
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}
