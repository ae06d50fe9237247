use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `POST /api/v1/auth/register` and `POST /api/v1/users`.
///
/// Creates a user from an email/password pair; the password is hashed
/// before it reaches persistence.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let email = EmailAddress::new(self.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if self.password.is_empty() {
            return Err(ApiError::BadRequest("password must not be empty".to_string()));
        }

        Ok(CreateUserCommand::new(email, self.password))
    }
}
