use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// `DELETE /api/v1/users/{id}`.
///
/// An account may not remove itself; everything else deletes normally.
/// Success is a bodyless 204.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id =
        UserId::from_string(&user_id).map_err(|_| ApiError::BadRequest("invalid ID".to_string()))?;

    if user_id == authenticated.user_id {
        return Err(ApiError::BadRequest("do not delete yourself".to_string()));
    }

    state
        .user_service
        .delete_user(user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
