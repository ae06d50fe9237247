use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;

use super::ApiError;
use super::PaginatedResponseBody;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `GET /api/v1/users?limit=&offset=`.
///
/// Returns a page of users plus the total count. `limit = 0` means no
/// page cap, mirroring SQL `LIMIT` semantics.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Response, ApiError> {
    let limit = params.limit.unwrap_or(0);
    let offset = params.offset.unwrap_or(0);

    if limit < 0 {
        return Err(ApiError::BadRequest("invalid limit".to_string()));
    }

    if offset < 0 {
        return Err(ApiError::BadRequest("invalid offset".to_string()));
    }

    let (users, total) = state
        .user_service
        .list_users(limit, offset)
        .await
        .map_err(ApiError::from)?;

    let body = PaginatedResponseBody {
        data: users.iter().map(UserData::from).collect(),
        limit,
        offset,
        total,
    };

    Ok((StatusCode::OK, Json(body)).into_response())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
