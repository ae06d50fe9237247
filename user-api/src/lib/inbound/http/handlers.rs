use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod register;
pub mod test_connection;
pub mod update_user;
pub mod whoami;

/// Successful response wrapper: `{"data": ...}`.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody { data }))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    pub data: T,
}

/// Paginated response wrapper: `{"data": [...], "limit", "offset", "total"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatedResponseBody<T: Serialize + PartialEq> {
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

/// Error response carrying the structured body
/// `{"error": {"code": <status>, "message": "..."}}`.
///
/// Messages here go to clients verbatim, so variants are constructed
/// with generic phrases; internal error detail belongs in logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    InternalServerError(String),
}

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("not found".to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("invalid email/password".to_string())
            }
            UserError::InvalidUserId(_) | UserError::InvalidEmail(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Hashing(_) | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "Internal error while handling request");
                ApiError::InternalServerError(
                    "something went wrong, please try again later".to_string(),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

impl ApiErrorBody {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            error: ApiErrorDetail {
                code: status.as_u16(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Public projection of a user record.
///
/// The password hash never leaves the domain layer; this is the only
/// shape user data takes in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&crate::user::models::User> for UserData {
    fn from(user: &crate::user::models::User) -> Self {
        Self {
            id: user.id.get(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}
