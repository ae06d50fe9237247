use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// `GET /api/v1/test`: unauthenticated liveness probe.
pub async fn test_connection() -> ApiSuccess<TestResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        TestResponseData {
            message: "Api works".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResponseData {
    pub message: String,
}
