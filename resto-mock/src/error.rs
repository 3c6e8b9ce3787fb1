//! Mock error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use shared::ApiEnvelope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    /// Missing or unknown bearer token
    #[error("Unauthenticated.")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        match self {
            // Laravel's auth middleware answers with a bare message
            MockError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": self.to_string() })),
            )
                .into_response(),
            MockError::InvalidCredentials => meta_error(StatusCode::UNAUTHORIZED, &self),
            MockError::NotFound(_) => meta_error(StatusCode::NOT_FOUND, &self),
            MockError::Validation(_) => meta_error(StatusCode::UNPROCESSABLE_ENTITY, &self),
            MockError::Internal(_) => meta_error(StatusCode::INTERNAL_SERVER_ERROR, &self),
        }
    }
}

fn meta_error(status: StatusCode, error: &MockError) -> Response {
    let body: ApiEnvelope<Value> = ApiEnvelope::meta_error(status.as_u16(), error.to_string());
    (status, Json(body)).into_response()
}

pub type MockResult = Result<Response, MockError>;
