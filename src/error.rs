use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No issue exists with ID: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Structured error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub suggestion: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::NotFound(id) => ErrorBody {
                error: "Issue not found".to_string(),
                message: format!("No issue exists with ID: {}", id),
                suggestion: "Check the issue ID or use GET /issues to see all available issues"
                    .to_string(),
            },
            Self::Validation(message) => ErrorBody {
                error: "Validation error".to_string(),
                message: message.clone(),
                suggestion: "Adjust the request fields to the documented ranges and retry"
                    .to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
