use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum NotesError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("Note not found")]
    NotFound,

    #[error("Invalid password")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("expected a JSON request body")]
    UnsupportedMediaType,

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Insecure configuration: {0}")]
    InsecureConfig(String),

    #[error("Schema error: {0}")]
    Schema(String),
}

impl IntoResponse for NotesError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            NotesError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_FAILED".to_string(),
                    message: msg,
                },
            ),
            NotesError::NotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Note not found".to_string(),
                },
            ),
            NotesError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid password".to_string(),
                },
            ),
            NotesError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: msg,
                },
            ),
            NotesError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiErrorBody {
                    code: "PAYLOAD_TOO_LARGE".to_string(),
                    message: "request body too large".to_string(),
                },
            ),
            NotesError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiErrorBody {
                    code: "UNSUPPORTED_MEDIA_TYPE".to_string(),
                    message: "Expected request with `Content-Type: application/json`".to_string(),
                },
            ),
            NotesError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "Not Found".to_string(),
                },
            ),
            NotesError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiErrorBody {
                    code: "METHOD_NOT_ALLOWED".to_string(),
                    message: "Method Not Allowed".to_string(),
                },
            ),
            other => {
                error!(error = %other, "request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
