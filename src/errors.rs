use axum::http::StatusCode;
use axum::response::IntoResponse;
use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Upstream fetch failed: {0}")]
    NetworkFailure(String),
    #[error("Override batch rejected: {0}")]
    WriteRejected(String),
    #[error("No pending overrides to submit")]
    NothingToSubmit,
    #[error("Stale fetch cycle discarded")]
    StaleResponse,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::NothingToSubmit => {
                (StatusCode::CONFLICT, "No pending overrides to submit").into_response()
            }
            AppError::StaleResponse => {
                (StatusCode::CONFLICT, "Superseded by a newer calendar request").into_response()
            }
            AppError::NetworkFailure(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::WriteRejected(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: Error) -> Self {
        AppError::Db(value)
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}
