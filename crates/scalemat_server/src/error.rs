use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Custom error types for the scalemat API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No matrix state has been synchronized yet")]
    NotSynced,

    #[error("No submission found for version: {0}")]
    SubmissionNotFound(String),

    #[error("Invalid parameter: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Export I/O error: {0}")]
    ExportError(String),

    #[error("Mutex lock error")]
    LockError,
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ApiError::LockError
    }
}

impl From<scalemat_core::error::ExchangeError> for ApiError {
    fn from(err: scalemat_core::error::ExchangeError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotSynced | ApiError::SubmissionNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::ValidationError { .. } | ApiError::SerializationError(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::ExportError(_) => {
                tracing::error!("export error: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            ApiError::LockError => {
                tracing::error!("lock error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

/// Helper type for API results
pub type ApiResult<T> = Result<T, ApiError>;
