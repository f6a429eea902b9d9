use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// ApiError
///
/// The application-wide error taxonomy. Every failure a caller can correct
/// (wrong password, unknown id, malformed input) maps to one of the first
/// three variants; persistence failures are not retried or translated, they
/// surface as fatal request failures (500).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad password, invalid/expired/unknown session token, or a failed
    /// old-password check. Never retried automatically.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// The targeted id/slug does not exist in the relevant collection
    /// (or is filtered out by its status).
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Malformed input, e.g. an unparseable `publish_date`. Surfaced before
    /// any write happens.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, (*msg).to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(err) => {
                tracing::error!("database error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Interner Fehler".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Interner Fehler".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Convenience alias used by handlers and the repository layer.
pub type ApiResult<T> = Result<T, ApiError>;
