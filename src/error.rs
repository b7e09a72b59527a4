use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

/// The primary error type for the library and embedding applications.
///
/// Any variant renders as the JSON error envelope
/// `{"status": "error", "reason": ...}` with the corresponding HTTP status.
#[derive(Debug)]
pub enum AppError {
    /// For client errors due to invalid requests (malformed JSON, bad
    /// values/keys/types).
    BadRequest(String),
    /// For when a requested resource is not found.
    NotFound(String),
    /// For missing or failed authentication.
    Unauthorized,
    /// For domain errors that carry their intended HTTP status and reason
    /// verbatim.
    Api { status: StatusCode, reason: String },
    /// For errors related to database operations.
    Database(String),
    /// For internal server errors that are not expected to be handled by
    /// the client.
    Internal(anyhow::Error),
}

impl AppError {
    /// Shorthand for an explicit status/reason error.
    pub fn api(status: StatusCode, reason: impl Into<String>) -> Self {
        AppError::Api { status, reason: reason.into() }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Api { status, reason } => write!(f, "{}: {}", status.as_u16(), reason),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, reason) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, format!("Bad Request: {}", msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Api { status, reason } => (status, reason),
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred".to_string())
            }
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!("Internal error {}: {:?}", error_id, e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal server error ({})", error_id))
            }
        };

        let body = json!({
            "status": "error",
            "reason": reason,
        });
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
            sqlx::Error::PoolTimedOut => {
                AppError::Database("Database connection pool timed out".to_string())
            }
            _ => AppError::Database(format!("Database error: {}", err)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::anyhow!("{}: {}", err.kind(), err))
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the library.
pub type AppResult<T> = Result<T, AppError>;
