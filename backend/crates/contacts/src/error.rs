//! Contact Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Contact-specific result type alias
pub type ContactResult<T> = Result<T, ContactError>;

/// Contact-specific error variants
#[derive(Debug, Error)]
pub enum ContactError {
    /// Malformed input (empty name, oversized field)
    #[error("{0}")]
    Validation(String),

    /// Contact does not exist
    #[error("Contact not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::Database(_) | ContactError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::Validation(_) => ErrorKind::BadRequest,
            ContactError::NotFound => ErrorKind::NotFound,
            ContactError::Database(_) | ContactError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with a user-safe message
    pub fn to_app_error(&self) -> AppError {
        match self {
            ContactError::Database(_) | ContactError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ContactError::Database(e) => {
                tracing::error!(error = %e, "Contact database error");
            }
            ContactError::Internal(msg) => {
                tracing::error!(message = %msg, "Contact internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Contact error");
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
