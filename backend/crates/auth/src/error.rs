//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already bound to an existing principal
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Password fails the minimum-strength policy
    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    /// Malformed input (email format, unknown role)
    #[error("{0}")]
    Validation(String),

    /// Login failed. Deliberately covers both unknown email and wrong
    /// password so responses cannot be used for email enumeration.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password wrong during password change
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Token signature or format does not check out
    #[error("Token is invalid")]
    TokenInvalid,

    /// Token is past its expiry
    #[error("Token has expired")]
    TokenExpired,

    /// No usable bearer token, or principal missing/deactivated
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated but role not allowed
    #[error("Insufficient permissions")]
    Forbidden,

    /// Principal not found (administrative operations)
    #[error("User not found")]
    UserNotFound,

    /// Password hashing failed internally
    #[error("Password processing failed: {0}")]
    Hashing(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail
            | AuthError::WeakPassword(_)
            | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::IncorrectPassword
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail
            | AuthError::WeakPassword(_)
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::IncorrectPassword
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError with a user-safe message
    ///
    /// Internal variants map to a generic message; their detail stays in
    /// the server log only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with the appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(msg) => {
                tracing::error!(message = %msg, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::IncorrectPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}
