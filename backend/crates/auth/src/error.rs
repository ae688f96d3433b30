//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Expected verification outcomes (unknown identifier, wrong secret,
//! absent session reference) are ordinary return values, not errors -
//! see `application::verify_credentials`. The variants here cover
//! boundary rejections and infrastructure faults only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Sign-in rejected (single generic form shown to clients)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Operation requires an anonymous session
    #[error("Already signed in")]
    AlreadyAuthenticated,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Input validation error (email shape, display name)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The hashing primitive failed - infrastructure, not a mismatch
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyAuthenticated => StatusCode::CONFLICT,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Hashing(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::AlreadyAuthenticated => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Hashing(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing fault");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::AlreadyAuthenticated.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Validation("bad email".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            AuthError::InvalidCredentials,
            AuthError::AlreadyAuthenticated,
            AuthError::SessionInvalid,
            AuthError::Validation("x".into()),
            AuthError::Internal("x".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_generic_credentials_message() {
        // Clients must not be able to tell the rejection reasons apart
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
