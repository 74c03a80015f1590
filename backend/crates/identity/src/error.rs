//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Expected authentication failures (duplicate email, bad credentials,
//! store validation) carry their user-facing wording here; the use cases
//! turn them into result values. Only the remaining variants propagate as
//! `Err` and reach the centralized response mapping.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Email already registered (pre-check or store-level unique index)
    #[error("User with this email address already exists")]
    EmailTaken,

    /// Login attempted for an email with no account
    #[error("User does not exist")]
    UserNotFound,

    /// Wrong password for an existing account
    #[error("User/password combination is wrong")]
    InvalidCredentials,

    /// Store rejected the request; descriptions are user-facing, ordered
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Bearer token missing, malformed, expired, or badly signed
    #[error("Authentication token is missing or invalid")]
    TokenRejected,

    /// Token issuance failed
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::InvalidCredentials | IdentityError::TokenRejected => {
                ErrorKind::Unauthorized
            }
            IdentityError::Validation(_) => ErrorKind::BadRequest,
            IdentityError::TokenIssuance(_)
            | IdentityError::Database(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::Validation(errors) => {
                AppError::new(self.kind(), "Validation failed").with_errors(errors.clone())
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::TokenIssuance(msg) => {
                tracing::error!(message = %msg, "Token issuance error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::TokenRejected => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(IdentityError::EmailTaken.status_code(), 409);
        assert_eq!(IdentityError::UserNotFound.status_code(), 404);
        assert_eq!(IdentityError::InvalidCredentials.status_code(), 401);
        assert_eq!(IdentityError::TokenRejected.status_code(), 401);
        assert_eq!(
            IdentityError::Validation(vec!["Invalid email format".into()]).status_code(),
            400
        );
        assert_eq!(IdentityError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_user_facing_wording() {
        assert_eq!(
            IdentityError::EmailTaken.to_string(),
            "User with this email address already exists"
        );
        assert_eq!(IdentityError::UserNotFound.to_string(), "User does not exist");
        assert_eq!(
            IdentityError::InvalidCredentials.to_string(),
            "User/password combination is wrong"
        );
    }

    #[test]
    fn test_validation_app_error_keeps_list_order() {
        let err = IdentityError::Validation(vec![
            "Invalid email format".to_string(),
            "Password must be at least 8 characters (got 3)".to_string(),
        ]);
        let app_err = err.to_app_error();
        assert_eq!(app_err.errors().len(), 2);
        assert_eq!(app_err.errors()[0], "Invalid email format");
    }

    #[test]
    fn test_internal_error_is_masked_in_body() {
        let err = IdentityError::Internal("secret pool state".into());
        let body = err.to_app_error().problem_details();
        assert_eq!(body["status"], 500);
        assert!(!body.to_string().contains("secret pool state"));
    }
}
