//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! plus the error-to-HTTP-response mapping. Every error that can surface
//! from request processing either has a `From` impl here or is wrapped as
//! an internal error by the caller, so the mapping is total.

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // Class 23 — Integrity Constraint Violation
                        "23502" => AppError::bad_request("Required field is null"),
                        "23503" => AppError::conflict("Foreign key violation"),
                        "23505" => AppError::conflict("Duplicate key value"),
                        "23514" => AppError::bad_request("Check constraint violation"),
                        // Class 53 — Insufficient Resources
                        "53000" | "53100" | "53200" | "53300" => {
                            AppError::service_unavailable("Database resource exhausted")
                        }
                        // Class 57 — Operator Intervention
                        "57000" | "57014" | "57P01" | "57P02" | "57P03" => {
                            AppError::service_unavailable("Database unavailable")
                        }
                        _ => AppError::internal("Database error"),
                    }
                } else {
                    AppError::internal("Database error")
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// HTTP response mapping
// ============================================================================

impl AppError {
    /// RFC 7807 Problem Details body for this error.
    ///
    /// Pure function of the error value: structurally equal errors produce
    /// structurally equal bodies. Server-class errors (5xx) render the
    /// generic reason phrase as detail and omit the error list, so internal
    /// messages and source chains never reach the client.
    pub fn problem_details(&self) -> serde_json::Value {
        let status = self.status_code();

        let detail = if self.is_server_error() {
            self.kind().as_str().to_string()
        } else {
            self.message().to_string()
        };

        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", status),
            "title": self.kind().as_str(),
            "status": status,
            "detail": detail,
        });

        if !self.is_server_error() && !self.errors().is_empty() {
            body["errors"] = serde_json::json!(self.errors());
        }

        body
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.problem_details())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_problem_details_client_error() {
        let err = AppError::bad_request("Validation failed")
            .with_errors(vec!["Invalid email format".to_string()]);
        let body = err.problem_details();

        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Bad Request");
        assert_eq!(body["detail"], "Validation failed");
        assert_eq!(body["errors"][0], "Invalid email format");
    }

    #[test]
    fn test_problem_details_masks_server_errors() {
        let io_err = std::io::Error::other("connection refused to 10.0.0.3:5432");
        let err = AppError::internal("pool exhausted talking to primary").with_source(io_err);
        let body = err.problem_details();

        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "Internal Server Error");
        assert!(body.get("errors").is_none());
        assert!(!body.to_string().contains("10.0.0.3"));
        assert!(!body.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_problem_details_idempotent() {
        let make = || {
            AppError::conflict("Duplicate key value")
                .with_errors(vec!["User with this email address already exists".to_string()])
        };
        assert_eq!(make().problem_details(), make().problem_details());

        // Mapping the same value twice yields the same body
        let err = make();
        assert_eq!(err.problem_details(), err.problem_details());
    }

    #[test]
    fn test_unrecognized_error_maps_to_generic_500() {
        // Any error type without a dedicated conversion is wrapped as internal
        #[derive(Debug)]
        struct WeirdError;
        impl std::fmt::Display for WeirdError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "weird internal state")
            }
        }
        impl std::error::Error for WeirdError {}

        let err = AppError::internal("unexpected failure").with_source(WeirdError);
        let body = err.problem_details();
        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "Internal Server Error");
        assert!(!body.to_string().contains("weird internal state"));
    }
}
