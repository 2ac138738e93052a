//! Application error taxonomy and its HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Store code
//! propagates `sqlx::Error` with `?` through the [`From`] impl, request DTOs
//! propagate `validator::ValidationErrors` the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target is not an absolute `http`/`https` URL.
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    /// Caller-supplied code does not match `^[A-Za-z0-9]{6,8}$` or is reserved.
    #[error("Invalid short code: {reason}")]
    InvalidCodeFormat { reason: String },

    /// Caller-supplied code is already stored.
    #[error("Short code '{code}' already exists")]
    CodeConflict { code: String },

    /// Generation gave up after the configured number of attempts.
    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// Absent, deleted, or malformed code.
    #[error("Short link not found")]
    NotFound,

    #[error("Storage failure: {0}")]
    StoreFailure(#[from] sqlx::Error),
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn invalid_code(reason: impl Into<String>) -> Self {
        Self::InvalidCodeFormat {
            reason: reason.into(),
        }
    }

    pub fn conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidCodeFormat { .. } => StatusCode::BAD_REQUEST,
            Self::CodeConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AllocationExhausted { .. } | Self::StoreFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the JSON payload sent to clients.
    ///
    /// Storage failures are reported without the underlying driver message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::InvalidUrl { reason } => ("invalid_url", json!({ "reason": reason })),
            Self::InvalidCodeFormat { reason } => {
                ("invalid_code_format", json!({ "reason": reason }))
            }
            Self::CodeConflict { code } => ("code_conflict", json!({ "code": code })),
            Self::AllocationExhausted { attempts } => {
                ("allocation_exhausted", json!({ "attempts": attempts }))
            }
            Self::NotFound => ("not_found", json!({})),
            Self::StoreFailure(_) => ("store_failure", json!({})),
        };

        let message = match self {
            Self::StoreFailure(_) => "Storage failure".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        if field_errors.contains_key("code") {
            Self::invalid_code("code must be 6-8 alphanumeric characters")
        } else {
            Self::invalid_url(errors.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::StoreFailure(ref source) = self {
            tracing::error!(error = %source, "Storage failure");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_url("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_code("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict("abc123").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::AllocationExhausted { attempts: 20 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::StoreFailure(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_failure_hides_driver_message() {
        let info = AppError::StoreFailure(sqlx::Error::PoolTimedOut).to_error_info();

        assert_eq!(info.code, "store_failure");
        assert_eq!(info.message, "Storage failure");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_conflict_details_include_code() {
        let info = AppError::conflict("taken1").to_error_info();

        assert_eq!(info.code, "code_conflict");
        assert_eq!(info.details["code"], "taken1");
    }

    #[test]
    fn test_sqlx_error_converts_to_store_failure() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::StoreFailure(_)));
    }
}
