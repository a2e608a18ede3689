//! Error types.
//!
//! [`Error`] is returned by the URI and breadcrumb operations. [`AppError`] is the
//! HTTP-facing error produced by the middleware layer and rendered as a JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Errors raised synchronously by the library operations.
///
/// "Nothing to do" inputs (empty segment lists, empty names) are not errors;
/// these variants cover operations that cannot be carried out at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required value is missing or cannot be represented.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation violates the state of the target object.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The composed string is not a valid absolute URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument(_) | Error::InvalidUri(_) => {
                AppError::bad_request(err.to_string(), json!({}))
            }
            Error::InvalidState(_) => AppError::internal(err.to_string(), json!({})),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_validation() {
        let err: AppError = Error::InvalidArgument("field 'foo' is null".into()).into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_invalid_state_maps_to_internal() {
        let err: AppError = Error::InvalidState("closed".into()).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_parse_error_converts_to_invalid_uri() {
        let err: Error = url::Url::parse("not a uri").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUri(_)));
        assert!(err.to_string().starts_with("Invalid URI"));
    }

    #[test]
    fn test_validation_response_status() {
        let response = AppError::bad_request("bad", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_response_status() {
        let response = AppError::internal("boom", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
