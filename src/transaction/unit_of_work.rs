//! Unit-of-work abstraction driven by the request middleware.

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::error::AppError;

/// Factory for transaction scopes, typically backed by a connection pool.
///
/// # Implementations
///
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Opens a new scope.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] if the underlying transaction cannot be opened.
    async fn start(&self) -> Result<Box<dyn UnitOfWorkScope>, AppError>;
}

/// One open transaction.
///
/// A scope dropped without [`commit`](UnitOfWorkScope::commit) must discard its work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWorkScope: Send {
    async fn commit(&mut self) -> Result<(), AppError>;

    async fn rollback(&mut self) -> Result<(), AppError>;
}

/// What to do with a scope once the handler has produced its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Commit,
    Rollback,
}

impl Outcome {
    /// Server errors always roll back. Validation failures (400, 422) roll back
    /// when `rollback_on_validation_error` is set.
    pub fn for_status(status: StatusCode, rollback_on_validation_error: bool) -> Self {
        let validation_failed =
            matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY);

        if status.is_server_error() || (rollback_on_validation_error && validation_failed) {
            Outcome::Rollback
        } else {
            Outcome::Commit
        }
    }
}
