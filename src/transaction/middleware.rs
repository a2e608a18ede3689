//! Unit-of-work request middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use super::unit_of_work::{Outcome, UnitOfWork};
use crate::config::Config;
use crate::error::AppError;

/// Middleware state: the unit of work and the rollback policy.
#[derive(Clone)]
pub struct UnitOfWorkLayer {
    unit_of_work: Arc<dyn UnitOfWork>,
    rollback_on_validation_error: bool,
}

impl UnitOfWorkLayer {
    /// Rolls back on validation failures by default.
    pub fn new(unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            unit_of_work,
            rollback_on_validation_error: true,
        }
    }

    pub fn from_config(unit_of_work: Arc<dyn UnitOfWork>, config: &Config) -> Self {
        Self::new(unit_of_work).rollback_on_validation_error(config.rollback_on_validation_error)
    }

    pub fn rollback_on_validation_error(mut self, enabled: bool) -> Self {
        self.rollback_on_validation_error = enabled;
        self
    }
}

/// Wraps a handler in a unit of work.
///
/// # Flow
///
/// 1. Start a scope before the handler runs
/// 2. Run the handler
/// 3. Roll back on 5xx responses, and on 400/422 when the layer is configured to
///    roll back on validation errors; commit otherwise
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the scope cannot be started (the handler
/// is not run) or if the commit fails (a rollback is attempted first).
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use weblinks::transaction::{self, UnitOfWorkLayer};
///
/// let app = Router::new()
///     .route("/orders", post(create_order))
///     .layer(middleware::from_fn_with_state(
///         UnitOfWorkLayer::new(unit_of_work),
///         transaction::layer,
///     ));
/// ```
pub async fn layer(
    State(st): State<UnitOfWorkLayer>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mut scope = st.unit_of_work.start().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to start unit of work");
        AppError::internal("Failed to start transaction", json!({}))
    })?;

    let response = next.run(req).await;
    let status = response.status();

    match Outcome::for_status(status, st.rollback_on_validation_error) {
        Outcome::Commit => {
            if let Err(e) = scope.commit().await {
                tracing::error!(error = %e, "Unit of work commit failed, rolling back");
                if let Err(e) = scope.rollback().await {
                    tracing::error!(error = %e, "Unit of work rollback failed");
                }
                return Err(AppError::internal(
                    "Failed to commit transaction",
                    json!({}),
                ));
            }
            tracing::debug!(%status, "Unit of work committed");
        }
        Outcome::Rollback => match scope.rollback().await {
            Ok(()) => tracing::debug!(%status, "Unit of work rolled back"),
            Err(e) => tracing::warn!(%status, error = %e, "Unit of work rollback failed"),
        },
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::unit_of_work::{MockUnitOfWork, MockUnitOfWorkScope, UnitOfWorkScope};
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn app(unit_of_work: MockUnitOfWork, rollback_on_validation_error: bool) -> Router {
        let state = UnitOfWorkLayer::new(Arc::new(unit_of_work))
            .rollback_on_validation_error(rollback_on_validation_error);

        Router::new()
            .route("/ok", get(|| async { "done" }))
            .route("/invalid", get(|| async { StatusCode::UNPROCESSABLE_ENTITY }))
            .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .layer(middleware::from_fn_with_state(state, layer))
    }

    fn unit_of_work_with(scope: MockUnitOfWorkScope) -> MockUnitOfWork {
        let mut unit_of_work = MockUnitOfWork::new();
        unit_of_work
            .expect_start()
            .times(1)
            .return_once(move || Ok(Box::new(scope) as Box<dyn UnitOfWorkScope>));
        unit_of_work
    }

    async fn send(app: Router, uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_success_commits() {
        let mut scope = MockUnitOfWorkScope::new();
        scope.expect_commit().times(1).returning(|| Ok(()));
        scope.expect_rollback().times(0);

        let status = send(app(unit_of_work_with(scope), true), "/ok").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_server_error_rolls_back() {
        let mut scope = MockUnitOfWorkScope::new();
        scope.expect_commit().times(0);
        scope.expect_rollback().times(1).returning(|| Ok(()));

        let status = send(app(unit_of_work_with(scope), true), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_error_rolls_back_when_enabled() {
        let mut scope = MockUnitOfWorkScope::new();
        scope.expect_commit().times(0);
        scope.expect_rollback().times(1).returning(|| Ok(()));

        let status = send(app(unit_of_work_with(scope), true), "/invalid").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_validation_error_commits_when_disabled() {
        let mut scope = MockUnitOfWorkScope::new();
        scope.expect_commit().times(1).returning(|| Ok(()));
        scope.expect_rollback().times(0);

        let status = send(app(unit_of_work_with(scope), false), "/invalid").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_commit_failure_rolls_back_and_returns_500() {
        let mut scope = MockUnitOfWorkScope::new();
        scope
            .expect_commit()
            .times(1)
            .returning(|| Err(AppError::internal("disk full", json!({}))));
        scope.expect_rollback().times(1).returning(|| Ok(()));

        let status = send(app(unit_of_work_with(scope), true), "/ok").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_rollback_failure_keeps_handler_response() {
        let mut scope = MockUnitOfWorkScope::new();
        scope
            .expect_rollback()
            .times(1)
            .returning(|| Err(AppError::internal("connection lost", json!({}))));

        let status = send(app(unit_of_work_with(scope), true), "/invalid").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_start_failure_skips_handler() {
        let mut unit_of_work = MockUnitOfWork::new();
        unit_of_work
            .expect_start()
            .times(1)
            .returning(|| Err(AppError::internal("pool exhausted", json!({}))));

        let status = send(app(unit_of_work, true), "/ok").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
