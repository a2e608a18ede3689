//! Request-scoped transactions.
//!
//! - [`unit_of_work`] - [`UnitOfWork`] / [`UnitOfWorkScope`] traits and commit policy
//! - [`middleware`] - Axum middleware opening a scope around each handler

pub mod middleware;
pub mod unit_of_work;

pub use middleware::{UnitOfWorkLayer, layer};
pub use unit_of_work::{Outcome, UnitOfWork, UnitOfWorkScope};
