//! # weblinks
//!
//! Link-building helpers for Axum web applications.
//!
//! ## Modules
//!
//! - **URI composition** ([`uri`]) - Combine loosely structured path, query and
//!   fragment tokens; rewrite a [`UriBuilder`]'s path and query parameters
//! - **Breadcrumbs** ([`breadcrumbs`]) - Navigation trail closed by its active entry
//! - **Transactions** ([`transaction`]) - Unit-of-work middleware committing or
//!   rolling back around each handler
//!
//! ## Quick Start
//!
//! ```
//! use weblinks::UriBuilder;
//!
//! let mut builder = UriBuilder::parse("http://example.com")?;
//! builder
//!     .path_combine(["test"])
//!     .add_query_params([("foo", "bar"), ("php", "hypertext processor")]);
//!
//! assert_eq!(
//!     builder.to_string(),
//!     "http://example.com/test?foo=bar&php=hypertext+processor"
//! );
//! # Ok::<(), weblinks::Error>(())
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod breadcrumbs;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod transaction;
pub mod uri;

pub use error::{AppError, Error, Result};
pub use uri::{QueryParams, UriBuilder, combine, combine_uri};

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::breadcrumbs::{Breadcrumb, BreadcrumbsModel};
    pub use crate::error::{AppError, Error};
    pub use crate::transaction::{UnitOfWork, UnitOfWorkLayer, UnitOfWorkScope};
    pub use crate::uri::{QueryParams, UriBuilder, combine, combine_uri};
}
