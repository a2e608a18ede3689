//! URI composition.
//!
//! - [`segment`] - Classifies raw tokens and combines them into `path?query#fragment`
//! - [`builder`] - Mutable [`UriBuilder`] with path and query operations
//! - [`query`] - Ordered query parameter multi-map

pub mod builder;
pub mod query;
pub mod segment;

pub use builder::{UriBuilder, combine_uri};
pub use query::QueryParams;
pub use segment::{Token, classify, combine};
