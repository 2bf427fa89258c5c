//! HTTP handlers: SQL passthrough, API dispatch, reverse proxy, static files.

pub mod api;
pub mod files;
pub mod proxy;
pub mod query;
pub use files::fallback;
pub use proxy::forward;
pub use query::{query_method_not_allowed, run_query};
