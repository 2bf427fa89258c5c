//! Statement execution against the shared connection.

pub mod query;
pub use query::QueryService;
