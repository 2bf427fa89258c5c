//! SQL plumbing: bind values from JSON, rows to JSON, named placeholder rewriting.

pub mod params;
pub mod rows;
mod template;
pub use params::*;
pub use rows::*;
pub use template::*;
