//! Request extractors.

pub mod query;

pub use query::{JsonApiQuery, COMPACT_HEADER};
