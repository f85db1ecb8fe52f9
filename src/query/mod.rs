//! Query model: path specs, the per-request query spec, and query-string parsing.

pub mod parser;
pub mod path_spec;
pub mod spec;

pub use parser::parse_query_spec;
pub use path_spec::PathSpec;
pub use spec::QuerySpec;
