//! Response document building blocks.

pub mod mapper;
pub mod model;

pub use mapper::{to_list, DocumentMapperUtil, QueryContext, RELATIONSHIP_MARK};
pub use model::*;
