//! JSON:API SDK: sparse fieldsets, include paths, resource identifiers and links for
//! registry-driven resources.

pub mod case;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod path;
pub mod query;
pub mod selection;
pub mod settings;

pub use config::{load_from_path, load_from_str, resolve, FullConfig, ResourceField, ResourceInformation, ResourceRegistry};
pub use document::{DocumentMapperUtil, Entity, QueryContext, Resource, ResourceIdentifier};
pub use error::{AppError, ConfigError};
pub use extractors::JsonApiQuery;
pub use path::{group_path, JsonPath};
pub use query::{parse_query_spec, PathSpec, QuerySpec};
pub use selection::requested_fields;
pub use settings::Settings;
