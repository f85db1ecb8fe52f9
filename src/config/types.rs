//! Raw resource declarations as read from JSON.

use crate::case::JsonNaming;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// How relationship data is rendered when the relation is not explicitly included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializeMode {
    /// Links only, data only when requested through `include`.
    #[default]
    Lazy,
    /// Always render resource identifiers.
    OnlyId,
    /// Always render resource identifiers; the related resource is expected to be loaded.
    Eager,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelationshipConfig {
    /// Resource type of the related resource.
    pub target: String,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub serialize: SerializeMode,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub json_name: Option<String>,
    #[serde(default)]
    pub relationship: Option<RelationshipConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub resource_type: String,
    #[serde(default)]
    pub path_segment: Option<String>,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    pub fields: Vec<FieldConfig>,
}

fn default_id_field() -> String {
    "id".into()
}

impl ResourceConfig {
    pub fn path_segment(&self) -> &str {
        self.path_segment.as_deref().unwrap_or(&self.resource_type)
    }
}

/// All resource declarations in one struct.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FullConfig {
    #[serde(default)]
    pub json_naming: JsonNaming,
    pub resources: Vec<ResourceConfig>,
}
