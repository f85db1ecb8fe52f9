//! Resolved resource model: declarations validated and flattened for request-time use.

use crate::config::{Cardinality, SerializeMode};
use crate::query::QuerySpec;
use crate::selection::requested_fields;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// The resource's identifier field. Rendered as `id`, never as an attribute.
    Id,
    Attribute,
    Relationship {
        target: String,
        cardinality: Cardinality,
        serialize: SerializeMode,
    },
}

/// A declared field of a resource type. Built once at registration and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceField {
    /// Name on the underlying entity (row key).
    pub underlying_name: String,
    /// Name in the serialized document.
    pub json_name: String,
    pub kind: FieldKind,
}

impl ResourceField {
    pub fn attribute(underlying_name: impl Into<String>, json_name: impl Into<String>) -> Self {
        ResourceField {
            underlying_name: underlying_name.into(),
            json_name: json_name.into(),
            kind: FieldKind::Attribute,
        }
    }

    pub fn relationship(
        underlying_name: impl Into<String>,
        json_name: impl Into<String>,
        target: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        ResourceField {
            underlying_name: underlying_name.into(),
            json_name: json_name.into(),
            kind: FieldKind::Relationship {
                target: target.into(),
                cardinality,
                serialize: SerializeMode::Lazy,
            },
        }
    }

    pub fn is_relationship(&self) -> bool {
        matches!(self.kind, FieldKind::Relationship { .. })
    }
}

#[derive(Clone, Debug)]
pub struct ResourceInformation {
    pub resource_type: String,
    pub path_segment: String,
    pub id_field: String,
    /// All declared fields in declaration order, the id field included.
    pub fields: Vec<ResourceField>,
}

impl ResourceInformation {
    pub fn attribute_fields(&self) -> Vec<&ResourceField> {
        self.fields.iter().filter(|f| f.kind == FieldKind::Attribute).collect()
    }

    pub fn relationship_fields(&self) -> Vec<&ResourceField> {
        self.fields.iter().filter(|f| f.is_relationship()).collect()
    }

    /// Looks a field up by underlying name first, then by json name.
    pub fn find_field_by_name(&self, name: &str) -> Option<&ResourceField> {
        self.fields
            .iter()
            .find(|f| f.underlying_name == name)
            .or_else(|| self.fields.iter().find(|f| f.json_name == name))
    }

    pub fn find_field_by_json_name(&self, json_name: &str) -> Option<&ResourceField> {
        self.fields.iter().find(|f| f.json_name == json_name)
    }

    /// Fields of this resource requested by `query`. See [`requested_fields`].
    pub fn requested_fields(&self, query: Option<&QuerySpec>, relation: bool) -> Vec<&ResourceField> {
        requested_fields(&self.resource_type, query, &self.fields, relation)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceInformation>,
    by_type: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub(crate) fn from_resources(resources: Vec<ResourceInformation>) -> Self {
        let by_type = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.resource_type.clone(), i))
            .collect();
        let by_path = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.path_segment.clone(), i))
            .collect();
        ResourceRegistry {
            resources,
            by_type,
            by_path,
        }
    }

    pub fn get_entry(&self, resource_type: &str) -> Option<&ResourceInformation> {
        self.by_type.get(resource_type).map(|&i| &self.resources[i])
    }

    pub fn find_by_path(&self, path_segment: &str) -> Option<&ResourceInformation> {
        self.by_path.get(path_segment).map(|&i| &self.resources[i])
    }

    pub fn has_entry(&self, resource_type: &str) -> bool {
        self.by_type.contains_key(resource_type)
    }

    pub fn resources(&self) -> &[ResourceInformation] {
        &self.resources
    }
}
