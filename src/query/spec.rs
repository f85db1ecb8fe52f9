//! Per-request query state: sparse fieldsets and include paths per resource type.

use crate::query::PathSpec;
use std::collections::{HashMap, HashSet};

/// Built once per request, then only read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuerySpec {
    included_fields: HashMap<String, HashSet<PathSpec>>,
    included_relations: HashMap<String, HashSet<PathSpec>>,
    compact: bool,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_field(&mut self, resource_type: &str, path: PathSpec) -> &mut Self {
        self.included_fields
            .entry(resource_type.to_string())
            .or_default()
            .insert(path);
        self
    }

    pub fn include_relation(&mut self, resource_type: &str, path: PathSpec) -> &mut Self {
        self.included_relations
            .entry(resource_type.to_string())
            .or_default()
            .insert(path);
        self
    }

    /// Registers `resource_type` in the fieldset map without selecting anything (`fields[T]=`).
    pub fn touch_fields(&mut self, resource_type: &str) -> &mut Self {
        self.included_fields.entry(resource_type.to_string()).or_default();
        self
    }

    pub fn set_compact(&mut self, compact: bool) -> &mut Self {
        self.compact = compact;
        self
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn included_fields(&self, resource_type: &str) -> Option<&HashSet<PathSpec>> {
        self.included_fields.get(resource_type)
    }

    pub fn included_relations(&self, resource_type: &str) -> Option<&HashSet<PathSpec>> {
        self.included_relations.get(resource_type)
    }

    pub fn all_included_fields(&self) -> &HashMap<String, HashSet<PathSpec>> {
        &self.included_fields
    }

    pub fn all_included_relations(&self) -> &HashMap<String, HashSet<PathSpec>> {
        &self.included_relations
    }

    /// True when some include path of `resource_type` starts at the relation `name`.
    pub fn is_relation_included(&self, resource_type: &str, name: &str) -> bool {
        self.included_relations(resource_type)
            .map(|paths| paths.iter().any(|p| p.first() == name))
            .unwrap_or(false)
    }
}
