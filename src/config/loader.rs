//! Load resource declarations from JSON and resolve them into a registry.

use crate::config::resolved::{FieldKind, ResourceField, ResourceInformation, ResourceRegistry};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::Path;

/// Build the resource registry from declarations (validates first).
pub fn resolve(config: &FullConfig) -> Result<ResourceRegistry, ConfigError> {
    validate(config)?;

    let mut resources = Vec::with_capacity(config.resources.len());
    for res in &config.resources {
        let fields = res
            .fields
            .iter()
            .map(|f| resolve_field(config, res, f))
            .collect::<Vec<_>>();
        resources.push(ResourceInformation {
            resource_type: res.resource_type.clone(),
            path_segment: res.path_segment().to_string(),
            id_field: res.id_field.clone(),
            fields,
        });
    }

    tracing::debug!(resources = resources.len(), "resolved resource registry");
    Ok(ResourceRegistry::from_resources(resources))
}

fn resolve_field(config: &FullConfig, res: &ResourceConfig, f: &FieldConfig) -> ResourceField {
    let json_name = f
        .json_name
        .clone()
        .unwrap_or_else(|| config.json_naming.apply(&f.name));
    let kind = match &f.relationship {
        Some(rel) => FieldKind::Relationship {
            target: rel.target.clone(),
            cardinality: rel.cardinality,
            serialize: rel.serialize,
        },
        None if f.name == res.id_field => FieldKind::Id,
        None => FieldKind::Attribute,
    };
    ResourceField {
        underlying_name: f.name.clone(),
        json_name,
        kind,
    }
}

pub fn load_from_str(json: &str) -> Result<FullConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<FullConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading resource config");
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    load_from_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "json_naming": "kebab",
        "resources": [
            {
                "resource_type": "tasks",
                "fields": [
                    { "name": "id" },
                    { "name": "title" },
                    { "name": "createdAt" },
                    { "name": "project", "relationship": { "target": "projects", "cardinality": "to_one" } }
                ]
            },
            {
                "resource_type": "projects",
                "path_segment": "project-list",
                "id_field": "key",
                "fields": [
                    { "name": "key" },
                    { "name": "name", "json_name": "title" },
                    { "name": "tasks", "relationship": { "target": "tasks", "cardinality": "to_many", "serialize": "only_id" } }
                ]
            }
        ]
    }"#;

    #[test]
    fn resolves_fields_in_declaration_order() {
        let registry = resolve(&load_from_str(CONFIG).unwrap()).unwrap();
        let tasks = registry.get_entry("tasks").unwrap();
        let names: Vec<_> = tasks.fields.iter().map(|f| f.json_name.as_str()).collect();
        assert_eq!(names, vec!["id", "title", "created-at", "project"]);
        assert_eq!(tasks.fields[0].kind, FieldKind::Id);
        assert!(tasks.fields[3].is_relationship());
        assert_eq!(tasks.attribute_fields().len(), 2);
    }

    #[test]
    fn explicit_json_name_and_path_segment() {
        let registry = resolve(&load_from_str(CONFIG).unwrap()).unwrap();
        let projects = registry.find_by_path("project-list").unwrap();
        assert_eq!(projects.resource_type, "projects");
        assert_eq!(projects.find_field_by_name("title").unwrap().underlying_name, "name");
        assert_eq!(projects.find_field_by_name("name").unwrap().json_name, "title");
        match &projects.relationship_fields()[0].kind {
            FieldKind::Relationship { serialize, cardinality, .. } => {
                assert_eq!(*serialize, SerializeMode::OnlyId);
                assert_eq!(*cardinality, Cardinality::ToMany);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_load_error() {
        assert!(matches!(load_from_str("{"), Err(ConfigError::Load(_))));
    }
}
