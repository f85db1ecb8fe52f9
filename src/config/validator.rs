//! Registration validation: unique names, known relationship targets, usable id fields.

use crate::config::FullConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn path_segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern"))
}

fn check_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidName {
            name: name.to_string(),
            reason: "must not be empty",
        });
    }
    if name.contains('.') {
        return Err(ConfigError::InvalidName {
            name: name.to_string(),
            reason: "must not contain '.'",
        });
    }
    Ok(())
}

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    let resource_types: HashSet<&str> = config.resources.iter().map(|r| r.resource_type.as_str()).collect();

    let mut seen_types = HashSet::new();
    let mut path_segments = HashSet::new();
    for res in &config.resources {
        check_name(&res.resource_type)?;
        if !seen_types.insert(res.resource_type.as_str()) {
            return Err(ConfigError::DuplicateResourceType(res.resource_type.clone()));
        }
        let segment = res.path_segment();
        if !path_segment_pattern().is_match(segment) {
            return Err(ConfigError::InvalidName {
                name: segment.to_string(),
                reason: "path segment may only contain letters, digits, '_' and '-'",
            });
        }
        if !path_segments.insert(segment) {
            return Err(ConfigError::DuplicatePathSegment(segment.to_string()));
        }

        let mut underlying = HashSet::new();
        let mut json_names = HashSet::new();
        for field in &res.fields {
            check_name(&field.name)?;
            if !underlying.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField {
                    resource_type: res.resource_type.clone(),
                    name: field.name.clone(),
                });
            }
            let json_name = field
                .json_name
                .clone()
                .unwrap_or_else(|| config.json_naming.apply(&field.name));
            check_name(&json_name)?;
            if !json_names.insert(json_name.clone()) {
                return Err(ConfigError::DuplicateField {
                    resource_type: res.resource_type.clone(),
                    name: json_name,
                });
            }
            if let Some(rel) = &field.relationship {
                if !resource_types.contains(rel.target.as_str()) {
                    return Err(ConfigError::MissingReference {
                        kind: "resource type",
                        id: rel.target.clone(),
                    });
                }
            }
        }

        let id_ok = res
            .fields
            .iter()
            .any(|f| f.name == res.id_field && f.relationship.is_none());
        if !id_ok {
            return Err(ConfigError::InvalidIdField {
                resource_type: res.resource_type.clone(),
                field: res.id_field.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::JsonNaming;
    use crate::config::{Cardinality, FieldConfig, RelationshipConfig, ResourceConfig, SerializeMode};

    fn field(name: &str) -> FieldConfig {
        FieldConfig {
            name: name.into(),
            json_name: None,
            relationship: None,
        }
    }

    fn resource(resource_type: &str, fields: Vec<FieldConfig>) -> ResourceConfig {
        ResourceConfig {
            resource_type: resource_type.into(),
            path_segment: None,
            id_field: "id".into(),
            fields,
        }
    }

    #[test]
    fn accepts_valid_config() {
        let mut project = field("project");
        project.relationship = Some(RelationshipConfig {
            target: "projects".into(),
            cardinality: Cardinality::ToOne,
            serialize: SerializeMode::Lazy,
        });
        let config = FullConfig {
            json_naming: JsonNaming::Kebab,
            resources: vec![
                resource("tasks", vec![field("id"), field("createdAt"), project]),
                resource("projects", vec![field("id"), field("name")]),
            ],
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_json_name_collision() {
        let mut second = field("created_at");
        second.json_name = Some("created-at".into());
        let config = FullConfig {
            json_naming: JsonNaming::Kebab,
            resources: vec![resource("tasks", vec![field("id"), field("createdAt"), second])],
        };
        assert!(matches!(validate(&config), Err(ConfigError::DuplicateField { .. })));
    }

    #[test]
    fn rejects_unknown_target() {
        let mut owner = field("owner");
        owner.relationship = Some(RelationshipConfig {
            target: "users".into(),
            cardinality: Cardinality::ToOne,
            serialize: SerializeMode::Lazy,
        });
        let config = FullConfig {
            json_naming: JsonNaming::AsIs,
            resources: vec![resource("tasks", vec![field("id"), owner])],
        };
        assert!(matches!(validate(&config), Err(ConfigError::MissingReference { .. })));
    }

    #[test]
    fn rejects_missing_id_field() {
        let config = FullConfig {
            json_naming: JsonNaming::AsIs,
            resources: vec![resource("tasks", vec![field("name")])],
        };
        assert!(matches!(validate(&config), Err(ConfigError::InvalidIdField { .. })));
    }

    #[test]
    fn rejects_dotted_names_and_duplicate_types() {
        let config = FullConfig {
            json_naming: JsonNaming::AsIs,
            resources: vec![resource("tasks", vec![field("id"), field("a.b")])],
        };
        assert!(matches!(validate(&config), Err(ConfigError::InvalidName { .. })));

        let config = FullConfig {
            json_naming: JsonNaming::AsIs,
            resources: vec![
                resource("tasks", vec![field("id")]),
                resource("tasks", vec![field("id")]),
            ],
        };
        assert!(matches!(validate(&config), Err(ConfigError::DuplicateResourceType(_))));
    }
}
