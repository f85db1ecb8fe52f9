//! Recognizes JSON:API request paths against the registry and groups them for tagging.

use crate::config::ResourceRegistry;
use crate::document::RELATIONSHIP_MARK;
use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonPath {
    /// `/{segment}`
    Collection { resource_type: String },
    /// `/{segment}/{id}`
    Resource { resource_type: String, id: String },
    /// `/{segment}/{id}/{field}`
    Field { resource_type: String, id: String, field: String },
    /// `/{segment}/{id}/relationships/{field}`
    Relationship { resource_type: String, id: String, field: String },
}

impl JsonPath {
    /// Parses a path relative to the web prefix. Unknown segments or fields yield `None`.
    pub fn build(registry: &ResourceRegistry, path: &str) -> Option<JsonPath> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (segment, rest) = parts.split_first()?;
        let info = registry.find_by_path(segment)?;
        let resource_type = info.resource_type.clone();
        match rest {
            [] => Some(JsonPath::Collection { resource_type }),
            [id] => Some(JsonPath::Resource {
                resource_type,
                id: id.to_string(),
            }),
            [id, field] => {
                let field = info.find_field_by_json_name(field)?;
                Some(JsonPath::Field {
                    resource_type,
                    id: id.to_string(),
                    field: field.json_name.clone(),
                })
            }
            [id, mark, field] if *mark == RELATIONSHIP_MARK => {
                let field = info.find_field_by_json_name(field)?;
                Some(JsonPath::Relationship {
                    resource_type,
                    id: id.to_string(),
                    field: field.json_name.clone(),
                })
            }
            _ => None,
        }
    }

    /// Path with ids replaced by `{id}`, e.g. `tasks/{id}/relationships/project`.
    pub fn to_group_path(&self, registry: &ResourceRegistry) -> String {
        let segment = |resource_type: &str| {
            registry
                .get_entry(resource_type)
                .map(|i| i.path_segment.clone())
                .unwrap_or_else(|| resource_type.to_string())
        };
        match self {
            JsonPath::Collection { resource_type } => segment(resource_type),
            JsonPath::Resource { resource_type, .. } => format!("{}/{{id}}", segment(resource_type)),
            JsonPath::Field { resource_type, field, .. } => format!("{}/{{id}}/{}", segment(resource_type), field),
            JsonPath::Relationship { resource_type, field, .. } => {
                format!("{}/{{id}}/{}/{}", segment(resource_type), RELATIONSHIP_MARK, field)
            }
        }
    }
}

/// Strips leading slashes and the web path prefix. `None` when `path` lies outside the prefix.
pub fn strip_prefix<'a>(path: &'a str, prefix: Option<&str>) -> Option<&'a str> {
    let path = path.trim_start_matches('/');
    let Some(prefix) = prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) else {
        return Some(path);
    };
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest.trim_start_matches('/'))
    } else {
        None
    }
}

/// Grouped path of a raw request path, or `None` when it is outside the prefix or not a resource path.
pub fn group_path(registry: &ResourceRegistry, settings: &Settings, request_path: &str) -> Option<String> {
    let path = strip_prefix(request_path, settings.web_path_prefix.as_deref())?;
    let json_path = JsonPath::build(registry, path);
    if json_path.is_none() {
        tracing::debug!(path = %request_path, "unknown resource path");
    }
    json_path.map(|p| p.to_group_path(registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from_str, resolve};

    fn registry() -> ResourceRegistry {
        let config = load_from_str(
            r#"{ "json_naming": "kebab", "resources": [
                { "resource_type": "tasks", "path_segment": "todo", "fields": [
                    { "name": "id" },
                    { "name": "dueAt" },
                    { "name": "project", "relationship": { "target": "projects", "cardinality": "to_one" } }
                ] },
                { "resource_type": "projects", "fields": [ { "name": "id" } ] }
            ] }"#,
        )
        .unwrap();
        resolve(&config).unwrap()
    }

    #[test]
    fn groups_known_paths() {
        let reg = registry();
        let cases = [
            ("/todo", "todo"),
            ("/todo/12", "todo/{id}"),
            ("/todo/12/due-at", "todo/{id}/due-at"),
            ("/todo/12/relationships/project", "todo/{id}/relationships/project"),
        ];
        for (path, group) in cases {
            let json_path = JsonPath::build(&reg, path).unwrap();
            assert_eq!(json_path.to_group_path(&reg), group);
        }
    }

    #[test]
    fn unknown_paths_are_none() {
        let reg = registry();
        assert!(JsonPath::build(&reg, "/tasks").is_none());
        assert!(JsonPath::build(&reg, "/todo/1/owner").is_none());
        assert!(JsonPath::build(&reg, "/todo/1/links/project").is_none());
        assert!(JsonPath::build(&reg, "/").is_none());
    }

    #[test]
    fn strips_web_prefix() {
        assert_eq!(strip_prefix("/api/todo/1", Some("/api")), Some("todo/1"));
        assert_eq!(strip_prefix("/todo", None), Some("todo"));
        assert_eq!(strip_prefix("/apix/todo", Some("api")), None);
        assert_eq!(strip_prefix("/other", Some("api")), None);
    }

    #[test]
    fn group_path_applies_settings_prefix() {
        let reg = registry();
        let settings = Settings {
            web_path_prefix: Some("api".into()),
            ..Settings::default()
        };
        assert_eq!(group_path(&reg, &settings, "/api/todo/3").as_deref(), Some("todo/{id}"));
        assert_eq!(group_path(&reg, &settings, "/todo/3"), None);
        assert_eq!(group_path(&reg, &settings, "/api/nope"), None);
    }
}
