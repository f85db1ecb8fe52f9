//! Parses `fields[type]=a,b` and `include=rel.path` query parameters into a [`QuerySpec`].

use crate::config::ResourceRegistry;
use crate::error::AppError;
use crate::query::{PathSpec, QuerySpec};
use regex::Regex;
use std::sync::OnceLock;

fn param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(fields|include)(?:\[([^\[\]]+)\])?$").expect("static pattern"))
}

enum ParamKind {
    Fields,
    Include,
}

/// Classifies a parameter name. `Ok(None)` for parameters this parser does not handle.
fn classify(key: &str) -> Result<Option<(ParamKind, Option<&str>)>, AppError> {
    if let Some(caps) = param_pattern().captures(key) {
        let kind = match caps.get(1).map(|m| m.as_str()) {
            Some("fields") => ParamKind::Fields,
            _ => ParamKind::Include,
        };
        let resource_type = caps.get(2).map(|m| m.as_str());
        return Ok(Some((kind, resource_type)));
    }
    if key.starts_with("fields[") || key.starts_with("include[") {
        return Err(AppError::BadRequest(format!("malformed parameter name: {}", key)));
    }
    Ok(None)
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Builds the query spec for a request on `root_type` from decoded query pairs.
pub fn parse_query_spec(
    root_type: &str,
    params: &[(String, String)],
    registry: &ResourceRegistry,
) -> Result<QuerySpec, AppError> {
    if !registry.has_entry(root_type) {
        return Err(AppError::BadRequest(format!("unknown resource type: {}", root_type)));
    }

    let mut spec = QuerySpec::new();
    for (key, value) in params {
        let Some((kind, resource_type)) = classify(key)? else {
            tracing::debug!(param = %key, "ignoring query parameter");
            continue;
        };
        let resource_type = resource_type.unwrap_or(root_type);
        if !registry.has_entry(resource_type) {
            return Err(AppError::BadRequest(format!("unknown resource type: {}", resource_type)));
        }
        match kind {
            ParamKind::Fields => {
                spec.touch_fields(resource_type);
                for name in split_values(value) {
                    spec.include_field(resource_type, PathSpec::of(name));
                }
            }
            ParamKind::Include => {
                for path in split_values(value) {
                    spec.include_relation(resource_type, PathSpec::of(path));
                }
            }
        }
    }
    Ok(spec)
}
