//! Sparse fieldset resolution: which declared fields of a resource get serialized.

use crate::config::ResourceField;
use crate::query::{PathSpec, QuerySpec};
use std::borrow::Cow;
use std::collections::HashSet;

/// Returns the declared `fields` of `resource_type` requested by `query`, in declaration order.
///
/// With no query, no fieldset for the type, or an empty fieldset (`fields[type]=`), every
/// field is returned. An empty fieldset therefore means "unconstrained", not "no fields";
/// callers that need zero fields must handle that before calling.
///
/// When `relation` is true the type's include paths are also accepted, so a relationship
/// can be selected through either `fields` or `include`.
///
/// A field matches when its underlying name or its json name is in the effective set.
pub fn requested_fields<'a>(
    resource_type: &str,
    query: Option<&QuerySpec>,
    fields: &'a [ResourceField],
    relation: bool,
) -> Vec<&'a ResourceField> {
    let included_fields = query.and_then(|q| q.included_fields(resource_type));
    match (query, included_fields) {
        (Some(query), Some(included)) if !included.is_empty() => {
            compute_requested_fields(resource_type, query, included, fields, relation)
        }
        _ => fields.iter().collect(),
    }
}

fn compute_requested_fields<'a>(
    resource_type: &str,
    query: &QuerySpec,
    included_fields: &HashSet<PathSpec>,
    fields: &'a [ResourceField],
    relation: bool,
) -> Vec<&'a ResourceField> {
    let mut included = Cow::Borrowed(included_fields);
    if relation {
        if let Some(relations) = query.included_relations(resource_type) {
            included.to_mut().extend(relations.iter().cloned());
        }
    }

    let results: Vec<_> = fields.iter().filter(|f| is_included(f, &included)).collect();
    tracing::trace!(
        resource_type,
        relation,
        declared = fields.len(),
        selected = results.len(),
        "computed requested fields"
    );
    results
}

fn is_included(field: &ResourceField, included: &HashSet<PathSpec>) -> bool {
    // json name kept for declarations that predate underlying-name fieldsets
    included.contains(&PathSpec::of(&field.underlying_name))
        || included.contains(&PathSpec::of(&field.json_name))
}
