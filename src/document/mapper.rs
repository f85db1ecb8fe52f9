//! Maps entities to resource identifiers, resource objects, links and meta blocks.

use crate::config::{Cardinality, FieldKind, ResourceField, ResourceInformation, ResourceRegistry, SerializeMode};
use crate::document::model::*;
use crate::error::AppError;
use crate::query::QuerySpec;
use crate::selection::requested_fields;
use crate::settings::Settings;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Path segment marking relationship (linkage) urls.
pub const RELATIONSHIP_MARK: &str = "relationships";

/// Request-scoped values needed to build urls.
#[derive(Clone, Debug)]
pub struct QueryContext {
    pub base_url: String,
}

impl QueryContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        QueryContext {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.base_url.clone())
    }
}

/// Arrays yield their items; any other value is a single element.
pub fn to_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Clone)]
pub struct DocumentMapperUtil {
    registry: Arc<ResourceRegistry>,
    serialize_links_as_objects: bool,
}

impl DocumentMapperUtil {
    pub fn new(registry: Arc<ResourceRegistry>, settings: &Settings) -> Self {
        DocumentMapperUtil {
            registry,
            serialize_links_as_objects: settings.serialize_links_as_objects,
        }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn get_resource_information(&self, resource_type: &str) -> Result<&ResourceInformation, AppError> {
        self.registry
            .get_entry(resource_type)
            .ok_or_else(|| AppError::NotFound(format!("resource type {}", resource_type)))
    }

    fn entity_id(&self, info: &ResourceInformation, data: &Map<String, Value>) -> Result<String, AppError> {
        data.get(&info.id_field)
            .and_then(id_string)
            .ok_or_else(|| AppError::MissingId {
                resource_type: info.resource_type.clone(),
                field: info.id_field.clone(),
            })
    }

    pub fn to_resource_id(&self, entity: Option<&Entity>) -> Result<Option<ResourceIdentifier>, AppError> {
        let Some(entity) = entity else {
            return Ok(None);
        };
        let info = self.get_resource_information(&entity.resource_type)?;
        let id = self.entity_id(info, &entity.data)?;
        Ok(Some(ResourceIdentifier::new(info.resource_type.clone(), id)))
    }

    pub fn to_resource_ids(&self, entities: &[Entity]) -> Result<Vec<ResourceIdentifier>, AppError> {
        let mut results = Vec::with_capacity(entities.len());
        for entity in entities {
            if let Some(id) = self.to_resource_id(Some(entity))? {
                results.push(id);
            }
        }
        Ok(results)
    }

    /// Identifier of a related value: a nested object of `target_type` or a bare id.
    pub fn identifier_for(&self, target_type: &str, value: &Value) -> Result<Option<ResourceIdentifier>, AppError> {
        let info = self.get_resource_information(target_type)?;
        let id = match value {
            Value::Null => return Ok(None),
            Value::Object(data) => self.entity_id(info, data)?,
            other => id_string(other).ok_or_else(|| {
                AppError::InvalidData(format!("unsupported id value for {}: {}", target_type, other))
            })?,
        };
        Ok(Some(ResourceIdentifier::new(info.resource_type.clone(), id)))
    }

    fn resource_url(&self, ctx: &QueryContext, info: &ResourceInformation, id: &str) -> String {
        format!("{}/{}/{}", ctx.base_url, info.path_segment, id)
    }

    pub fn get_resource_url(&self, ctx: &QueryContext, entity: &Entity) -> Result<String, AppError> {
        let info = self.get_resource_information(&entity.resource_type)?;
        let id = self.entity_id(info, &entity.data)?;
        Ok(self.resource_url(ctx, info, &id))
    }

    pub fn get_self_url(&self, ctx: &QueryContext, entity: &Entity) -> Result<String, AppError> {
        self.get_resource_url(ctx, entity)
    }

    /// `{resource}/relationships/{field}` when `related` is false, `{resource}/{field}` otherwise.
    pub fn get_relationship_link(
        &self,
        ctx: &QueryContext,
        entity: &Entity,
        field: &ResourceField,
        related: bool,
    ) -> Result<String, AppError> {
        let resource_url = self.get_resource_url(ctx, entity)?;
        Ok(relationship_link(&resource_url, field, related))
    }

    pub fn serialize_link(&self, url: String) -> Value {
        if self.serialize_links_as_objects {
            serde_json::json!({ "href": url })
        } else {
            Value::String(url)
        }
    }

    /// Attaches serialized links. In compact mode `self` is dropped, and the block with it if nothing remains.
    pub fn set_links<C, L>(&self, container: &mut C, links: Option<&L>, query: Option<&QuerySpec>) -> Result<(), AppError>
    where
        C: LinksContainer,
        L: Serialize,
    {
        if let Some(links) = links {
            match serde_json::to_value(links)? {
                Value::Object(map) => {
                    tracing::debug!(links = ?map, "adding links information");
                    container.set_links(Some(map));
                }
                Value::Null => {}
                other => {
                    return Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                        "links must serialize to an object, got {}",
                        other
                    ))
                    .into());
                }
            }
        }
        if query.map(QuerySpec::compact).unwrap_or(false) {
            let now_empty = container.links_mut().map(|links| {
                links.remove("self");
                links.is_empty()
            });
            if now_empty == Some(true) {
                container.set_links(None);
            }
        }
        Ok(())
    }

    pub fn set_meta<C, M>(&self, container: &mut C, meta: Option<&M>) -> Result<(), AppError>
    where
        C: MetaContainer,
        M: Serialize,
    {
        if let Some(meta) = meta {
            let value = serde_json::to_value(meta)?;
            tracing::debug!(meta = %value, "adding meta information");
            container.set_meta(Some(value));
        }
        Ok(())
    }

    /// Resource object for `entity` honouring sparse fieldsets, includes and compact mode.
    pub fn to_resource(&self, entity: &Entity, query: Option<&QuerySpec>, ctx: &QueryContext) -> Result<Resource, AppError> {
        let info = self.get_resource_information(&entity.resource_type)?;
        let id = self.entity_id(info, &entity.data)?;
        let resource_url = self.resource_url(ctx, info, &id);
        let mut resource = Resource::new(info.resource_type.clone(), id);

        // kind filter after selection, so output follows declaration order
        let attributes = requested_fields(&info.resource_type, query, &info.fields, false)
            .into_iter()
            .filter(|f| f.kind == FieldKind::Attribute);
        for field in attributes {
            let value = entity.data.get(&field.underlying_name).cloned().unwrap_or(Value::Null);
            resource.attributes.insert(field.json_name.clone(), value);
        }

        let relationships = requested_fields(&info.resource_type, query, &info.fields, true)
            .into_iter()
            .filter(|f| f.is_relationship());
        for field in relationships {
            let relationship = self.to_relationship(info, &resource_url, entity, field, query)?;
            resource.relationships.insert(field.json_name.clone(), relationship);
        }

        let links = DefaultSelfRelatedLinks {
            self_link: Some(self.serialize_link(resource_url)),
            related: None,
        };
        self.set_links(&mut resource, Some(&links), query)?;
        Ok(resource)
    }

    fn to_relationship(
        &self,
        info: &ResourceInformation,
        resource_url: &str,
        entity: &Entity,
        field: &ResourceField,
        query: Option<&QuerySpec>,
    ) -> Result<Relationship, AppError> {
        let FieldKind::Relationship { target, cardinality, serialize } = &field.kind else {
            return Ok(Relationship::default());
        };
        let mut relationship = Relationship::default();

        let links = DefaultSelfRelatedLinks {
            self_link: Some(self.serialize_link(relationship_link(resource_url, field, false))),
            related: Some(self.serialize_link(relationship_link(resource_url, field, true))),
        };
        self.set_links(&mut relationship, Some(&links), query)?;

        let included = query
            .map(|q| {
                q.is_relation_included(&info.resource_type, &field.underlying_name)
                    || q.is_relation_included(&info.resource_type, &field.json_name)
            })
            .unwrap_or(false);
        if included || *serialize != SerializeMode::Lazy {
            let value = entity.data.get(&field.underlying_name).unwrap_or(&Value::Null);
            relationship.data = Some(self.relationship_data(target, *cardinality, value)?);
        }
        Ok(relationship)
    }

    fn relationship_data(&self, target: &str, cardinality: Cardinality, value: &Value) -> Result<Value, AppError> {
        match cardinality {
            Cardinality::ToOne => match self.identifier_for(target, value)? {
                Some(id) => Ok(serde_json::to_value(id)?),
                None => Ok(Value::Null),
            },
            Cardinality::ToMany => {
                let mut ids = Vec::new();
                if !value.is_null() {
                    for item in to_list(value) {
                        if let Some(id) = self.identifier_for(target, item)? {
                            ids.push(serde_json::to_value(id)?);
                        }
                    }
                }
                Ok(Value::Array(ids))
            }
        }
    }
}

fn relationship_link(resource_url: &str, field: &ResourceField, related: bool) -> String {
    if related {
        format!("{}/{}", resource_url, field.json_name)
    } else {
        format!("{}/{}/{}", resource_url, RELATIONSHIP_MARK, field.json_name)
    }
}
