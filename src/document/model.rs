//! Serializable document pieces: identifiers, resource objects, relationships, links and meta containers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        ResourceIdentifier {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// A row of a registered resource type, keyed by underlying field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub resource_type: String,
    pub data: Map<String, Value>,
}

impl Entity {
    pub fn new(resource_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Entity {
            resource_type: resource_type.into(),
            data,
        }
    }
}

pub trait LinksContainer {
    fn links(&self) -> Option<&Map<String, Value>>;
    fn set_links(&mut self, links: Option<Map<String, Value>>);
    fn links_mut(&mut self) -> Option<&mut Map<String, Value>>;
}

pub trait MetaContainer {
    fn meta(&self) -> Option<&Value>;
    fn set_meta(&mut self, meta: Option<Value>);
}

macro_rules! impl_containers {
    ($ty:ty) => {
        impl LinksContainer for $ty {
            fn links(&self) -> Option<&Map<String, Value>> {
                self.links.as_ref()
            }

            fn set_links(&mut self, links: Option<Map<String, Value>>) {
                self.links = links;
            }

            fn links_mut(&mut self) -> Option<&mut Map<String, Value>> {
                self.links.as_mut()
            }
        }

        impl MetaContainer for $ty {
            fn meta(&self) -> Option<&Value> {
                self.meta.as_ref()
            }

            fn set_meta(&mut self, meta: Option<Value>) {
                self.meta = meta;
            }
        }
    };
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Relationship {
    /// `None` omits `data`; `Some(Value::Null)` renders an empty to-one relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    /// Keyed by json name, in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub relationships: IndexMap<String, Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Resource {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes: Map::new(),
            relationships: IndexMap::new(),
            links: None,
            meta: None,
        }
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
    }
}

/// Top-level wrapper. Compound documents (`included`) are not assembled here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Document {
    pub fn new(data: Value) -> Self {
        Document {
            data,
            links: None,
            meta: None,
        }
    }
}

impl_containers!(Relationship);
impl_containers!(Resource);
impl_containers!(Document);

/// Links block with optional `self` and `related` members; absent members are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DefaultSelfRelatedLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_uses_type_key() {
        let v = serde_json::to_value(ResourceIdentifier::new("tasks", "1")).unwrap();
        assert_eq!(v, json!({ "type": "tasks", "id": "1" }));
    }

    #[test]
    fn empty_members_are_omitted() {
        let v = serde_json::to_value(Resource::new("tasks", "1")).unwrap();
        assert_eq!(v, json!({ "type": "tasks", "id": "1" }));
        let links = DefaultSelfRelatedLinks {
            self_link: None,
            related: Some(json!("http://x/tasks/1/project")),
        };
        assert_eq!(serde_json::to_value(links).unwrap(), json!({ "related": "http://x/tasks/1/project" }));
    }

    #[test]
    fn null_to_one_data_is_rendered() {
        let rel = Relationship {
            data: Some(Value::Null),
            ..Relationship::default()
        };
        assert_eq!(serde_json::to_value(rel).unwrap(), json!({ "data": null }));
    }
}
