//! The intermediate document model shared by both pipelines.
//!
//! Every value here is built fresh per call. Member order on the wire follows
//! field order: `data`, `errors`, `included`, `meta` for documents and
//! `type`, `id`, `attributes`, `meta`, `relationships` for resources.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::capability::Identifiable;
use crate::error::{Error, Result};
use crate::error_object::ErrorObject;
use crate::one_or_many::OneOrMany;

/// Relationship `data`: one identifier or an ordered list of them.
pub type Linkage = OneOrMany<ResourceIdentifier>;

/// Top-level JSON:API document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OneOrMany<ResourceObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Document {
    /// Parses a document from bytes.
    ///
    /// Always go through bytes (or [`serde_json::from_str`]): one-or-many
    /// members capture their raw text, which a pre-parsed
    /// [`serde_json::Value`] cannot provide.
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(Error::Decode)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Encode)
    }

    pub fn to_vec_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(Error::Encode)
    }

    /// True when the document carries an `errors` member.
    pub fn is_error(&self) -> bool {
        self.errors.is_some()
    }

    /// Primary resources in document order; empty when `data` is absent.
    pub fn resources(&self) -> std::slice::Iter<'_, ResourceObject> {
        match &self.data {
            Some(data) => data.iter(),
            None => Default::default(),
        }
    }

    /// Looks up a side-loaded resource.
    pub fn find_included(&self, resource_type: &str, id: &str) -> Option<&ResourceObject> {
        self.included
            .iter()
            .find(|resource| resource.resource_type == resource_type && resource.id == id)
    }
}

/// Minimal `type` + `id` reference to a resource.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ResourceIdentifier {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Captures the identity of any [`Identifiable`] value.
    pub fn of<T: Identifiable + ?Sized>(value: &T) -> Self {
        Self::new(value.resource_type(), value.id())
    }
}

impl Identifiable for ResourceIdentifier {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

/// A single resource: identity plus attributes, meta and relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Empty for resources not yet persisted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, RelationshipObject>>,
}

impl ResourceObject {
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.as_str(), self.id.as_str())
    }

    /// Decodes `attributes` into `T`. `None` when the member is absent or
    /// empty.
    pub fn decode_attributes<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.attributes {
            Some(attributes) if !attributes.is_empty() => {
                serde_json::from_value(Value::Object(attributes.clone()))
                    .map(Some)
                    .map_err(Error::Decode)
            }
            _ => Ok(None),
        }
    }

    /// The linkage of one relationship; `None` when it is absent or null.
    pub fn relationship(&self, name: &str) -> Option<&Linkage> {
        self.relationships
            .as_ref()?
            .get(name)?
            .data
            .as_ref()
    }
}

/// Wrapper around a relationship's linkage. `data` is always written, as
/// `null` when there is nothing to link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    #[serde(default)]
    pub data: Option<Linkage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl RelationshipObject {
    pub fn new(data: Option<Linkage>) -> Self {
        Self { data, meta: None }
    }
}
