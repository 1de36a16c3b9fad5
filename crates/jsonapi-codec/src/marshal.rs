//! Marshal pipeline: Rust values to JSON:API documents.
//!
//! Two capability layers are consulted. [`MarshalDocument`] is the outermost
//! value: a resource, a collection, an error list, or a wrapper that carries
//! document-level meta, included resources or errors alongside a payload.
//! [`MarshalResource`] covers each individual resource, wherever it appears.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::capability::{has_content, Encodable, Identifiable};
use crate::document::{Document, Linkage, RelationshipObject, ResourceIdentifier, ResourceObject};
use crate::error::{json_kind, Error, Result};
use crate::error_object::ErrorObject;
use crate::one_or_many::OneOrMany;
use crate::relationships::Relationships;

// ── Capabilities ──────────────────────────────────────────────────────────

/// A resource that can be written as a resource object.
///
/// Its `Serialize` output becomes `attributes`, so identity and relationship
/// fields should be excluded with `#[serde(skip)]`. Every other method is an
/// optional capability.
///
/// ```
/// use jsonapi_codec::{marshal, Identifiable, MarshalResource, Relationships, ResourceIdentifier};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Book {
///     #[serde(skip)]
///     id: String,
///     #[serde(skip)]
///     author_id: String,
///     title: String,
/// }
///
/// impl Identifiable for Book {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn resource_type(&self) -> &str {
///         "books"
///     }
/// }
///
/// impl MarshalResource for Book {
///     fn relationships(&self) -> Relationships {
///         Relationships::new().with("author", &ResourceIdentifier::new("authors", self.author_id.as_str()))
///     }
/// }
///
/// let book = Book { id: "1".into(), author_id: "1".into(), title: "Intro to X".into() };
/// assert_eq!(
///     String::from_utf8(marshal(&book).unwrap()).unwrap(),
///     r#"{"data":{"type":"books","id":"1","attributes":{"title":"Intro to X"},"relationships":{"author":{"data":{"type":"authors","id":"1"}}}}}"#
/// );
/// ```
pub trait MarshalResource: Identifiable + Serialize {
    /// Relationship name to related value. Empty means no `relationships`
    /// member.
    fn relationships(&self) -> Relationships {
        Relationships::new()
    }

    /// Per-resource meta. `None`, `null` and `{}` are all omitted.
    fn meta(&self) -> Option<Value> {
        None
    }

    /// Related resources to side-load into the document's `included`.
    fn included(&self) -> Vec<Box<dyn Encodable + '_>> {
        Vec::new()
    }
}

macro_rules! deref_marshal_resource {
    ($($ptr:ty),*) => {$(
        impl<T: MarshalResource + ?Sized> MarshalResource for $ptr {
            fn relationships(&self) -> Relationships {
                (**self).relationships()
            }

            fn meta(&self) -> Option<Value> {
                (**self).meta()
            }

            fn included(&self) -> Vec<Box<dyn Encodable + '_>> {
                (**self).included()
            }
        }
    )*};
}

deref_marshal_resource!(&T, Box<T>, Rc<T>, Arc<T>);

/// Primary data as seen by the marshal pipeline.
pub enum PrimaryData<'a> {
    None,
    One(&'a dyn Encodable),
    Many(Vec<&'a dyn Encodable>),
}

/// The outermost value handed to [`marshal`].
///
/// Implemented for every [`MarshalResource`] (single resource), for slices
/// and `Vec`s of them (collection), and for slices and `Vec`s of
/// [`ErrorObject`] (error document). Implement it on a wrapper to put
/// document-level meta, included resources or errors next to a payload.
pub trait MarshalDocument {
    fn data(&self) -> PrimaryData<'_> {
        PrimaryData::None
    }

    /// `Some` turns the output into an error document: no `data`, no
    /// `included`.
    fn errors(&self) -> Option<Vec<ErrorObject>> {
        None
    }

    /// Document `meta`. When `None` and the payload is a single resource,
    /// that resource's own meta is used.
    fn document_meta(&self) -> Option<Value> {
        None
    }

    /// Side-loaded resources in addition to those the primary resources
    /// report themselves. These come first in `included`.
    fn document_included(&self) -> Vec<Box<dyn Encodable + '_>> {
        Vec::new()
    }
}

impl<T: MarshalResource> MarshalDocument for T {
    fn data(&self) -> PrimaryData<'_> {
        PrimaryData::One(self)
    }
}

impl<T: MarshalResource> MarshalDocument for [T] {
    fn data(&self) -> PrimaryData<'_> {
        PrimaryData::Many(self.iter().map(|item| item as &dyn Encodable).collect())
    }
}

impl<T: MarshalResource> MarshalDocument for Vec<T> {
    fn data(&self) -> PrimaryData<'_> {
        self.as_slice().data()
    }
}

impl MarshalDocument for [ErrorObject] {
    fn errors(&self) -> Option<Vec<ErrorObject>> {
        Some(self.to_vec())
    }
}

impl MarshalDocument for Vec<ErrorObject> {
    fn errors(&self) -> Option<Vec<ErrorObject>> {
        Some(self.clone())
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// How a to-one relationship whose identifier has an empty `id` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyToOne {
    /// `"data": null`.
    Null,
    /// The identifier as is, e.g. `{"type": "authors"}`.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalOptions {
    pub empty_to_one: EmptyToOne,
    /// Indent the output.
    pub pretty: bool,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            empty_to_one: EmptyToOne::Null,
            pretty: false,
        }
    }
}

impl MarshalOptions {
    pub fn with_empty_to_one(mut self, empty_to_one: EmptyToOne) -> Self {
        self.empty_to_one = empty_to_one;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────

/// Serializes `value` as a JSON:API document with default options.
pub fn marshal<D: MarshalDocument + ?Sized>(value: &D) -> Result<Vec<u8>> {
    marshal_with(value, &MarshalOptions::default())
}

pub fn marshal_with<D: MarshalDocument + ?Sized>(
    value: &D,
    options: &MarshalOptions,
) -> Result<Vec<u8>> {
    let document = Document::from_value(value, options)?;
    if options.pretty {
        document.to_vec_pretty()
    } else {
        document.to_vec()
    }
}

impl Document {
    /// Builds the document model for `value` without serializing it.
    pub fn from_value<D: MarshalDocument + ?Sized>(
        value: &D,
        options: &MarshalOptions,
    ) -> Result<Self> {
        Encoder { options }.document(value)
    }
}

struct Encoder<'o> {
    options: &'o MarshalOptions,
}

impl Encoder<'_> {
    fn document<D: MarshalDocument + ?Sized>(&self, value: &D) -> Result<Document> {
        let primary = value.data();
        let meta = value
            .document_meta()
            .or_else(|| match &primary {
                PrimaryData::One(resource) => resource.collect_meta(),
                _ => None,
            })
            .filter(has_content);

        if let Some(errors) = value.errors() {
            debug!(errors = errors.len(), "marshalled error document");
            return Ok(Document {
                errors: Some(errors),
                meta,
                ..Document::default()
            });
        }

        let mut included = IndexMap::new();
        for item in value.document_included() {
            self.include(item.as_ref(), &mut included)?;
        }

        let data = match primary {
            PrimaryData::None => None,
            PrimaryData::One(resource) => {
                self.include_all(resource, &mut included)?;
                Some(OneOrMany::One(self.resource(resource)?))
            }
            PrimaryData::Many(resources) => {
                let mut many = Vec::with_capacity(resources.len());
                for resource in resources {
                    self.include_all(resource, &mut included)?;
                    many.push(self.resource(resource)?);
                }
                Some(OneOrMany::Many(many))
            }
        };

        debug!(
            resources = data.as_ref().map_or(0, OneOrMany::len),
            included = included.len(),
            "marshalled data document"
        );

        Ok(Document {
            data,
            errors: None,
            included: included.into_values().collect(),
            meta,
        })
    }

    /// Encodes one resource object; shared by primary data and included.
    fn resource(&self, resource: &dyn Encodable) -> Result<ResourceObject> {
        let ResourceIdentifier { resource_type, id } = resource.identifier();

        let attributes = match resource.attributes().map_err(Error::Encode)? {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            Value::Object(map) => Some(map),
            other => {
                return Err(Error::AttributesNotObject {
                    resource_type,
                    found: json_kind(&other),
                })
            }
        };

        let relationships: BTreeMap<String, RelationshipObject> = resource
            .collect_relationships()
            .into_iter()
            .map(|(name, linkage)| (name, RelationshipObject::new(self.linkage(linkage))))
            .collect();

        trace!(%resource_type, %id, "encoded resource");

        Ok(ResourceObject {
            resource_type,
            id,
            attributes,
            meta: resource.collect_meta().filter(has_content),
            relationships: (!relationships.is_empty()).then_some(relationships),
        })
    }

    fn linkage(&self, linkage: Option<Linkage>) -> Option<Linkage> {
        match linkage {
            Some(OneOrMany::One(identifier))
                if identifier.id.is_empty() && self.options.empty_to_one == EmptyToOne::Null =>
            {
                None
            }
            other => other,
        }
    }

    /// Adds everything `resource` side-loads.
    fn include_all(
        &self,
        resource: &dyn Encodable,
        included: &mut IndexMap<ResourceIdentifier, ResourceObject>,
    ) -> Result<()> {
        for item in resource.collect_included() {
            self.include(item.as_ref(), included)?;
        }
        Ok(())
    }

    /// First occurrence of a (`type`, `id`) pair wins; order is encounter
    /// order.
    fn include(
        &self,
        item: &dyn Encodable,
        included: &mut IndexMap<ResourceIdentifier, ResourceObject>,
    ) -> Result<()> {
        let key = item.identifier();
        if !included.contains_key(&key) {
            let object = self.resource(item)?;
            included.insert(key, object);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Tag {
        #[serde(skip)]
        id: String,
    }

    impl Identifiable for Tag {
        fn id(&self) -> &str {
            &self.id
        }

        fn resource_type(&self) -> &str {
            "tags"
        }
    }

    impl MarshalResource for Tag {}

    #[derive(Serialize)]
    struct Scalar(u8);

    impl Identifiable for Scalar {
        fn id(&self) -> &str {
            "1"
        }

        fn resource_type(&self) -> &str {
            "scalars"
        }
    }

    impl MarshalResource for Scalar {}

    fn to_json<D: MarshalDocument + ?Sized>(value: &D) -> Value {
        serde_json::from_slice(&marshal(value).unwrap()).unwrap()
    }

    #[test]
    fn no_attributes_member_when_all_fields_skipped() {
        let tag = Tag { id: "7".into() };
        assert_eq!(
            String::from_utf8(marshal(&tag).unwrap()).unwrap(),
            r#"{"data":{"type":"tags","id":"7"}}"#
        );
    }

    #[test]
    fn empty_collection_is_empty_array() {
        let tags: Vec<Tag> = Vec::new();
        assert_eq!(marshal(&tags).unwrap(), br#"{"data":[]}"#);
        assert_eq!(marshal(&tags[..]).unwrap(), br#"{"data":[]}"#);
    }

    #[test]
    fn non_object_attributes_are_rejected() {
        let err = marshal(&Scalar(3)).unwrap_err();
        assert!(matches!(
            err,
            Error::AttributesNotObject { ref resource_type, found: "a number" } if resource_type == "scalars"
        ));
    }

    #[test]
    fn error_list_marshals_without_data() {
        let errors = vec![ErrorObject::new("is required").with_pointer("/data/attributes/title")];
        assert_eq!(
            String::from_utf8(marshal(&errors).unwrap()).unwrap(),
            r#"{"errors":[{"title":"is required","source":{"pointer":"/data/attributes/title"}}]}"#
        );
    }

    #[test]
    fn pretty_output() {
        let tag = Tag { id: "1".into() };
        let out = marshal_with(&tag, &MarshalOptions::default().with_pretty(true)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"data": {"type": "tags", "id": "1"}})
        );
    }

    #[test]
    fn from_value_builds_model() {
        let tags = vec![Tag { id: "1".into() }, Tag { id: "2".into() }];
        let doc = Document::from_value(&tags, &MarshalOptions::default()).unwrap();
        assert_eq!(doc.resources().count(), 2);
        assert!(doc.included.is_empty());
        assert_eq!(to_json(&tags)["data"][1]["id"], json!("2"));
    }
}
