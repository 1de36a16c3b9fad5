//! Unmarshal pipeline: JSON:API documents onto Rust values.
//!
//! The payload is decoded into a [`Document`] first, then projected onto the
//! target through its capabilities. The target alone knows how identifiers
//! map onto its own fields; the codec only hands them over.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::document::{Document, ResourceObject};
use crate::error::{BoxError, Error, Result};
use crate::error_object::ErrorObject;
use crate::one_or_many::OneOrMany;
use crate::relationships::Relationships;

// ── Capabilities ──────────────────────────────────────────────────────────

/// A value a resource object can be projected onto.
///
/// The non-empty `attributes` member is decoded through the value's
/// `Deserialize` impl and replaces it; identity, meta and relationships are
/// then delivered through the setters below. Any setter error aborts the
/// projection and is returned as [`Error::Target`] unchanged.
pub trait UnmarshalResource: DeserializeOwned {
    fn set_id(&mut self, id: &str) -> Result<(), BoxError>;

    fn set_type(&mut self, _resource_type: &str) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called once per resource that carries a `relationships` member.
    fn set_relationships(&mut self, _relationships: Relationships) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called when the resource carries a `meta` member.
    fn set_meta(&mut self, _meta: Value) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Destination for primary data: a single resource or a collection.
pub trait DataTarget {
    fn project(&mut self, data: &OneOrMany<ResourceObject>) -> Result<()>;
}

impl<T: UnmarshalResource> DataTarget for T {
    fn project(&mut self, data: &OneOrMany<ResourceObject>) -> Result<()> {
        match data {
            OneOrMany::One(resource) => project_resource(resource, self),
            OneOrMany::Many(_) => Err(Error::Shape {
                field: "data",
                found: "an array for a single-resource target",
            }),
        }
    }
}

impl<T: UnmarshalResource + Default> DataTarget for Vec<T> {
    /// Elements are built in document order and appended only once all of
    /// them succeeded.
    fn project(&mut self, data: &OneOrMany<ResourceObject>) -> Result<()> {
        let mut decoded = Vec::with_capacity(data.len());
        for resource in data {
            let mut item = T::default();
            project_resource(resource, &mut item)?;
            decoded.push(item);
        }
        self.extend(decoded);
        Ok(())
    }
}

/// Handed to [`UnmarshalDocument::set_data`]; the target points it at
/// wherever its payload lives.
pub struct Projector<'a> {
    data: &'a OneOrMany<ResourceObject>,
}

impl<'a> Projector<'a> {
    /// The primary data about to be projected.
    pub fn data(&self) -> &'a OneOrMany<ResourceObject> {
        self.data
    }

    pub fn project_into<D: DataTarget + ?Sized>(self, target: &mut D) -> Result<()> {
        target.project(self.data)
    }
}

/// Receives the `errors` list of an error document.
pub trait AcceptsErrors {
    fn set_errors(&mut self, errors: Vec<ErrorObject>) -> Result<(), BoxError>;
}

impl AcceptsErrors for Vec<ErrorObject> {
    fn set_errors(&mut self, errors: Vec<ErrorObject>) -> Result<(), BoxError> {
        self.extend(errors);
        Ok(())
    }
}

/// The outermost value handed to [`unmarshal`].
///
/// Implemented for every [`UnmarshalResource`], for `Vec`s of them, and for
/// `Vec<ErrorObject>`. Implement it on a wrapper to choose where the payload
/// lands and to receive errors or document meta.
pub trait UnmarshalDocument {
    /// Called when the document has `data`; forward with
    /// [`Projector::project_into`].
    fn set_data(&mut self, _projector: Projector<'_>) -> Result<()> {
        Ok(())
    }

    /// Where an error document is delivered. Returning `Some` also skips data
    /// projection whenever the document carries `errors`.
    fn error_sink(&mut self) -> Option<&mut dyn AcceptsErrors> {
        None
    }

    fn set_document_meta(&mut self, _meta: Value) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T: UnmarshalResource> UnmarshalDocument for T {
    fn set_data(&mut self, projector: Projector<'_>) -> Result<()> {
        projector.project_into(self)
    }
}

impl<T: UnmarshalResource + Default> UnmarshalDocument for Vec<T> {
    fn set_data(&mut self, projector: Projector<'_>) -> Result<()> {
        projector.project_into(self)
    }
}

impl UnmarshalDocument for Vec<ErrorObject> {
    fn error_sink(&mut self) -> Option<&mut dyn AcceptsErrors> {
        Some(self)
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────

/// Parses `payload` into a [`Document`] without projecting it.
pub fn decode(payload: &[u8]) -> Result<Document> {
    Document::from_slice(payload)
}

/// Decodes `payload` and projects it onto `target`.
///
/// The returned document stays available for inspection, e.g. of `errors`
/// or `included`. When projection fails the document is dropped; use
/// [`decode`] and [`Document::project`] to keep it.
pub fn unmarshal<T: UnmarshalDocument + ?Sized>(payload: &[u8], target: &mut T) -> Result<Document> {
    let document = decode(payload)?;
    document.project(target)?;
    debug!(
        resources = document.resources().len(),
        errors = document.errors.as_ref().map_or(0, Vec::len),
        included = document.included.len(),
        "unmarshalled document"
    );
    Ok(document)
}

impl Document {
    /// Projects this document onto `target`.
    ///
    /// Errors go to a target that accepts them and stop data projection;
    /// otherwise `data`, when present, is handed over through a
    /// [`Projector`]. Document meta is delivered last either way.
    pub fn project<T: UnmarshalDocument + ?Sized>(&self, target: &mut T) -> Result<()> {
        let delivered = match (&self.errors, target.error_sink()) {
            (Some(errors), Some(sink)) => {
                sink.set_errors(errors.clone()).map_err(Error::Target)?;
                true
            }
            _ => false,
        };
        if let (false, Some(data)) = (delivered, &self.data) {
            target.set_data(Projector { data })?;
        }
        if let Some(meta) = &self.meta {
            target
                .set_document_meta(meta.clone())
                .map_err(Error::Target)?;
        }
        Ok(())
    }
}

fn project_resource<T: UnmarshalResource>(resource: &ResourceObject, target: &mut T) -> Result<()> {
    if let Some(attributes) = resource.decode_attributes()? {
        *target = attributes;
    }
    target.set_id(&resource.id).map_err(Error::Target)?;
    target
        .set_type(&resource.resource_type)
        .map_err(Error::Target)?;
    if let Some(meta) = &resource.meta {
        target.set_meta(meta.clone()).map_err(Error::Target)?;
    }
    if let Some(relationships) = &resource.relationships {
        let relationships: Relationships = relationships
            .iter()
            .map(|(name, object)| (name.clone(), object.data.clone()))
            .collect();
        target
            .set_relationships(relationships)
            .map_err(Error::Target)?;
    }
    trace!(resource_type = %resource.resource_type, id = %resource.id, "projected resource");
    Ok(())
}
