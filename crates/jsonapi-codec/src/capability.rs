//! Capability detection.
//!
//! A marshalable value opts into each document facet independently by
//! overriding the matching method of [`MarshalResource`]; no facet is
//! required beyond identity. [`Encodable`] is the object-safe view the
//! marshal pipeline inspects at every nesting level (primary data, each
//! included item), so heterogeneous resources can travel side by side.

use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::document::ResourceIdentifier;
use crate::marshal::MarshalResource;
use crate::relationships::Relationships;

/// Exposes the `type` and `id` of a resource.
pub trait Identifiable {
    /// Empty for resources that have not been persisted yet.
    fn id(&self) -> &str;
    fn resource_type(&self) -> &str;
}

macro_rules! deref_identifiable {
    ($($ptr:ty),*) => {$(
        impl<T: Identifiable + ?Sized> Identifiable for $ptr {
            fn id(&self) -> &str {
                (**self).id()
            }

            fn resource_type(&self) -> &str {
                (**self).resource_type()
            }
        }
    )*};
}

deref_identifiable!(&T, Box<T>, Rc<T>, Arc<T>);

/// Type-erased capability set of a marshalable resource.
///
/// Implemented for every [`MarshalResource`]; not meant to be implemented by
/// hand.
pub trait Encodable {
    fn identifier(&self) -> ResourceIdentifier;
    /// All non-relationship fields, through the value's `Serialize` impl.
    fn attributes(&self) -> serde_json::Result<Value>;
    fn collect_relationships(&self) -> Relationships;
    fn collect_meta(&self) -> Option<Value>;
    fn collect_included(&self) -> Vec<Box<dyn Encodable + '_>>;
}

impl<T: MarshalResource> Encodable for T {
    fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::of(self)
    }

    fn attributes(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn collect_relationships(&self) -> Relationships {
        MarshalResource::relationships(self)
    }

    fn collect_meta(&self) -> Option<Value> {
        MarshalResource::meta(self)
    }

    fn collect_included(&self) -> Vec<Box<dyn Encodable + '_>> {
        MarshalResource::included(self)
    }
}

/// True when a meta value carries something worth writing: `null` and `{}`
/// are dropped.
pub(crate) fn has_content(meta: &Value) -> bool {
    match meta {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
