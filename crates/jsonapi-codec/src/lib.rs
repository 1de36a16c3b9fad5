//! JSON:API document codec.
//!
//! Translates between Rust values and [JSON:API](https://jsonapi.org)
//! documents: resource objects with attributes, to-one and to-many
//! relationships, side-loaded `included` resources, meta and error lists.
//!
//! Values opt into document facets through small capability traits instead
//! of a common base type:
//!
//! - marshal: [`Identifiable`] + [`MarshalResource`] per resource,
//!   [`MarshalDocument`] for the outermost value (wrappers, errors);
//! - unmarshal: [`UnmarshalResource`] per resource, [`UnmarshalDocument`] for
//!   the outermost target.
//!
//! Only document shape is handled here. Transport, query parameters, sparse
//! fieldsets and links belong to the layer above.
//!
//! # Example
//!
//! ```
//! use jsonapi_codec::{marshal, unmarshal, BoxError, Identifiable, MarshalResource, UnmarshalResource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Book {
//!     #[serde(skip)]
//!     id: String,
//!     title: String,
//! }
//!
//! impl Identifiable for Book {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn resource_type(&self) -> &str {
//!         "books"
//!     }
//! }
//!
//! impl MarshalResource for Book {}
//!
//! impl UnmarshalResource for Book {
//!     fn set_id(&mut self, id: &str) -> Result<(), BoxError> {
//!         self.id = id.to_string();
//!         Ok(())
//!     }
//! }
//!
//! let book = Book { id: "1".into(), title: "Introducing Go".into() };
//! let bytes = marshal(&book).unwrap();
//! assert_eq!(bytes, br#"{"data":{"type":"books","id":"1","attributes":{"title":"Introducing Go"}}}"#);
//!
//! let mut decoded = Book::default();
//! unmarshal(&bytes, &mut decoded).unwrap();
//! assert_eq!(decoded, book);
//! ```

pub mod capability;
pub mod document;
pub mod error;
pub mod error_object;
pub mod marshal;
pub mod one_or_many;
pub mod pointer;
pub mod relationships;
pub mod unmarshal;

pub use capability::{Encodable, Identifiable};
pub use document::{Document, Linkage, RelationshipObject, ResourceIdentifier, ResourceObject};
pub use error::{BoxError, Error, Result};
pub use error_object::{ErrorObject, ErrorSource};
pub use marshal::{
    marshal, marshal_with, EmptyToOne, MarshalDocument, MarshalOptions, MarshalResource,
    PrimaryData,
};
pub use one_or_many::OneOrMany;
pub use relationships::{Related, Relationships};
pub use unmarshal::{
    decode, unmarshal, AcceptsErrors, DataTarget, Projector, UnmarshalDocument, UnmarshalResource,
};

/// Media type of JSON:API documents, for the transport layer to set.
pub const CONTENT_TYPE: &str = "application/vnd.api+json";
