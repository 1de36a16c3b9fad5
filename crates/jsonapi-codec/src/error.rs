//! Error taxonomy for the codec.
//!
//! Document-level application errors (the JSON:API `errors` member) are not
//! represented here: they are data, see [`crate::ErrorObject`].

use thiserror::Error;

/// Error type returned by target setters such as
/// [`UnmarshalResource::set_id`](crate::UnmarshalResource::set_id).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The structured-value encoder rejected a value.
    #[error("ENCODE: {0}")]
    Encode(#[source] serde_json::Error),
    /// Malformed document, or attributes that do not fit the target.
    #[error("DECODE: {0}")]
    Decode(#[source] serde_json::Error),
    /// A one-or-many member had a shape the codec cannot dispatch on.
    #[error("SHAPE: `{field}` cannot be {found}")]
    Shape { field: &'static str, found: &'static str },
    /// A resource's attributes did not serialize to a JSON object.
    #[error("ATTRIBUTES_NOT_OBJECT: resource of type `{resource_type}` serialized to {found}")]
    AttributesNotObject {
        resource_type: String,
        found: &'static str,
    },
    /// A target setter rejected the value it was given.
    #[error(transparent)]
    Target(BoxError),
}

/// Name of the JSON kind of `value`, used in shape diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn target_error_is_transparent() {
        let err = Error::Target("id must be numeric".into());
        assert_eq!(err.to_string(), "id must be numeric");
    }

    #[test]
    fn shape_error_names_the_field() {
        let err = Error::Shape {
            field: "data",
            found: "a string",
        };
        assert_eq!(err.to_string(), "SHAPE: `data` cannot be a string");
    }

    #[test]
    fn json_kind_names() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!([1])), "an array");
        assert_eq!(json_kind(&json!({"a": 1})), "an object");
        assert_eq!(json_kind(&json!("x")), "a string");
    }
}
