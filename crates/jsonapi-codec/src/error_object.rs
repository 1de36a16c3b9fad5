//! JSON:API error objects (<https://jsonapi.org/format/#error-objects>).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pointer::{format_pointer, parse_pointer};

/// One entry of a document's `errors` list. Every member is optional and
/// omitted from the wire when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status code applicable to this problem, as a string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Application-specific error code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Short, human-readable summary of the problem.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ErrorObject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source = Some(ErrorSource::pointer(pointer));
        self
    }

    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }

    /// The source pointer, if any.
    pub fn pointer(&self) -> Option<&str> {
        self.source
            .as_ref()
            .map(|source| source.pointer.as_str())
            .filter(|pointer| !pointer.is_empty())
    }
}

/// Where in the request the problem was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer into the request document, e.g. `/data/attributes/title`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pointer: String,
    /// Name of the offending query parameter.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parameter: String,
}

impl ErrorSource {
    pub fn pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            parameter: String::new(),
        }
    }

    pub fn parameter(parameter: impl Into<String>) -> Self {
        Self {
            pointer: String::new(),
            parameter: parameter.into(),
        }
    }

    /// Builds a pointer source from unescaped tokens.
    ///
    /// ```
    /// use jsonapi_codec::ErrorSource;
    ///
    /// let source = ErrorSource::from_path(["data", "attributes", "first/last"]);
    /// assert_eq!(source.pointer, "/data/attributes/first~1last");
    /// ```
    pub fn from_path<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::pointer(format_pointer(tokens))
    }

    /// Splits the pointer back into unescaped tokens. `None` when the pointer
    /// is absent or not a valid RFC 6901 pointer.
    pub fn path(&self) -> Option<Vec<String>> {
        if self.pointer.is_empty() {
            return None;
        }
        parse_pointer(&self.pointer)
    }
}
