//! The one-or-many wire shape shared by primary `data` and relationship
//! `data`.
//!
//! Neither member carries a schema, so decoding captures the raw
//! sub-document and dispatches on its first byte: `{` is a single value,
//! `[` is an ordered list. Absence and `null` are modelled by wrapping the
//! field in `Option`.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_one(&self) -> Option<&T> {
        match self {
            OneOrMany::One(one) => Some(one),
            OneOrMany::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[T]> {
        match self {
            OneOrMany::One(_) => None,
            OneOrMany::Many(many) => Some(many),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    /// Number of values carried; a single value counts as one.
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(many) => many.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(one) => std::slice::from_ref(one).iter(),
            OneOrMany::Many(many) => many.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OneOrMany<U> {
        match self {
            OneOrMany::One(one) => OneOrMany::One(f(one)),
            OneOrMany::Many(many) => OneOrMany::Many(many.into_iter().map(f).collect()),
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(one: T) -> Self {
        OneOrMany::One(one)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(many: Vec<T>) -> Self {
        OneOrMany::Many(many)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OneOrMany::One(one) => one.serialize(serializer),
            OneOrMany::Many(many) => many.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get();
        match text.trim_start().as_bytes().first() {
            Some(b'{') => serde_json::from_str(text)
                .map(OneOrMany::One)
                .map_err(de::Error::custom),
            Some(b'[') => serde_json::from_str(text)
                .map(OneOrMany::Many)
                .map_err(de::Error::custom),
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Other(text),
                &"an object or an array",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default)]
        data: Option<OneOrMany<Item>>,
    }

    fn item(id: &str) -> Item {
        Item { id: id.to_string() }
    }

    #[test]
    fn object_decodes_as_one() {
        let h: Holder = serde_json::from_str(r#"{"data": {"id": "1"}}"#).unwrap();
        assert_eq!(h.data, Some(OneOrMany::One(item("1"))));
    }

    #[test]
    fn array_decodes_as_many() {
        let h: Holder = serde_json::from_str(r#"{"data":[{"id":"1"},{"id":"2"}]}"#).unwrap();
        assert_eq!(h.data, Some(OneOrMany::Many(vec![item("1"), item("2")])));
    }

    #[test]
    fn single_element_array_stays_many() {
        let h: Holder = serde_json::from_str(r#"{"data":[{"id":"1"}]}"#).unwrap();
        assert!(h.data.unwrap().is_many());
    }

    #[test]
    fn empty_array_is_many_not_absent() {
        let h: Holder = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(h.data, Some(OneOrMany::Many(vec![])));
    }

    #[test]
    fn null_and_absent_are_none() {
        let h: Holder = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(h.data.is_none());
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.data.is_none());
    }

    #[test]
    fn scalar_is_rejected() {
        let err = serde_json::from_str::<Holder>(r#"{"data":"1"}"#).unwrap_err();
        assert!(err.to_string().contains("an object or an array"));
    }

    #[test]
    fn serializes_by_variant() {
        assert_eq!(
            serde_json::to_value(OneOrMany::One(1)).unwrap(),
            json!(1)
        );
        assert_eq!(
            serde_json::to_value(OneOrMany::<u8>::Many(vec![])).unwrap(),
            json!([])
        );
    }

    #[test]
    fn iter_and_len() {
        let one = OneOrMany::One(7);
        assert_eq!(one.len(), 1);
        assert_eq!(one.iter().copied().collect::<Vec<_>>(), vec![7]);
        let many = OneOrMany::Many(vec![1, 2, 3]);
        assert_eq!(many.as_many(), Some(&[1, 2, 3][..]));
        assert!(many.as_one().is_none());
        assert_eq!(many.map(|n| n * 2).into_vec(), vec![2, 4, 6]);
    }
}
