//! Relationship maps and the shape dispatch behind them.
//!
//! Whether a relationship is to-one or to-many is decided by the value handed
//! in, never by a declaration: any [`Identifiable`] is a to-one, a slice or
//! `Vec` of them is a to-many (including the empty and single-element cases),
//! and `Option` adds an explicit null.

use std::collections::btree_map::{self, BTreeMap};

use crate::capability::Identifiable;
use crate::document::{Linkage, ResourceIdentifier};
use crate::one_or_many::OneOrMany;

/// Values that can stand on the far side of a relationship.
pub trait Related {
    /// The identifiers to link to, or `None` for an explicit null.
    fn linkage(&self) -> Option<Linkage>;
}

impl<T: Identifiable> Related for T {
    fn linkage(&self) -> Option<Linkage> {
        Some(OneOrMany::One(ResourceIdentifier::of(self)))
    }
}

impl<T: Identifiable> Related for Option<T> {
    fn linkage(&self) -> Option<Linkage> {
        self.as_ref().and_then(Related::linkage)
    }
}

impl<T: Identifiable> Related for [T] {
    fn linkage(&self) -> Option<Linkage> {
        Some(OneOrMany::Many(
            self.iter().map(ResourceIdentifier::of).collect(),
        ))
    }
}

impl<T: Identifiable> Related for Vec<T> {
    fn linkage(&self) -> Option<Linkage> {
        self.as_slice().linkage()
    }
}

/// Relationship name to linkage, ordered by name.
///
/// Built by resources on the way out and handed to targets on the way in.
/// A present key with `None` linkage is an explicit `"data": null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    entries: BTreeMap<String, Option<Linkage>>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Relationships::insert`].
    ///
    /// ```
    /// use jsonapi_codec::{Relationships, ResourceIdentifier};
    ///
    /// let author = ResourceIdentifier::new("authors", "1");
    /// let readers = vec![ResourceIdentifier::new("people", "7")];
    /// let relationships = Relationships::new()
    ///     .with("author", &author)
    ///     .with("readers", &readers);
    ///
    /// assert_eq!(relationships.one("author"), Some(&author));
    /// assert_eq!(relationships.many("readers"), Some(&readers[..]));
    /// ```
    pub fn with<R: Related + ?Sized>(mut self, name: impl Into<String>, value: &R) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<R: Related + ?Sized>(&mut self, name: impl Into<String>, value: &R) {
        self.entries.insert(name.into(), value.linkage());
    }

    pub fn insert_linkage(&mut self, name: impl Into<String>, linkage: Option<Linkage>) {
        self.entries.insert(name.into(), linkage);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Linkage of `name`; `None` when absent or null.
    pub fn get(&self, name: &str) -> Option<&Linkage> {
        self.entries.get(name)?.as_ref()
    }

    /// The identifier of a to-one relationship.
    pub fn one(&self, name: &str) -> Option<&ResourceIdentifier> {
        self.get(name)?.as_one()
    }

    /// The identifiers of a to-many relationship.
    pub fn many(&self, name: &str) -> Option<&[ResourceIdentifier]> {
        self.get(name)?.as_many()
    }

    /// Removes and returns an entry. The outer `Option` is presence, the
    /// inner one is null.
    pub fn remove(&mut self, name: &str) -> Option<Option<Linkage>> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Option<Linkage>> {
        self.entries.iter()
    }
}

impl IntoIterator for Relationships {
    type Item = (String, Option<Linkage>);
    type IntoIter = btree_map::IntoIter<String, Option<Linkage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Relationships {
    type Item = (&'a String, &'a Option<Linkage>);
    type IntoIter = btree_map::Iter<'a, String, Option<Linkage>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Option<Linkage>)> for Relationships {
    fn from_iter<I: IntoIterator<Item = (String, Option<Linkage>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
