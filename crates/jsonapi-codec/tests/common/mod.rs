#![allow(dead_code)]

use jsonapi_codec::{
    AcceptsErrors, BoxError, Encodable, ErrorObject, Identifiable, MarshalDocument, MarshalResource, PrimaryData,
    Projector, Relationships, UnmarshalDocument, UnmarshalResource,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Identifiable for Author {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource_type(&self) -> &str {
        "authors"
    }
}

impl MarshalResource for Author {}

impl UnmarshalResource for Author {
    fn set_id(&mut self, id: &str) -> Result<(), BoxError> {
        self.id = id.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(skip)]
    pub id: String,
    #[serde(skip)]
    pub resource_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publication_date: String,
    #[serde(skip)]
    pub author: Option<Author>,
}

impl Identifiable for Book {
    fn id(&self) -> &str {
        &self.id
    }

    fn resource_type(&self) -> &str {
        "books"
    }
}

impl MarshalResource for Book {
    fn relationships(&self) -> Relationships {
        Relationships::new().with("author", &self.author)
    }

    fn included(&self) -> Vec<Box<dyn Encodable + '_>> {
        self.author
            .iter()
            .map(|author| Box::new(author.clone()) as Box<dyn Encodable + '_>)
            .collect()
    }
}

impl UnmarshalResource for Book {
    fn set_id(&mut self, id: &str) -> Result<(), BoxError> {
        self.id = id.to_string();
        Ok(())
    }

    fn set_type(&mut self, resource_type: &str) -> Result<(), BoxError> {
        self.resource_type = resource_type.to_string();
        Ok(())
    }

    fn set_relationships(&mut self, relationships: Relationships) -> Result<(), BoxError> {
        self.author = relationships.one("author").map(|author| Author {
            id: author.id.clone(),
            ..Author::default()
        });
        Ok(())
    }
}

pub fn alan() -> Author {
    author("1", "Alan A. A.", "Donovan")
}

pub fn lex() -> Author {
    author("2", "Lex", "Sheehan")
}

pub fn william() -> Author {
    author("3", "William", "Kennedy")
}

pub fn author(id: &str, first_name: &str, last_name: &str) -> Author {
    Author {
        id: id.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
    }
}

pub fn book(id: &str, title: &str, date: &str, author: Option<Author>) -> Book {
    Book {
        id: id.into(),
        resource_type: String::new(),
        title: title.into(),
        publication_date: date.into(),
        author,
    }
}

pub fn books() -> Vec<Book> {
    vec![
        book("1", "Go Programming Language", "2015-01-01T00:00:00Z", Some(alan())),
        book(
            "2",
            "Learning Functional Programming in Go",
            "2017-11-01T00:00:00Z",
            Some(lex()),
        ),
        book("3", "Go in Action", "2015-11-01T00:00:00Z", Some(william())),
    ]
}

/// A page of books carrying document meta and, optionally, errors.
#[derive(Debug, Default)]
pub struct Library {
    pub books: Vec<Book>,
    pub featured: Vec<Author>,
    pub errors: Vec<ErrorObject>,
    pub count: Option<u64>,
}

impl MarshalDocument for Library {
    fn data(&self) -> PrimaryData<'_> {
        self.books.data()
    }

    fn errors(&self) -> Option<Vec<ErrorObject>> {
        (!self.errors.is_empty()).then(|| self.errors.clone())
    }

    fn document_meta(&self) -> Option<Value> {
        self.count.map(|count| json!({ "count": count }))
    }

    fn document_included(&self) -> Vec<Box<dyn Encodable + '_>> {
        self.featured
            .iter()
            .map(|author| Box::new(author.clone()) as Box<dyn Encodable + '_>)
            .collect()
    }
}

impl UnmarshalDocument for Library {
    fn set_data(&mut self, projector: Projector<'_>) -> jsonapi_codec::Result<()> {
        projector.project_into(&mut self.books)
    }

    fn error_sink(&mut self) -> Option<&mut dyn AcceptsErrors> {
        Some(&mut self.errors)
    }

    fn set_document_meta(&mut self, meta: Value) -> Result<(), BoxError> {
        self.count = meta.get("count").and_then(Value::as_u64);
        Ok(())
    }
}

pub fn as_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("codec output is UTF-8")
}
