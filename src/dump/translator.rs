//! Dump record to model translator
//!
//! Translates the JSON object of an author or work line into the internal
//! models. Optional text fields default to the empty string; a missing
//! required field fails the whole line.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::{
    error::LineError,
    models::{
        author::{author_id_from_key, Author},
        book::{book_id_from_key, Book},
    },
};

/// Timestamp layout of `created.value`, e.g. `2008-04-01T03:28:50.625462`
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A parsed work line whose author names are not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    /// `None` when the line has no `authors` array
    pub author_ids: Option<Vec<String>>,
}

impl WorkRecord {
    /// Build the book with names resolved for `author_ids`.
    pub fn into_book(self, author_ids: Vec<String>, author_names: Vec<String>) -> Book {
        debug_assert_eq!(author_ids.len(), author_names.len());
        Book {
            id: self.id,
            name: self.name,
            description: self.description,
            published_date: self.published_date,
            cover_ids: self.cover_ids,
            author_ids,
            author_names,
        }
    }
}

/// Translate an author line
pub fn translate_author(object: &Map<String, Value>) -> Result<Author, LineError> {
    let key = required_str(object, "key")?;

    Ok(Author {
        id: author_id_from_key(key),
        name: optional_string(object, "name"),
        personal_name: optional_string(object, "personal_name"),
    })
}

/// Translate a work line
pub fn translate_work(object: &Map<String, Value>) -> Result<WorkRecord, LineError> {
    let id = book_id_from_key(required_str(object, "key")?);
    let name = optional_string(object, "title");

    let description = match object.get("description") {
        Some(Value::Object(desc)) => Some(optional_string(desc, "value")),
        _ => None,
    };

    let published_date = match object.get("created") {
        Some(Value::Object(created)) => {
            let value = created
                .get("value")
                .and_then(Value::as_str)
                .ok_or(LineError::MissingField("created.value"))?;
            Some(parse_created(value)?)
        }
        _ => None,
    };

    let cover_ids = match object.get("covers") {
        Some(Value::Array(covers)) => covers
            .iter()
            .map(cover_id)
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    let author_ids = match object.get("authors") {
        Some(Value::Array(authors)) => Some(
            authors
                .iter()
                .map(author_ref_id)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        _ => None,
    };

    Ok(WorkRecord {
        id,
        name,
        description,
        published_date,
        cover_ids,
        author_ids,
    })
}

/// Parse a `created.value` timestamp, keeping only the calendar date
pub fn parse_created(value: &str) -> Result<NaiveDate, LineError> {
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|ts| ts.date())
        .map_err(|e| LineError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, LineError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(LineError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(LineError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        }),
    }
}

// Scalars are rendered as text, anything else falls back to empty.
fn optional_string(object: &Map<String, Value>, field: &str) -> String {
    match object.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

fn cover_id(value: &Value) -> Result<String, LineError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(LineError::InvalidField {
            field: "covers",
            reason: format!("unexpected element {}", other),
        }),
    }
}

// {"type": {"key": "/type/author_role"}, "author": {"key": "/authors/OL1A"}}
fn author_ref_id(value: &Value) -> Result<String, LineError> {
    value
        .get("author")
        .and_then(Value::as_object)
        .and_then(|author| author.get("key"))
        .and_then(Value::as_str)
        .map(author_id_from_key)
        .ok_or(LineError::MissingField("authors[].author.key"))
}
