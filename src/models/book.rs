//! Book model built from a work record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key prefix carried by work keys in the dumps (`/works/OL45804W`)
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Name recorded for an author id that is not in the author store
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Book as stored in the `books` table.
///
/// `author_names` is a snapshot taken at load time and is positionally
/// parallel to `author_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
    pub author_names: Vec<String>,
}

/// Strip the `/works/` prefix from a dump key.
pub fn book_id_from_key(key: &str) -> String {
    key.strip_prefix(WORK_KEY_PREFIX).unwrap_or(key).to_string()
}
