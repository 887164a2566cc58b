//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key prefix carried by author keys in the dumps (`/authors/OL23919A`)
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Author as stored in the `authors` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub personal_name: String,
}

/// Strip the `/authors/` prefix from a dump key.
pub fn author_id_from_key(key: &str) -> String {
    key.strip_prefix(AUTHOR_KEY_PREFIX).unwrap_or(key).to_string()
}
