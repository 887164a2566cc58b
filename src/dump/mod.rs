//! Open Library dump handling
//!
//! This module reads line-delimited dump files and translates each line's
//! JSON object into the `Author` and `Book` models.

pub mod reader;
pub mod translator;

pub use reader::{json_object, DumpLine, DumpReader};
pub use translator::{translate_author, translate_work, WorkRecord};
