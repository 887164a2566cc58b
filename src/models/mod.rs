//! Data models for the dump loader

pub mod author;
pub mod book;
pub mod load_report;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use load_report::{LineOutcome, LoadReport, LoadSummary, SkippedLine};
