//! Open Library dump loader
//!
//! Reads the line-delimited author and work dumps published by Open Library
//! and writes them as `authors` and `books` rows, resolving each book's author
//! names at load time.

pub mod config;
pub mod dump;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, LineError};
