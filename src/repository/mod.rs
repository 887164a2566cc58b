//! Repository layer: the persistence ports used by the loaders and their adapters

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book},
};

/// Write and lookup capability over stored authors
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert or overwrite the author with the same id
    async fn save(&self, author: &Author) -> AppResult<()>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>>;
}

/// Write capability over stored books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert or overwrite the book with the same id
    async fn save(&self, book: &Book) -> AppResult<()>;
}

pub type AuthorStoreArc = Arc<dyn AuthorStore>;
pub type BookStoreArc = Arc<dyn BookStore>;

/// Postgres repositories sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool),
        }
    }

    pub fn author_store(&self) -> AuthorStoreArc {
        Arc::new(self.authors.clone())
    }

    pub fn book_store(&self) -> BookStoreArc {
        Arc::new(self.books.clone())
    }
}
