//! In-memory stores, used for dry runs (`loader.dry_run`) and tests.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Author, Book},
    repository::{AuthorStore, BookStore},
};

/// In-memory implementation of the author store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthorStore {
    authors: Arc<RwLock<HashMap<String, Author>>>,
}

impl MemoryAuthorStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with initial data.
    pub fn with_data(authors: Vec<Author>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(
                authors
                    .into_iter()
                    .map(|author| (author.id.clone(), author))
                    .collect(),
            )),
        }
    }

    pub async fn len(&self) -> usize {
        self.authors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.authors.read().await.is_empty()
    }

    /// All stored authors ordered by id.
    pub async fn snapshot(&self) -> Vec<Author> {
        let mut authors: Vec<_> = self.authors.read().await.values().cloned().collect();
        authors.sort_by(|a, b| a.id.cmp(&b.id));
        authors
    }
}

#[async_trait]
impl AuthorStore for MemoryAuthorStore {
    async fn save(&self, author: &Author) -> AppResult<()> {
        self.authors
            .write()
            .await
            .insert(author.id.clone(), author.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(id).cloned())
    }
}

/// In-memory implementation of the book store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookStore {
    books: Arc<RwLock<HashMap<String, Book>>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// All stored books ordered by id.
    pub async fn snapshot(&self) -> Vec<Book> {
        let mut books: Vec<_> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        books
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn save(&self, book: &Book) -> AppResult<()> {
        self.books
            .write()
            .await
            .insert(book.id.clone(), book.clone());
        Ok(())
    }
}
