//! Repository layer for book store operations

pub mod books;
#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use mongodb::Database;

use crate::{
    error::AppResult,
    models::{Book, BookFields, BookFilter, BookId, BookPatch},
};

/// Lazy, single-pass sequence of books produced by a search
pub type BookStream = BoxStream<'static, AppResult<Book>>;

/// Gateway to the document collection holding books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new book and return its generated identifier
    async fn insert(&self, fields: &BookFields) -> AppResult<BookId>;

    async fn find_one(&self, id: &BookId) -> AppResult<Option<Book>>;

    /// Books matching every present filter field, in store order
    async fn find_many(&self, filter: &BookFilter) -> AppResult<BookStream>;

    /// Apply the present patch fields; returns whether the document changed
    async fn update_one(&self, id: &BookId, patch: &BookPatch) -> AppResult<bool>;

    async fn delete_one(&self, id: &BookId) -> AppResult<bool>;

    /// Round-trip to the store
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the store handles
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by the given MongoDB database, ensuring search indexes
    pub async fn new(db: &Database, collection: &str) -> AppResult<Self> {
        let books = books::MongoBookStore::new(db, collection);
        books.ensure_indexes().await?;
        Ok(Self {
            books: Arc::new(books),
        })
    }

    /// Create a repository over an arbitrary book store
    pub fn with_books(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
