//! In-memory book store used by handler and service tests

use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::{stream, StreamExt};

use super::{BookStore, BookStream};
use crate::{
    error::AppResult,
    models::{Book, BookFields, BookFilter, BookId, BookPatch},
};

/// Books kept in insertion order
#[derive(Default)]
pub struct InMemoryBookStore {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn books(&self) -> std::sync::MutexGuard<'_, Vec<Book>> {
        self.books.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, fields: &BookFields) -> AppResult<BookId> {
        let id = BookId::new();
        self.books().push(Book {
            id,
            title: fields.title.clone(),
            author: fields.author.clone(),
            category: fields.category.clone(),
        });
        Ok(id)
    }

    async fn find_one(&self, id: &BookId) -> AppResult<Option<Book>> {
        Ok(self.books().iter().find(|b| &b.id == id).cloned())
    }

    async fn find_many(&self, filter: &BookFilter) -> AppResult<BookStream> {
        let matching: Vec<AppResult<Book>> = self
            .books()
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .map(Ok)
            .collect();
        Ok(stream::iter(matching).boxed())
    }

    async fn update_one(&self, id: &BookId, patch: &BookPatch) -> AppResult<bool> {
        Ok(self
            .books()
            .iter_mut()
            .find(|b| &b.id == id)
            .map_or(false, |book| patch.apply(book)))
    }

    async fn delete_one(&self, id: &BookId) -> AppResult<bool> {
        let mut books = self.books();
        let before = books.len();
        books.retain(|b| &b.id != id);
        Ok(books.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
