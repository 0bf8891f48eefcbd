//! Book catalog service

use futures_util::TryStreamExt;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFields, BookFilter, BookId, BookPatch, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Insert a new book and return it as stored
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;

        let id = self.repository.books.insert(&BookFields::from(data)).await?;
        tracing::info!("Book created: id={}", id);

        self.repository
            .books
            .find_one(&id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Book {} vanished after insert", id)))
    }

    /// List books matching the query; absent or empty parameters are ignored
    pub async fn list(&self, query: BookQuery) -> AppResult<Vec<Book>> {
        let filter = BookFilter::from(query);
        tracing::debug!("Book search: {:?}", filter);

        self.repository
            .books
            .find_many(&filter)
            .await?
            .try_collect()
            .await
    }

    pub async fn get(&self, id: &BookId) -> AppResult<Book> {
        self.repository.books.find_one(id).await?.ok_or_else(not_found)
    }

    /// Apply a partial update.
    ///
    /// When nothing was modified (empty patch, values already current, or unknown id)
    /// the book is fetched again: it is returned unchanged if it exists, 404 otherwise.
    pub async fn update(&self, id: &BookId, data: UpdateBook) -> AppResult<Book> {
        data.validate()?;

        let patch = BookPatch::from(data);
        if !patch.is_empty() && self.repository.books.update_one(id, &patch).await? {
            tracing::info!("Book updated: id={}", id);
            if let Some(book) = self.repository.books.find_one(id).await? {
                return Ok(book);
            }
        }

        self.get(id).await
    }

    pub async fn delete(&self, id: &BookId) -> AppResult<()> {
        if !self.repository.books.delete_one(id).await? {
            return Err(not_found());
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
