//! Data models for the book catalog

pub mod book;
pub mod object_id;

// Re-export commonly used types
pub use book::{Book, BookFields, BookFilter, BookPatch, BookQuery, CreateBook, UpdateBook};
pub use object_id::BookId;
