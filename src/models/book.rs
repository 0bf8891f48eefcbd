//! Book model and request/filter types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::object_id::BookId;

/// Fully materialized book record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Book {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
}

/// Create book request; an `_id` sent by the client is ignored
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Le Petit Prince",
    "author": "Antoine de Saint-Exupéry",
    "category": "Roman"
}))]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
}

/// Partial update request. Absent and `null` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: Option<String>,
}

/// Book search query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
}

/// Field values of a new book as handed to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub category: String,
}

impl From<CreateBook> for BookFields {
    fn from(data: CreateBook) -> Self {
        Self {
            title: data.title,
            author: data.author,
            category: data.category,
        }
    }
}

/// Search filter; each present field must match, case-insensitively, as a substring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_ref()
                .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
        }

        contains(&book.title, &self.title)
            && contains(&book.author, &self.author)
            && contains(&book.category, &self.category)
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        // An empty parameter constrains nothing
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            title: non_empty(query.title),
            author: non_empty(query.author),
            category: non_empty(query.category),
        }
    }
}

/// Set of field assignments for a partial update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.category.is_none()
    }

    /// Apply the present fields to `book`, returning whether anything changed
    pub fn apply(&self, book: &mut Book) -> bool {
        let mut changed = false;
        for (field, value) in [
            (&mut book.title, &self.title),
            (&mut book.author, &self.author),
            (&mut book.category, &self.category),
        ] {
            if let Some(v) = value {
                if field.as_str() != v.as_str() {
                    *field = v.clone();
                    changed = true;
                }
            }
        }
        changed
    }
}

impl From<UpdateBook> for BookPatch {
    fn from(data: UpdateBook) -> Self {
        Self {
            title: data.title,
            author: data.author,
            category: data.category,
        }
    }
}
