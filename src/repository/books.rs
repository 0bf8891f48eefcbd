//! MongoDB book store

use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use serde::Deserialize;

use super::{BookStore, BookStream};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFields, BookFilter, BookId, BookPatch},
};

/// Book document as stored in the collection
#[derive(Debug, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
    category: String,
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Self {
            id: doc.id.into(),
            title: doc.title,
            author: doc.author,
            category: doc.category,
        }
    }
}

#[derive(Clone)]
pub struct MongoBookStore {
    db: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(db: &Database, collection: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(collection),
        }
    }

    /// Create ascending indexes on the searchable fields
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let indexes = ["title", "author", "category"].into_iter().map(|field| {
            let mut keys = Document::new();
            keys.insert(field, 1);
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(format!("{}_1", field)).build())
                .build()
        });
        let result = self.collection.create_indexes(indexes, None).await?;
        tracing::debug!("Book indexes ready: {:?}", result.index_names);
        Ok(())
    }
}

/// Translate a search filter into a query document.
/// Values are escaped so that they match literally, as substrings.
fn filter_document(filter: &BookFilter) -> Document {
    let mut query = Document::new();
    for (field, value) in [
        ("title", &filter.title),
        ("author", &filter.author),
        ("category", &filter.category),
    ] {
        if let Some(value) = value {
            query.insert(
                field,
                doc! { "$regex": regex::escape(value), "$options": "i" },
            );
        }
    }
    query
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn insert(&self, fields: &BookFields) -> AppResult<BookId> {
        let result = self
            .collection
            .clone_with_type::<BookFields>()
            .insert_one(fields, None)
            .await?;
        result
            .inserted_id
            .as_object_id()
            .map(BookId::from)
            .ok_or_else(|| AppError::Internal(format!("Unexpected inserted id {}", result.inserted_id)))
    }

    async fn find_one(&self, id: &BookId) -> AppResult<Option<Book>> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(doc.map(Book::from))
    }

    async fn find_many(&self, filter: &BookFilter) -> AppResult<BookStream> {
        let cursor = self.collection.find(filter_document(filter), None).await?;
        Ok(cursor
            .map(|doc| doc.map(Book::from).map_err(AppError::from))
            .boxed())
    }

    async fn update_one(&self, id: &BookId, patch: &BookPatch) -> AppResult<bool> {
        if patch.is_empty() {
            return Ok(false);
        }
        let set = mongodb::bson::to_document(patch)
            .map_err(|e| AppError::Internal(format!("Cannot encode patch: {}", e)))?;
        let result = self
            .collection
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": set }, None)
            .await?;
        Ok(result.modified_count == 1)
    }

    async fn delete_one(&self, id: &BookId) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(result.deleted_count == 1)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
