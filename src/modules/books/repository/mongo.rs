use async_trait::async_trait;
use bookshelf_db::Database;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use super::{BookRepository, BookRepositoryError};
use crate::modules::books::models::{Book, BookDocument, BookId, CreateBook};
use crate::utils::now_millis;

/// [`BookRepository`] over a MongoDB collection, sharing the process-wide pool.
#[derive(Clone)]
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let documents: Vec<BookDocument> = self.collection.find(doc! {}).await?.try_collect().await?;

        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn create_book(&self, request: CreateBook) -> Result<Book, BookRepositoryError> {
        let book = Book::new(request, now_millis());

        self.collection
            .insert_one(BookDocument::from(&book))
            .await?;

        tracing::debug!(book_id = %book.id, "book inserted");
        Ok(book)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, BookRepositoryError> {
        self.collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?
            .map(Book::from)
            .ok_or(BookRepositoryError::NotFound(id))
    }

    async fn update_title(&self, id: BookId, title: String) -> Result<Book, BookRepositoryError> {
        let current = self.get_book(id).await?;
        let updated = current.retitled(title, now_millis());
        let document = BookDocument::from(&updated);

        let result = self
            .collection
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! {
                    "$set": {
                        "title": document.title.as_str(),
                        "updated_at": document.updated_at,
                    }
                },
            )
            .await?;

        // Deleted between the read and the write.
        if result.matched_count == 0 {
            return Err(BookRepositoryError::NotFound(id));
        }

        Ok(current)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookRepositoryError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;

        tracing::debug!(book_id = %id, deleted = result.deleted_count, "book delete applied");
        Ok(())
    }
}
