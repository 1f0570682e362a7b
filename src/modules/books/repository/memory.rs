use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, BookRepositoryError};
use crate::modules::books::models::{Book, BookId, CreateBook};
use crate::utils::now_millis;

/// Process-local [`BookRepository`] keeping books in insertion order.
///
/// Used to exercise the HTTP layer without a MongoDB deployment.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.books.read().await.clone())
    }

    async fn create_book(&self, request: CreateBook) -> Result<Book, BookRepositoryError> {
        let book = Book::new(request, now_millis());
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, BookRepositoryError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(BookRepositoryError::NotFound(id))
    }

    async fn update_title(&self, id: BookId, title: String) -> Result<Book, BookRepositoryError> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(BookRepositoryError::NotFound(id))?;

        let previous = book.clone();
        *book = previous.retitled(title, now_millis());
        Ok(previous)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookRepositoryError> {
        self.books.write().await.retain(|book| book.id != id);
        Ok(())
    }
}
