//! Persistence for books.
//!
//! Handlers talk to [`BookRepository`]; only implementations of it see raw
//! documents.

pub use memory::InMemoryBookRepository;
pub use mongo::MongoBookRepository;

use super::models::{Book, BookId, CreateBook};

mod memory;
mod mongo;

#[derive(thiserror::Error, Debug)]
pub enum BookRepositoryError {
    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("database failure: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists every book in insertion order
    async fn list_books(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Stores a new book and returns it with its assigned id and timestamps
    async fn create_book(&self, request: CreateBook) -> Result<Book, BookRepositoryError>;

    /// Retrieves a single book
    async fn get_book(&self, id: BookId) -> Result<Book, BookRepositoryError>;

    /// Replaces the title of a book, returning the book as it was before the update
    async fn update_title(&self, id: BookId, title: String) -> Result<Book, BookRepositoryError>;

    /// Removes a book; removing an unknown id is not an error
    async fn delete_book(&self, id: BookId) -> Result<(), BookRepositoryError>;
}
