//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use bookshelf_http::{error::AppError, extract::JsonBody};

use super::models::{
    Book, BookEnvelope, BookId, BookList, CreateBook, MessageResponse, UpdateBookTitle,
};
use super::repository::{BookRepository, BookRepositoryError};

type Repository = Arc<dyn BookRepository>;

/// Routes relative to the module mount point.
///
/// Methods other than the ones listed here get a plain-text 405.
pub fn router(repository: Repository) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books)
                .post(create_book)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get_book)
                .put(update_book)
                .delete(delete_book)
                .fallback(method_not_allowed),
        )
        .with_state(repository)
}

impl From<BookRepositoryError> for AppError {
    fn from(err: BookRepositoryError) -> Self {
        match err {
            BookRepositoryError::NotFound(_) => AppError::not_found("Book not found"),
            BookRepositoryError::Database(err) => {
                AppError::Internal(anyhow::Error::new(err).context("book query failed"))
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<BookId, AppError> {
    raw.parse::<BookId>()
        .map_err(|err| AppError::bad_request(err.to_string()))
}

async fn list_books(State(repository): State<Repository>) -> Result<Json<BookList>, AppError> {
    let data = repository.list_books().await?;
    Ok(Json(BookList { data }))
}

async fn create_book(
    State(repository): State<Repository>,
    JsonBody(request): JsonBody<CreateBook>,
) -> Result<(StatusCode, Json<BookEnvelope>), AppError> {
    let book = repository.create_book(request).await?;
    tracing::info!(book_id = %book.id, "book created");

    Ok((
        StatusCode::CREATED,
        Json(BookEnvelope {
            message: "Book created successfully".to_string(),
            data: book,
        }),
    ))
}

async fn get_book(
    State(repository): State<Repository>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(repository.get_book(id).await?))
}

/// Responds with the book as it was before the title change.
async fn update_book(
    State(repository): State<Repository>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateBookTitle>,
) -> Result<Json<BookEnvelope>, AppError> {
    let id = parse_id(&id)?;
    let previous = repository.update_title(id, request.title).await?;
    tracing::info!(book_id = %id, "book title updated");

    Ok(Json(BookEnvelope {
        message: "Book updated successfully".to_string(),
        data: previous,
    }))
}

async fn delete_book(
    State(repository): State<Repository>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    repository.delete_book(id).await?;
    tracing::info!(book_id = %id, "book deleted");

    Ok(Json(MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::method_not_allowed(method.as_str())
}
