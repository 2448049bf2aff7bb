//! HTTP handlers for the books resource.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use shelf_http::{AppError, Envelope, JsonBody};

use super::models::{BookData, BookIdData, BookPayload, BooksData};
use super::service::BookService;

type Service = State<Arc<BookService>>;

/// Routes served by the books module.
pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/books", get(list_books).post(add_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

async fn list_books(State(service): Service) -> Result<Envelope<BooksData>, AppError> {
    let books = service.list().await?;
    Ok(Envelope::success(BooksData { books }))
}

async fn get_book(
    State(service): Service,
    Path(id): Path<String>,
) -> Result<Envelope<BookData>, AppError> {
    let book = service.get(&id).await?;
    Ok(Envelope::success(BookData { book }))
}

async fn add_book(
    State(service): Service,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<Envelope<BookIdData>, AppError> {
    let book_id = service.create(payload).await?;
    Ok(Envelope::success_with_message(
        "book added successfully",
        BookIdData { book_id },
    ))
}

async fn update_book(
    State(service): Service,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<Envelope<BookData>, AppError> {
    let book = service.update(&id, payload).await?;
    Ok(Envelope::success_with_message(
        "book updated successfully",
        BookData { book },
    ))
}

async fn delete_book(
    State(service): Service,
    Path(id): Path<String>,
) -> Result<Envelope, AppError> {
    service.delete(&id).await?;
    Ok(Envelope::message("book deleted successfully"))
}
