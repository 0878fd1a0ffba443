use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use shelf_http::{send_message, send_one, send_page, AppError, EntityId, Pageable, ValidJson};

use super::models::BookRequest;
use super::service::BookService;

const FOUND_ALL: &str = "Found books!";
const FOUND: &str = "Found book!";
const SAVED: &str = "Saved book!";
const UPDATED: &str = "Updated book!";
const DELETED: &str = "Deleted book!";

/// Route table for the book endpoints.
pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/findAll", get(find_all))
        .route("/find/{id}", get(find_by_id))
        .route("/save", post(save))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(delete_by_id))
        .with_state(service)
}

async fn find_all(
    State(service): State<Arc<BookService>>,
    Pageable(request): Pageable,
) -> Result<Response, AppError> {
    let page = service.find_all(&request).await?;

    tracing::info!(
        page = request.page,
        size = request.size,
        sort = %request.sort,
        returned = page.number_of_elements(),
        "books found"
    );

    Ok(send_page(StatusCode::OK, FOUND_ALL, page))
}

async fn find_by_id(
    State(service): State<Arc<BookService>>,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let book = service.find_by_id(id).await?;

    tracing::info!(id, "book found");

    Ok(send_one(StatusCode::OK, FOUND, book))
}

async fn save(
    State(service): State<Arc<BookService>>,
    ValidJson(draft): ValidJson<BookRequest>,
) -> Result<Response, AppError> {
    let book = service.save(draft).await?;

    tracing::info!(id = book.id, isbn13 = %book.isbn13, "book saved");

    Ok(send_one(StatusCode::CREATED, SAVED, book))
}

async fn update(
    State(service): State<Arc<BookService>>,
    EntityId(id): EntityId,
    ValidJson(draft): ValidJson<BookRequest>,
) -> Result<Response, AppError> {
    let book = service.update(id, draft).await?;

    tracing::info!(id, "book updated");

    Ok(send_one(StatusCode::OK, UPDATED, book))
}

async fn delete_by_id(
    State(service): State<Arc<BookService>>,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    service.delete_by_id(id).await?;

    tracing::info!(id, "book deleted");

    Ok(send_message(StatusCode::OK, DELETED))
}
