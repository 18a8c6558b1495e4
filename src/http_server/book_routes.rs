//! Book HTTP Routes
//!
//! `POST /books`, `GET /books`, `GET|PUT|DELETE /books/:book_id`

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::books::{
    BookError, BookResult, BookService, CreateBookInput, ListQuery, StoreError, UpdateBookInput,
};

use super::errors::{ApiError, Operation};
use super::response::{BookData, BooksData, CreatedData, SuccessResponse};

/// Book state shared across handlers
pub struct BookState {
    pub service: BookService,
}

impl BookState {
    pub fn new(service: BookService) -> Self {
        Self { service }
    }
}

/// Create book routes
pub fn book_routes(state: Arc<BookState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/:book_id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

fn invalid_payload(rejection: JsonRejection) -> BookError {
    BookError::InvalidPayload(rejection.body_text())
}

fn invalid_id(rejection: PathRejection) -> BookError {
    BookError::InvalidId(rejection.body_text())
}

/// Run a service call on the blocking pool.
///
/// Store calls block on a connection lock and file I/O. A task that panics
/// or is cancelled answers as an unavailable store.
async fn run_blocking<T, F>(service: &BookService, call: F) -> BookResult<T>
where
    T: Send + 'static,
    F: FnOnce(&BookService) -> BookResult<T> + Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| BookError::Store(StoreError::Unavailable(format!("store task failed: {}", e))))?
}

async fn create_book_handler(
    State(state): State<Arc<BookState>>,
    payload: Result<Json<CreateBookInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = |e| ApiError::new(Operation::Create, e);

    let Json(input) = payload.map_err(invalid_payload).map_err(fail)?;
    let book_id = run_blocking(&state.service, move |service| service.create(input))
        .await
        .map_err(fail)?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_message(
            "Book added successfully",
            CreatedData { book_id },
        )),
    ))
}

async fn list_books_handler(
    State(state): State<Arc<BookState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = |e| ApiError::new(Operation::List, e);

    let Query(pairs) = pairs
        .map_err(|rejection| BookError::InvalidPayload(rejection.body_text()))
        .map_err(fail)?;
    let query = ListQuery::from_pairs(pairs);
    let books = run_blocking(&state.service, move |service| service.list(&query))
        .await
        .map_err(fail)?;

    Ok(Json(SuccessResponse::data(BooksData { books })))
}

async fn get_book_handler(
    State(state): State<Arc<BookState>>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = |e| ApiError::new(Operation::Get, e);

    let Path(book_id) = book_id.map_err(invalid_id).map_err(fail)?;
    let book = run_blocking(&state.service, move |service| service.get(&book_id))
        .await
        .map_err(fail)?;

    Ok(Json(SuccessResponse::data(BookData { book })))
}

async fn update_book_handler(
    State(state): State<Arc<BookState>>,
    book_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateBookInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = |e| ApiError::new(Operation::Update, e);

    let Path(book_id) = book_id.map_err(invalid_id).map_err(fail)?;
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            // An unknown id answers 404 even when the body is unreadable
            let id = book_id.clone();
            let known = run_blocking(&state.service, move |service| service.exists(&id))
                .await
                .map_err(fail)?;
            if !known {
                return Err(fail(BookError::NotFound(book_id)));
            }
            return Err(fail(invalid_payload(rejection)));
        }
    };

    run_blocking(&state.service, move |service| service.update(&book_id, input))
        .await
        .map_err(fail)?;

    Ok(Json(SuccessResponse::message("Book updated successfully")))
}

async fn delete_book_handler(
    State(state): State<Arc<BookState>>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fail = |e| ApiError::new(Operation::Delete, e);

    let Path(book_id) = book_id.map_err(invalid_id).map_err(fail)?;
    run_blocking(&state.service, move |service| service.delete(&book_id))
        .await
        .map_err(fail)?;

    Ok(Json(SuccessResponse::message("Book deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::MemoryBookStore;

    fn service() -> BookService {
        BookService::new(Arc::new(MemoryBookStore::new()))
    }

    #[tokio::test]
    async fn test_run_blocking_returns_call_result() {
        let service = service();

        let listed = run_blocking(&service, |s| s.list(&ListQuery::default())).await;
        assert_eq!(listed, Ok(Vec::new()));

        let missing = run_blocking(&service, |s| s.get("nope1234")).await;
        assert_eq!(missing, Err(BookError::NotFound("nope1234".to_string())));
    }

    #[tokio::test]
    async fn test_run_blocking_panic_is_unavailable_store() {
        let result: BookResult<()> = run_blocking(&service(), |_| panic!("driver crashed")).await;

        assert!(matches!(
            result,
            Err(BookError::Store(StoreError::Unavailable(_)))
        ));
    }
}
