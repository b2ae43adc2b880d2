use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::error::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::models::{Book, BookPayload, ValidationError};
use crate::repo::BookRepo;
use crate::service::{BookService, ServiceError};

#[derive(Clone)]
struct AppState<R> {
    books: BookService<R>,
}

pub fn build_app<R>(repo: R) -> Router
where
    R: BookRepo + Send + Sync + Clone + 'static,
{
    Router::new()
        .route("/book", post(insert_book::<R>))
        .route(
            "/book/{id}",
            get(get_book::<R>)
                .put(update_book::<R>)
                .delete(delete_book::<R>),
        )
        .route("/books", get(list_books::<R>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            books: BookService::new(repo),
        })
}

/// Failures of the HTTP surface and the status code each one maps to
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid book ID: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl<E: Error> From<ServiceError<E>> for ApiError {
    fn from(err: ServiceError<E>) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::Repository(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidId(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(message) => {
                error!("Request failed: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

async fn list_books<R: BookRepo>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let results = state.books.get_books().await?;

    info!("Retrieved {} books from the DB", results.len());

    Ok(Json(results))
}

async fn get_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_book_id(id)?;

    match state.books.get_book_by_id(id).await {
        Ok(book) => {
            info!("Retrieved book from DB: {:?}", book);
            Ok(Json(book).into_response())
        }
        // A missing book is a bare 404, with no message body
        Err(ServiceError::NotFound(_)) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(err) => Err(err.into()),
    }
}

async fn insert_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Book>, ApiError> {
    let new_book = payload.validate()?;

    let inserted_book = state.books.add_book(new_book).await?;

    info!("Inserted book into the DB: {:?}", inserted_book);

    Ok(Json(inserted_book))
}

async fn update_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(id)?;
    let new_book = payload.validate()?;

    let updated_book = state.books.update_book(id, new_book).await?;

    info!("Updated book in DB: {:?}", updated_book);

    Ok(Json(updated_book))
}

async fn delete_book<R: BookRepo>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let id = parse_book_id(id)?;

    state.books.delete_book(id).await?;

    info!("Deleted book from DB with ID: {}", id);

    Ok(format!("Book with id:{id} deleted successfully."))
}

fn parse_book_id(id: String) -> Result<i64, ApiError> {
    id.parse::<i64>().map_err(|_| ApiError::InvalidId(id))
}
