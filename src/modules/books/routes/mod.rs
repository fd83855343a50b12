//! HTTP handlers for the books module.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use bookshelf_http::{ApiResponse, AppError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::BookCatalog;
use super::error::{CatalogError, CatalogResult};
use super::messages::{self, Action};
use super::models::{Book, BookFilter, BookInput, BookSummary};
use super::schema::parse_book_input;

/// Routes served by the books module
pub fn router(catalog: BookCatalog) -> Router {
    Router::new()
        .route("/books", post(add_book).get(list_books))
        .route(
            "/books/{id}",
            get(show_book).put(edit_book).delete(remove_book),
        )
        .with_state(catalog)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookIdData {
    book_id: String,
}

#[derive(Debug, Serialize)]
struct BooksData {
    books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
struct BookData {
    book: Book,
}

/// Raw list filters as sent by clients
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub reading: Option<String>,
    pub finished: Option<String>,
    pub name: Option<String>,
}

impl ListBooksQuery {
    pub fn into_filter(self) -> CatalogResult<BookFilter> {
        Ok(BookFilter {
            reading: parse_flag("reading", self.reading)?,
            finished: parse_flag("finished", self.finished)?,
            name: self.name,
        })
    }
}

/// `1`/`true` and `0`/`false`, as sent by the existing clients
fn parse_flag(param: &'static str, raw: Option<String>) -> CatalogResult<Option<bool>> {
    match raw.as_deref() {
        None => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(CatalogError::InvalidQuery {
            param,
            value: other.to_string(),
        }),
    }
}

fn read_query(query: Result<Query<ListBooksQuery>, QueryRejection>) -> CatalogResult<BookFilter> {
    let Query(query) =
        query.map_err(|rejection| CatalogError::MalformedQuery(rejection.body_text()))?;
    query.into_filter()
}

/// An id that cannot be decoded names no stored book
fn read_id(id: Result<Path<String>, PathRejection>) -> CatalogResult<String> {
    let Path(id) = id.map_err(|rejection| CatalogError::NotFound(rejection.body_text()))?;
    Ok(id)
}

fn read_payload(payload: Result<Json<Value>, JsonRejection>) -> CatalogResult<BookInput> {
    let Json(value) = payload.map_err(|rejection| CatalogError::InvalidPayload(rejection.body_text()))?;
    parse_book_input(value)
}

/// Convert a catalog failure into the fail envelope for `action`
fn reject(action: Action) -> impl Fn(CatalogError) -> AppError {
    move |error| {
        let message = messages::describe(action, &error);
        match error {
            CatalogError::NotFound(_) => AppError::not_found(message),
            CatalogError::Internal(source) => AppError::internal(message, source),
            _ => AppError::bad_request(message),
        }
    }
}

async fn add_book(
    State(catalog): State<BookCatalog>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<BookIdData>, AppError> {
    let input = read_payload(payload).map_err(reject(Action::Add))?;
    let book_id = catalog.create(input).await.map_err(reject(Action::Add))?;

    Ok(ApiResponse::created()
        .with_message(Action::Add.success())
        .with_data(BookIdData { book_id }))
}

async fn list_books(
    State(catalog): State<BookCatalog>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> Result<ApiResponse<BooksData>, AppError> {
    let filter = read_query(query).map_err(reject(Action::List))?;
    let books = catalog.list(&filter).await.map_err(reject(Action::List))?;

    Ok(ApiResponse::ok().with_data(BooksData { books }))
}

async fn show_book(
    State(catalog): State<BookCatalog>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<BookData>, AppError> {
    let id = read_id(id).map_err(reject(Action::Show))?;
    let book = catalog.get(&id).await.map_err(reject(Action::Show))?;

    Ok(ApiResponse::ok().with_data(BookData { book }))
}

async fn edit_book(
    State(catalog): State<BookCatalog>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ApiResponse<BookIdData>, AppError> {
    let input = read_payload(payload).map_err(reject(Action::Update))?;
    let id = read_id(id).map_err(reject(Action::Update))?;
    let book_id = catalog
        .update(&id, input)
        .await
        .map_err(reject(Action::Update))?;

    Ok(ApiResponse::ok()
        .with_message(Action::Update.success())
        .with_data(BookIdData { book_id }))
}

async fn remove_book(
    State(catalog): State<BookCatalog>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse, AppError> {
    let id = read_id(id).map_err(reject(Action::Delete))?;
    catalog.delete(&id).await.map_err(reject(Action::Delete))?;

    Ok(ApiResponse::ok().with_message(Action::Delete.success()))
}
