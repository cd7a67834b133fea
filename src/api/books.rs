//! Book copy endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::AppJson;
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

/// List every copy in the catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All book copies", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Register a physical copy
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Copy registered", body = Book),
        (status = 400, description = "Missing or blank field", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already registered with a different title or author", body = crate::error::ErrorResponse)
    )
)]
pub async fn register_book(
    State(state): State<crate::AppState>,
    AppJson(book): AppJson<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.register_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
