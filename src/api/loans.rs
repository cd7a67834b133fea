//! Borrow and return endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppResult;

use super::MessageResponse;

/// Borrow request parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BorrowParams {
    /// Borrower taking the copy
    pub borrower_id: i64,
    /// Copy being lent
    pub book_id: i64,
}

/// Borrow a book copy
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "loans",
    params(BorrowParams),
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 404, description = "Book or borrower not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is already borrowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Query(params): Query<BorrowParams>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .catalog
        .borrow_book(params.borrower_id, params.book_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book borrowed successfully.".to_string(),
    }))
}

/// Return a book copy
#[utoipa::path(
    post,
    path = "/return/{book_id}",
    tag = "loans",
    params(
        ("book_id" = i64, Path, description = "Book copy ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.return_book(book_id).await?;

    Ok(Json(MessageResponse {
        message: "Book returned.".to_string(),
    }))
}
