//! Borrower registration endpoint

use axum::{extract::State, http::StatusCode, Json};

use super::AppJson;
use crate::{
    error::AppResult,
    models::{Borrower, NewBorrower},
};

/// Register a new borrower
#[utoipa::path(
    post,
    path = "/borrowers",
    tag = "borrowers",
    request_body = NewBorrower,
    responses(
        (status = 201, description = "Borrower registered", body = Borrower),
        (status = 400, description = "Missing or malformed field", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register_borrower(
    State(state): State<crate::AppState>,
    AppJson(borrower): AppJson<NewBorrower>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    let created = state.services.catalog.register_borrower(borrower).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
