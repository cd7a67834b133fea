//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Borrower, book copy and loan tracking REST API"
    ),
    servers(
        (url = "/api/library", description = "Library API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Borrowers
        borrowers::register_borrower,
        // Books
        books::list_books,
        books::register_book,
        // Loans
        loans::borrow_book,
        loans::return_book,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::NewBook,
            crate::models::Borrower,
            crate::models::NewBorrower,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "borrowers", description = "Borrower registration"),
        (name = "books", description = "Book copy registration and listing"),
        (name = "loans", description = "Borrow and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
