//! API tests driving the router in-process over the in-memory repository

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_catalog::{api, repository::MemoryRepository, AppConfig, AppState};

fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(MemoryRepository::new()));
    api::create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/library/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/library/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_register_borrower() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "name": "Wei Lee", "email": "wei@test.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_number());
    assert_eq!(body["email"], "wei@test.com");
}

#[tokio::test]
async fn test_register_borrower_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "email": "wei@test.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name is required");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "name": "Wei Lee", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_book_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/books",
        Some(json!({ "isbn": "123-456", "title": "", "author": "Uncle Bob" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_null_field_is_a_validation_error() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "name": null, "email": "a@b.c" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_unreadable_body_uses_error_response() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/books",
        Some(json!({ "isbn": 123, "title": "Clean Code", "author": "Uncle Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/library/borrowers")
        .header("content-type", "application/json")
        .body(Body::from("{"))
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&bytes).expect("Body is not JSON");
    assert_eq!(body["status"], 400);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_register_book_ignores_client_id_and_borrower() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/books",
        Some(json!({
            "id": 500,
            "isbn": "123-456",
            "title": "Clean Code",
            "author": "Uncle Bob",
            "currentBorrowerId": 7
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], 500);
    assert!(body["currentBorrowerId"].is_null());
}

#[tokio::test]
async fn test_list_books() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/library/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for _ in 0..3 {
        send(
            &app,
            Method::POST,
            "/api/library/books",
            Some(json!({ "isbn": "123-456", "title": "Clean Code", "author": "Uncle Bob" })),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/library/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_borrow_unknown_book() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/borrow?borrowerId=1&bookId=99",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_return_unknown_book() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/library/return/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_full_scenario() {
    let app = app();

    let (status, borrower) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "name": "Wei Lee", "email": "wei@test.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let borrower_id = borrower["id"].as_i64().expect("No borrower ID");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/borrowers",
        Some(json!({ "name": "Wei Lee", "email": "wei@test.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered.");

    let (status, book) = send(
        &app,
        Method::POST,
        "/api/library/books",
        Some(json!({ "isbn": "123-456", "title": "Clean Code", "author": "Uncle Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_i64().expect("No book ID");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/library/books",
        Some(json!({ "isbn": "123-456", "title": "Dirty Code", "author": "Uncle Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "ISBN conflict: Metadata mismatch.");

    let borrow_uri = format!(
        "/api/library/borrow?borrowerId={}&bookId={}",
        borrower_id, book_id
    );

    let (status, body) = send(&app, Method::POST, &borrow_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book borrowed successfully.");

    let (_, books) = send(&app, Method::GET, "/api/library/books", None).await;
    assert_eq!(books[0]["currentBorrowerId"], borrower_id);

    let (status, body) = send(&app, Method::POST, &borrow_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Book is already borrowed.");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/library/return/{}", book_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book returned.");

    let (_, books) = send(&app, Method::GET, "/api/library/books", None).await;
    assert!(books[0]["currentBorrowerId"].is_null());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/borrow"].is_object());
}
