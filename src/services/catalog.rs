//! Catalog service: borrower and copy registration, borrow and return.
//!
//! Each operation opens exactly one repository transaction and commits it
//! only after every rule has passed, so a rejected request writes nothing.

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{
        messages::{
            BOOK_ALREADY_BORROWED, BOOK_NOT_FOUND, BORROWER_NOT_FOUND, EMAIL_ALREADY_REGISTERED,
            ISBN_METADATA_MISMATCH,
        },
        AppError, AppResult,
    },
    models::{Book, BorrowStatus, Borrower, NewBook, NewBorrower},
    repository::Repository,
};


#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn Repository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Register a borrower. Emails are unique (exact match).
    pub async fn register_borrower(&self, borrower: NewBorrower) -> AppResult<Borrower> {
        tracing::info!(email = %borrower.email, "Request: registering borrower");
        borrower.validate()?;

        let mut tx = self.repository.begin().await?;

        if tx.exists_borrower_with_email(&borrower.email).await? {
            tracing::info!(email = %borrower.email, "Rejected: email already registered");
            return Err(AppError::Conflict(EMAIL_ALREADY_REGISTERED.to_string()));
        }

        let created = tx.insert_borrower(&borrower).await?;
        tx.commit().await?;

        tracing::info!(borrower_id = created.id, "Response: registered borrower");
        Ok(created)
    }

    /// Register a new physical copy.
    ///
    /// When copies of the ISBN already exist, title and author must match the
    /// first one (ignoring case). Registration always creates a new row.
    pub async fn register_book(&self, book: NewBook) -> AppResult<Book> {
        tracing::info!(isbn = %book.isbn, "Request: registering book");
        book.validate()?;

        let mut tx = self.repository.begin().await?;

        let copies = tx.find_books_by_isbn(&book.isbn).await?;
        if let Some(existing) = copies.first() {
            if !existing.same_metadata(&book.title, &book.author) {
                tracing::info!(
                    isbn = %book.isbn,
                    existing_id = existing.id,
                    "Rejected: metadata does not match existing copy"
                );
                return Err(AppError::Conflict(ISBN_METADATA_MISMATCH.to_string()));
            }
        }

        let created = tx.insert_book(&book).await?;
        tx.commit().await?;

        tracing::info!(
            book_id = created.id,
            copies = copies.len() + 1,
            "Response: registered book"
        );
        Ok(created)
    }

    /// Lend a copy to a borrower.
    ///
    /// Check order is part of the contract: book existence, then borrower
    /// existence, then availability.
    pub async fn borrow_book(&self, borrower_id: i64, book_id: i64) -> AppResult<()> {
        tracing::info!(borrower_id, book_id, "Request: borrowing book");

        let mut tx = self.repository.begin().await?;

        let mut book = tx
            .find_book_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        let borrower = tx
            .find_borrower_by_id(borrower_id)
            .await?
            .ok_or_else(|| AppError::NotFound(BORROWER_NOT_FOUND.to_string()))?;

        if let BorrowStatus::Borrowed(holder) = book.borrow_status() {
            tracing::info!(book_id, holder, "Rejected: book already borrowed");
            return Err(AppError::Conflict(BOOK_ALREADY_BORROWED.to_string()));
        }

        book.current_borrower_id = Some(borrower.id);
        tx.save_book(&book).await?;
        tx.commit().await?;

        tracing::info!(borrower_id, book_id, "Response: borrowed book");
        Ok(())
    }

    /// Put a copy back on the shelf. Returning an available copy is a no-op.
    pub async fn return_book(&self, book_id: i64) -> AppResult<()> {
        tracing::info!(book_id, "Request: returning book");

        let mut tx = self.repository.begin().await?;

        let mut book = tx
            .find_book_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        book.current_borrower_id = None;
        tx.save_book(&book).await?;
        tx.commit().await?;

        tracing::info!(book_id, "Response: returned book");
        Ok(())
    }

    /// Snapshot of every copy in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        tracing::info!("Request: listing books");

        let mut tx = self.repository.begin().await?;
        let books = tx.list_all_books().await?;
        tx.commit().await?;

        tracing::info!(count = books.len(), "Response: listed books");
        Ok(books)
    }
}
