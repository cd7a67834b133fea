//! Repository layer: the storage contract consumed by the catalog service.
//!
//! Every catalog operation runs inside one [`RepositoryTx`]. A transaction
//! that is dropped without [`RepositoryTx::commit`] leaves storage untouched,
//! so an early `?` return never publishes a partial effect.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, Borrower, NewBook, NewBorrower},
};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Entry point to a storage backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Open a transaction. Reads made through it observe a state that no
    /// concurrent transaction can change before it commits or is dropped.
    async fn begin(&self) -> AppResult<Box<dyn RepositoryTx>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Unit of work against the catalog dataset
#[async_trait]
pub trait RepositoryTx: Send {
    /// Get a book by id, locking it for the rest of the transaction
    async fn find_book_by_id(&mut self, id: i64) -> AppResult<Option<Book>>;

    /// Get all copies sharing an ISBN, ordered by id
    async fn find_books_by_isbn(&mut self, isbn: &str) -> AppResult<Vec<Book>>;

    /// Create a new copy with a freshly assigned id and no borrower
    async fn insert_book(&mut self, book: &NewBook) -> AppResult<Book>;

    /// Persist the mutable state of an existing copy
    async fn save_book(&mut self, book: &Book) -> AppResult<Book>;

    /// Get every copy in the catalog, ordered by id
    async fn list_all_books(&mut self) -> AppResult<Vec<Book>>;

    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>>;

    async fn exists_borrower_with_email(&mut self, email: &str) -> AppResult<bool>;

    /// Create a new borrower with a freshly assigned id
    async fn insert_borrower(&mut self, borrower: &NewBorrower) -> AppResult<Borrower>;

    /// Make every write of this transaction durable and visible
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
