//! In-memory storage backend.
//!
//! A transaction holds the dataset lock from `begin` until it is committed or
//! dropped and works on a staged copy, so transactions are fully serialized.

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::{Book, Borrower, NewBook, NewBorrower},
};

use super::{Repository, RepositoryTx};

#[derive(Debug, Clone, Default)]
struct Dataset {
    books: BTreeMap<i64, Book>,
    borrowers: BTreeMap<i64, Borrower>,
    last_book_id: i64,
    last_borrower_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    data: Arc<Mutex<Dataset>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes made durable by committed transactions
    pub fn committed_writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn begin(&self) -> AppResult<Box<dyn RepositoryTx>> {
        let guard = Arc::clone(&self.data).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            staged,
            writes: 0,
            committed: Arc::clone(&self.writes),
        }))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Dataset>,
    staged: Dataset,
    writes: usize,
    committed: Arc<AtomicUsize>,
}

#[async_trait]
impl RepositoryTx for MemoryTransaction {
    async fn find_book_by_id(&mut self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.staged.books.get(&id).cloned())
    }

    async fn find_books_by_isbn(&mut self, isbn: &str) -> AppResult<Vec<Book>> {
        Ok(self
            .staged
            .books
            .values()
            .filter(|b| b.isbn == isbn)
            .cloned()
            .collect())
    }

    async fn insert_book(&mut self, book: &NewBook) -> AppResult<Book> {
        self.staged.last_book_id += 1;
        let created = Book {
            id: self.staged.last_book_id,
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            current_borrower_id: None,
        };
        self.staged.books.insert(created.id, created.clone());
        self.writes += 1;
        Ok(created)
    }

    async fn save_book(&mut self, book: &Book) -> AppResult<Book> {
        let stored = self
            .staged
            .books
            .get_mut(&book.id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book.id)))?;
        *stored = book.clone();
        self.writes += 1;
        Ok(book.clone())
    }

    async fn list_all_books(&mut self) -> AppResult<Vec<Book>> {
        Ok(self.staged.books.values().cloned().collect())
    }

    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>> {
        Ok(self.staged.borrowers.get(&id).cloned())
    }

    async fn exists_borrower_with_email(&mut self, email: &str) -> AppResult<bool> {
        Ok(self.staged.borrowers.values().any(|b| b.email == email))
    }

    async fn insert_borrower(&mut self, borrower: &NewBorrower) -> AppResult<Borrower> {
        self.staged.last_borrower_id += 1;
        let created = Borrower {
            id: self.staged.last_borrower_id,
            name: borrower.name.clone(),
            email: borrower.email.clone(),
        };
        self.staged.borrowers.insert(created.id, created.clone());
        self.writes += 1;
        Ok(created)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction {
            mut guard,
            staged,
            writes,
            committed,
        } = *self;
        *guard = staged;
        committed.fetch_add(writes, Ordering::SeqCst);
        Ok(())
    }
}
