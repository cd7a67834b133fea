//! PostgreSQL storage backend

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{messages::EMAIL_ALREADY_REGISTERED, AppError, AppResult},
    models::{Book, Borrower, NewBook, NewBorrower},
};

use super::{Repository, RepositoryTx};

const BOOK_COLUMNS: &str = "id, isbn, title, author, current_borrower_id";

#[derive(Clone)]
pub struct PgRepository {
    pool: Pool<Postgres>,
}

impl PgRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn begin(&self) -> AppResult<Box<dyn RepositoryTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTransaction { tx }))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open database transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RepositoryTx for PgTransaction {
    async fn find_book_by_id(&mut self, id: i64) -> AppResult<Option<Book>> {
        // Row lock: concurrent borrow/return of the same copy wait for us
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1 FOR UPDATE",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(book)
    }

    async fn find_books_by_isbn(&mut self, isbn: &str) -> AppResult<Vec<Book>> {
        // Serialize registrations of the same ISBN, including the first copy
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(isbn)
            .execute(&mut *self.tx)
            .await?;

        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE isbn = $1 ORDER BY id",
            BOOK_COLUMNS
        ))
        .bind(isbn)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(books)
    }

    async fn insert_book(&mut self, book: &NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (isbn, title, author, current_borrower_id)
            VALUES ($1, $2, $3, NULL)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(created)
    }

    async fn save_book(&mut self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET isbn = $2, title = $3, author = $4, current_borrower_id = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(book.id)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.current_borrower_id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book.id)))
    }

    async fn list_all_books(&mut self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(books)
    }

    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>(
            "SELECT id, name, email FROM borrowers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(borrower)
    }

    async fn exists_borrower_with_email(&mut self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrowers WHERE email = $1)")
                .bind(email)
                .fetch_one(&mut *self.tx)
                .await?;

        Ok(exists)
    }

    async fn insert_borrower(&mut self, borrower: &NewBorrower) -> AppResult<Borrower> {
        let created = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(&borrower.name)
        .bind(&borrower.email)
        .fetch_one(&mut *self.tx)
        .await;

        match created {
            Ok(created) => Ok(created),
            // A concurrent registration won the race past our existence check
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict(EMAIL_ALREADY_REGISTERED.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
