//! Book (physical copy) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// One physical copy of a title. Several copies may share an ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Borrower currently holding this copy; `null` when on shelf
    pub current_borrower_id: Option<i64>,
}

/// Borrow status of a copy, derived from `current_borrower_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowStatus {
    Available,
    Borrowed(i64),
}

impl Book {
    pub fn borrow_status(&self) -> BorrowStatus {
        match self.current_borrower_id {
            Some(borrower_id) => BorrowStatus::Borrowed(borrower_id),
            None => BorrowStatus::Available,
        }
    }

    /// Whether `title` and `author` agree with this copy, ignoring case
    pub fn same_metadata(&self, title: &str, author: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
            && self.author.to_lowercase() == author.to_lowercase()
    }
}

/// Register book request.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewBook {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "ISBN is required"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Author is required"))]
    pub author: String,
}

impl NewBook {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
        }
    }
}
