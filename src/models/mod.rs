//! Data models for the library catalog

pub mod book;
pub mod borrower;

// Re-export commonly used types
pub use book::{Book, BorrowStatus, NewBook};
pub use borrower::{Borrower, NewBorrower};

use validator::ValidationError;

/// Reject strings that are empty or contain only whitespace
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
