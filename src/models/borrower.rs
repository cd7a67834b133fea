//! Borrower model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// Registered borrower. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: i64,
    pub name: String,
    /// Unique across all borrowers (exact match)
    pub email: String,
}

/// Register borrower request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewBorrower {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
}

impl NewBorrower {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
