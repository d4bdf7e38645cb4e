//! Book (e-publication) models and DTOs.

use khcrf_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover_image: String,
    pub pdf_file: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a book. File fields hold stored upload paths.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    pub category: String,
    #[validate(length(min = 1, message = "cover image is required"))]
    pub cover_image: String,
    #[validate(length(min = 1, message = "pdf file is required"))]
    pub pdf_file: String,
}

/// DTO for partially updating a book.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub pdf_file: Option<String>,
}
