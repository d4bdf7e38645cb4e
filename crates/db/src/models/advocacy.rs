//! Advocacy post models and DTOs.

use khcrf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `advocacy_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdvocacyPost {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateAdvocacyPost {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    pub images: Vec<String>,
}

/// `images: Some(..)` replaces the stored list.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateAdvocacyPost {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}
