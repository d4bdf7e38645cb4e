//! Badge application models and DTOs.
//!
//! List columns (`badges`, `supporting_documentation`, `uploaded_files`) are
//! PostgreSQL `TEXT[]`. Request-side normalization from JSON text happens in
//! the API layer before these DTOs are built.

use khcrf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `badge_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BadgeApplication {
    pub id: DbId,
    pub business_name: String,
    pub contact_person: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub business_address: Option<String>,
    pub badges: Vec<String>,
    pub business_description: Option<String>,
    pub production_methods: Option<String>,
    pub supporting_documentation: Vec<String>,
    pub other_documentation: Option<String>,
    pub certification: bool,
    pub uploaded_files: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateBadgeApplication {
    #[validate(length(min = 1, message = "business name must not be empty"))]
    pub business_name: String,
    #[validate(length(min = 1, message = "contact person must not be empty"))]
    pub contact_person: String,
    #[validate(email(message = "email address must be valid"))]
    pub email_address: String,
    pub phone_number: Option<String>,
    pub business_address: Option<String>,
    pub badges: Vec<String>,
    pub business_description: Option<String>,
    pub production_methods: Option<String>,
    pub supporting_documentation: Vec<String>,
    pub other_documentation: Option<String>,
    pub certification: bool,
    pub uploaded_files: Vec<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateBadgeApplication {
    #[validate(length(min = 1, message = "business name must not be empty"))]
    pub business_name: Option<String>,
    #[validate(length(min = 1, message = "contact person must not be empty"))]
    pub contact_person: Option<String>,
    #[validate(email(message = "email address must be valid"))]
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub business_address: Option<String>,
    pub badges: Option<Vec<String>>,
    pub business_description: Option<String>,
    pub production_methods: Option<String>,
    pub supporting_documentation: Option<Vec<String>>,
    pub other_documentation: Option<String>,
    pub certification: Option<bool>,
}
