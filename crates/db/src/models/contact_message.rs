//! Contact and collaboration form submissions.

use khcrf_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{trim_field, trim_optional};

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub kind: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a public form submission. `kind` defaults to `contact`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactMessage {
    pub kind: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be valid"))]
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "message must be 1-5000 characters"))]
    pub message: String,
}

impl CreateContactMessage {
    /// Trim every text field so whitespace-only values fail validation.
    pub fn trim(&mut self) {
        trim_optional(&mut self.kind);
        trim_field(&mut self.name);
        trim_field(&mut self.email);
        trim_optional(&mut self.phone);
        trim_optional(&mut self.organization);
        trim_optional(&mut self.subject);
        trim_field(&mut self.message);
    }
}
