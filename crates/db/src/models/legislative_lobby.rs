//! Legislative lobby directory entries.

use khcrf_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{trim_field, trim_optional};

/// A row from the `legislative_lobbies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LegislativeLobby {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub title: String,
    pub image: String,
    pub hover_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLegislativeLobby {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: String,
    pub hover_image: Option<String>,
}

impl CreateLegislativeLobby {
    /// Trim every text field so whitespace-only values fail validation.
    pub fn trim(&mut self) {
        trim_field(&mut self.name);
        trim_field(&mut self.location);
        trim_field(&mut self.title);
        trim_field(&mut self.image);
        trim_optional(&mut self.hover_image);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLegislativeLobby {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: Option<String>,
    pub hover_image: Option<String>,
}

impl UpdateLegislativeLobby {
    pub fn trim(&mut self) {
        trim_optional(&mut self.name);
        trim_optional(&mut self.location);
        trim_optional(&mut self.title);
        trim_optional(&mut self.image);
        trim_optional(&mut self.hover_image);
    }
}
