//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity is editable

pub mod advocacy;
pub mod badge_application;
pub mod book;
pub mod contact_message;
pub mod legislative_lobby;
pub mod payment;

/// Strip surrounding whitespace from a JSON text field in place.
pub(crate) fn trim_field(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub(crate) fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value {
        trim_field(v);
    }
}
