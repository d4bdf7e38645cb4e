use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fail with [`CoreError::Validation`] when a required text value is absent
/// or blank.
pub fn require_non_empty(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("'{field}' is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn present_value_passes() {
        assert!(require_non_empty("title", Some("T")).is_ok());
    }

    #[test]
    fn blank_value_fails() {
        assert_matches!(
            require_non_empty("title", Some("   ")),
            Err(CoreError::Validation(msg)) if msg.contains("title")
        );
    }

    #[test]
    fn missing_value_fails() {
        assert_matches!(require_non_empty("author", None), Err(CoreError::Validation(_)));
    }
}
