//! Contact and collaboration form kinds.

use crate::error::CoreError;

pub const KIND_CONTACT: &str = "contact";
pub const KIND_COLLABORATION: &str = "collaboration";

/// All valid contact message kinds.
pub const VALID_MESSAGE_KINDS: &[&str] = &[KIND_CONTACT, KIND_COLLABORATION];

/// Validate that a message kind is one of the known kinds.
pub fn validate_message_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_MESSAGE_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown message kind: '{kind}'. Valid kinds: {}",
            VALID_MESSAGE_KINDS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaboration_is_valid() {
        assert!(validate_message_kind(KIND_COLLABORATION).is_ok());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(validate_message_kind("complaint").is_err());
    }
}
