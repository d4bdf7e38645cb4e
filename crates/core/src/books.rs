//! E-publication categories.
//!
//! The values must match the `ck_books_category` constraint in the
//! `books` migration.

use crate::error::CoreError;

pub const CATEGORY_BEST_PRACTICES: &str = "best_practices";
pub const CATEGORY_CASE_STUDIES: &str = "case_studies";
pub const CATEGORY_RESEARCH_PAPERS: &str = "research_papers";
pub const CATEGORY_E_BOOK: &str = "e_book";

/// All valid book categories.
pub const VALID_BOOK_CATEGORIES: &[&str] = &[
    CATEGORY_BEST_PRACTICES,
    CATEGORY_CASE_STUDIES,
    CATEGORY_RESEARCH_PAPERS,
    CATEGORY_E_BOOK,
];

/// Validate that a category string is one of the known categories.
pub fn validate_book_category(category: &str) -> Result<(), CoreError> {
    if VALID_BOOK_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown book category: '{category}'. Valid categories: {}",
            VALID_BOOK_CATEGORIES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_are_accepted() {
        for category in VALID_BOOK_CATEGORIES {
            assert!(validate_book_category(category).is_ok());
        }
    }

    #[test]
    fn unknown_category_lists_valid_values() {
        let err = validate_book_category("novel").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("novel"));
        assert!(msg.contains("e_book"));
    }

    #[test]
    fn category_match_is_case_sensitive() {
        assert!(validate_book_category("E_BOOK").is_err());
    }
}
