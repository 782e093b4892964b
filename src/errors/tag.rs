//! Tag error types

use thiserror::Error;

/// Errors raised by tag operations
#[derive(Error, Debug)]
pub enum TagError {
    /// Tag not found by ID
    #[error("Tag {0} not found")]
    NotFound(i32),

    /// Tag name collision (names are unique, case-normalized)
    #[error("Tag '{0}' already exists")]
    DuplicateName(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl TagError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(self, TagError::DuplicateName(_) | TagError::Validation(_))
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, TagError::NotFound(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TagError::NotFound(_) => "NOT_FOUND",
            TagError::DuplicateName(_) => "CONFLICT",
            TagError::Validation(_) => "VALIDATION_FAILED",
            TagError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name() {
        let err = TagError::DuplicateName("drafting".to_string());
        assert_eq!(err.to_string(), "Tag 'drafting' already exists");
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
