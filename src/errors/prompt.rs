//! Prompt error types

use thiserror::Error;

/// Errors raised by prompt CRUD operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// Prompt not found by ID
    #[error("Prompt {0} not found")]
    NotFound(i32),

    /// Referenced tag does not exist
    #[error("Tag {0} not found")]
    TagNotFound(i32),

    /// Validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl PromptError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(self, PromptError::Validation(_))
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, PromptError::NotFound(_) | PromptError::TagNotFound(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PromptError::NotFound(_) | PromptError::TagNotFound(_) => "NOT_FOUND",
            PromptError::Validation(_) => "VALIDATION_FAILED",
            PromptError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = PromptError::NotFound(11);
        assert_eq!(err.to_string(), "Prompt 11 not found");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_validation() {
        let err = PromptError::Validation("Title cannot be empty".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
