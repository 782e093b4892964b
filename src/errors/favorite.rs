//! Favorite-set error types

use thiserror::Error;

/// Errors raised by favorite set operations
#[derive(Error, Debug)]
pub enum FavoriteError {
    /// Favorite set not found by ID
    #[error("Favorite set {0} not found")]
    NotFound(i32),

    /// Name collision for the same user (case-insensitive)
    #[error("A favorite set named '{0}' already exists for this user")]
    DuplicateName(String),

    /// Favorite set belongs to a different user
    #[error("Favorite set {favorite_id} does not belong to user {user_id}")]
    Forbidden {
        /// Requesting user id
        user_id: i32,
        /// Targeted favorite set id
        favorite_id: i32,
    },

    /// Referenced prompt does not exist
    #[error("Prompt {0} not found")]
    PromptNotFound(i32),

    /// Validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl FavoriteError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FavoriteError::DuplicateName(_) | FavoriteError::Validation(_)
        )
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FavoriteError::NotFound(_) | FavoriteError::PromptNotFound(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            FavoriteError::NotFound(_) | FavoriteError::PromptNotFound(_) => "NOT_FOUND",
            FavoriteError::DuplicateName(_) => "CONFLICT",
            FavoriteError::Forbidden { .. } => "FORBIDDEN",
            FavoriteError::Validation(_) => "VALIDATION_FAILED",
            FavoriteError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name() {
        let err = FavoriteError::DuplicateName("Standup".to_string());
        assert_eq!(
            err.to_string(),
            "A favorite set named 'Standup' already exists for this user"
        );
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_forbidden() {
        let err = FavoriteError::Forbidden {
            user_id: 7,
            favorite_id: 3,
        };
        assert_eq!(
            err.to_string(),
            "Favorite set 3 does not belong to user 7"
        );
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_not_found() {
        let err = FavoriteError::NotFound(9);
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
