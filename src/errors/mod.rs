//! Domain-specific error types for promptdeck
//!
//! Structured error types for the different domains in the application,
//! keeping error handling consistent between the service layer and the
//! HTTP handlers that translate them into status codes.
//!
//! # Error Categories
//!
//! - **AttachmentError**: attachment graph operations (self-edges, duplicates, cycles)
//! - **FavoriteError**: favorite set ownership, naming, and ordering
//! - **PromptError**: prompt CRUD and search
//! - **TagError**: tag CRUD and name normalization

pub mod attachment;
pub mod favorite;
pub mod prompt;
pub mod tag;

// Re-export all error types
pub use attachment::AttachmentError;
pub use favorite::FavoriteError;
pub use prompt::PromptError;
pub use tag::TagError;

/// Result type alias for attachment graph operations
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Result type alias for favorite set operations
pub type FavoriteResult<T> = Result<T, FavoriteError>;

/// Result type alias for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;

/// Result type alias for tag operations
pub type TagResult<T> = Result<T, TagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_result_alias() {
        let result: AttachmentResult<i32> = Err(AttachmentError::SelfAttachment(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_favorite_result_alias() {
        let result: FavoriteResult<()> = Err(FavoriteError::NotFound(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_result_alias() {
        let result: PromptResult<()> = Err(PromptError::NotFound(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_tag_result_alias() {
        let result: TagResult<()> = Err(TagError::NotFound(1));
        assert!(result.is_err());
    }
}
