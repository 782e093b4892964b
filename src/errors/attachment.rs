//! Attachment-graph error types
//!
//! Structured errors for the directed "attached prompts" relation:
//! self-edges, duplicate edges, cycles, and the per-prompt cap.

use thiserror::Error;

/// Errors raised by attachment graph operations
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// A prompt cannot be attached to itself
    #[error("Prompt {0} cannot be attached to itself")]
    SelfAttachment(i32),

    /// The edge already exists
    #[error("Prompt {attached} is already attached to prompt {main}")]
    AlreadyExists {
        /// Main prompt id
        main: i32,
        /// Attached prompt id
        attached: i32,
    },

    /// The new edge would close a cycle
    #[error("Attachment would create a cycle: {0}")]
    CycleDetected(String),

    /// Per-prompt attachment cap reached
    #[error("Prompt {main} already has the maximum of {limit} attachments")]
    LimitExceeded {
        /// Main prompt id
        main: i32,
        /// Configured cap
        limit: usize,
    },

    /// Referenced prompt does not exist
    #[error("Prompt {0} not found")]
    PromptNotFound(i32),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AttachmentError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AttachmentError::SelfAttachment(_)
                | AttachmentError::AlreadyExists { .. }
                | AttachmentError::CycleDetected(_)
                | AttachmentError::LimitExceeded { .. }
        )
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, AttachmentError::PromptNotFound(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AttachmentError::SelfAttachment(_) => "SELF_ATTACHMENT",
            AttachmentError::AlreadyExists { .. } => "CONFLICT",
            AttachmentError::CycleDetected(_) => "CYCLE_DETECTED",
            AttachmentError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            AttachmentError::PromptNotFound(_) => "NOT_FOUND",
            AttachmentError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_attachment() {
        let err = AttachmentError::SelfAttachment(4);
        assert_eq!(err.to_string(), "Prompt 4 cannot be attached to itself");
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "SELF_ATTACHMENT");
    }

    #[test]
    fn test_already_exists() {
        let err = AttachmentError::AlreadyExists { main: 1, attached: 2 };
        assert_eq!(
            err.to_string(),
            "Prompt 2 is already attached to prompt 1"
        );
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_cycle_detected() {
        let err = AttachmentError::CycleDetected("3 -> 1 -> 2 -> 3".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "CYCLE_DETECTED");
    }

    #[test]
    fn test_not_found() {
        let err = AttachmentError::PromptNotFound(42);
        assert_eq!(err.to_string(), "Prompt 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
