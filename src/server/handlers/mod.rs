pub mod attachments;
pub mod favorites;
pub mod health;
pub mod prompts;
pub mod tags;

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::errors::{AttachmentError, FavoriteError, PromptError, TagError};

/// Error body shared by all handlers
pub(crate) type ErrorResponse = (StatusCode, Json<Value>);

fn error_response(code: &'static str, message: String) -> ErrorResponse {
    let status = match code {
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        "FORBIDDEN" => StatusCode::FORBIDDEN,
        "CONFLICT" => StatusCode::CONFLICT,
        "SELF_ATTACHMENT" | "CYCLE_DETECTED" | "LIMIT_EXCEEDED" | "VALIDATION_FAILED" => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "code": code, "error": message })))
}

pub(crate) fn attachment_error(err: AttachmentError) -> ErrorResponse {
    error_response(err.error_code(), err.to_string())
}

pub(crate) fn favorite_error(err: FavoriteError) -> ErrorResponse {
    error_response(err.error_code(), err.to_string())
}

pub(crate) fn prompt_error(err: PromptError) -> ErrorResponse {
    error_response(err.error_code(), err.to_string())
}

pub(crate) fn tag_error(err: TagError) -> ErrorResponse {
    error_response(err.error_code(), err.to_string())
}
