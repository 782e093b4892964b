use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::database::entities::prompts;
use crate::server::app::AppState;
use crate::services::{AttachedPromptView, AttachmentRuleViolation, PopularCombination};

use super::{attachment_error, ErrorResponse};

#[derive(Deserialize)]
pub struct AttachRequest {
    pub attached_prompt_id: i32,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub pairs: Vec<OrderPair>,
}

#[derive(Deserialize)]
pub struct OrderPair {
    pub attached_prompt_id: i32,
    pub position: i32,
}

#[derive(Deserialize)]
pub struct AvailableQuery {
    pub search: Option<String>,
    /// Comma-separated prompt ids to exclude on top of what is attached
    pub exclude: Option<String>,
}

#[derive(Deserialize)]
pub struct PopularQuery {
    pub limit: Option<usize>,
}

pub async fn list_attached(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<AttachedPromptView>>, ErrorResponse> {
    let edges = state
        .attachments
        .list_attached(id)
        .await
        .map_err(attachment_error)?;
    Ok(Json(edges))
}

pub async fn attach(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AttachRequest>,
) -> Result<Json<AttachedPromptView>, ErrorResponse> {
    let edge = state
        .attachments
        .attach(id, payload.attached_prompt_id)
        .await
        .map_err(attachment_error)?;
    Ok(Json(edge))
}

pub async fn detach(
    State(state): State<AppState>,
    Path((id, attached_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ErrorResponse> {
    state
        .attachments
        .detach(id, attached_id)
        .await
        .map_err(attachment_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReorderRequest>,
) -> Result<StatusCode, ErrorResponse> {
    let pairs: Vec<(i32, i32)> = payload
        .pairs
        .iter()
        .map(|p| (p.attached_prompt_id, p.position))
        .collect();

    state
        .attachments
        .reorder(id, &pairs)
        .await
        .map_err(attachment_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_available(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Vec<prompts::Model>>, ErrorResponse> {
    let exclude_ids: Vec<i32> = query
        .exclude
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let available = state
        .attachments
        .list_available_for_attachment(id, &exclude_ids, query.search.as_deref())
        .await
        .map_err(attachment_error)?;

    Ok(Json(available))
}

pub async fn validate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AttachRequest>,
) -> Result<Json<Vec<AttachmentRuleViolation>>, ErrorResponse> {
    let violations = state
        .attachments
        .validate(id, payload.attached_prompt_id)
        .await
        .map_err(attachment_error)?;
    Ok(Json(violations))
}

pub async fn popular(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<PopularCombination>>, ErrorResponse> {
    let popular = state
        .attachments
        .popular_combinations(query.limit.unwrap_or(10))
        .await
        .map_err(attachment_error)?;
    Ok(Json(popular))
}

/// Fire-and-forget usage signal; always answers 204 so the client's copy
/// action is never blocked on it.
pub async fn increment_usage(
    State(state): State<AppState>,
    Path((id, attached_id)): Path<(i32, i32)>,
) -> StatusCode {
    state.attachments.increment_usage(id, attached_id).await;
    StatusCode::NO_CONTENT
}
