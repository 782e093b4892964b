use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::{prompts, tags};
use crate::server::app::AppState;

use super::{prompt_error, ErrorResponse};

#[derive(Deserialize)]
pub struct CreatePromptRequest {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePromptRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListPromptsQuery {
    pub search: Option<String>,
    pub tag_id: Option<i32>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub pairs: Vec<OrderPair>,
}

#[derive(Deserialize)]
pub struct OrderPair {
    pub prompt_id: i32,
    pub display_order: i32,
}

#[derive(Deserialize)]
pub struct SetTagsRequest {
    pub tag_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct PromptWithTags {
    #[serde(flatten)]
    pub prompt: prompts::Model,
    pub tags: Vec<tags::Model>,
}

pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<ListPromptsQuery>,
) -> Result<Json<Vec<prompts::Model>>, ErrorResponse> {
    let results = match query.search {
        Some(search) if !search.trim().is_empty() || query.tag_id.is_some() => state
            .prompts
            .search_prompts(&search, query.tag_id)
            .await
            .map_err(prompt_error)?,
        _ if query.tag_id.is_some() => state
            .prompts
            .search_prompts("", query.tag_id)
            .await
            .map_err(prompt_error)?,
        _ => state
            .prompts
            .list_prompts(query.include_inactive)
            .await
            .map_err(prompt_error)?,
    };

    Ok(Json(results))
}

pub async fn create_prompt(
    State(state): State<AppState>,
    Json(payload): Json<CreatePromptRequest>,
) -> Result<Json<prompts::Model>, ErrorResponse> {
    let prompt = state
        .prompts
        .create_prompt(
            &payload.title,
            &payload.content,
            payload.description.as_deref(),
        )
        .await
        .map_err(prompt_error)?;

    Ok(Json(prompt))
}

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PromptWithTags>, ErrorResponse> {
    let (prompt, tags) = state
        .prompts
        .get_prompt_with_tags(id)
        .await
        .map_err(prompt_error)?;

    Ok(Json(PromptWithTags { prompt, tags }))
}

pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePromptRequest>,
) -> Result<Json<prompts::Model>, ErrorResponse> {
    let prompt = state
        .prompts
        .update_prompt(
            id,
            payload.title.as_deref(),
            payload.content.as_deref(),
            payload.description.as_deref(),
        )
        .await
        .map_err(prompt_error)?;

    Ok(Json(prompt))
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ErrorResponse> {
    state.prompts.delete_prompt(id).await.map_err(prompt_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deactivate_prompt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<prompts::Model>, ErrorResponse> {
    let prompt = state
        .prompts
        .deactivate_prompt(id)
        .await
        .map_err(prompt_error)?;
    Ok(Json(prompt))
}

pub async fn restore_prompt(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<prompts::Model>, ErrorResponse> {
    let prompt = state
        .prompts
        .restore_prompt(id)
        .await
        .map_err(prompt_error)?;
    Ok(Json(prompt))
}

pub async fn reorder_prompts(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> Result<StatusCode, ErrorResponse> {
    let pairs: Vec<(i32, i32)> = payload
        .pairs
        .iter()
        .map(|p| (p.prompt_id, p.display_order))
        .collect();

    state
        .prompts
        .reorder_prompts(&pairs)
        .await
        .map_err(prompt_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_prompt_tags(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SetTagsRequest>,
) -> Result<StatusCode, ErrorResponse> {
    state
        .prompts
        .set_tags(id, &payload.tag_ids)
        .await
        .map_err(prompt_error)?;

    Ok(StatusCode::NO_CONTENT)
}
