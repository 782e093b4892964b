use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::database::entities::tags;
use crate::server::app::AppState;

use super::{tag_error, ErrorResponse};

#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: String,
}

#[derive(Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<tags::Model>>, ErrorResponse> {
    let tags = state.tags.list_tags().await.map_err(tag_error)?;
    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<Json<tags::Model>, ErrorResponse> {
    let tag = state
        .tags
        .create_tag(&payload.name, &payload.color)
        .await
        .map_err(tag_error)?;
    Ok(Json(tag))
}

pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTagRequest>,
) -> Result<Json<tags::Model>, ErrorResponse> {
    let tag = state
        .tags
        .update_tag(id, payload.name.as_deref(), payload.color.as_deref())
        .await
        .map_err(tag_error)?;
    Ok(Json(tag))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ErrorResponse> {
    state.tags.delete_tag(id).await.map_err(tag_error)?;
    Ok(StatusCode::NO_CONTENT)
}
