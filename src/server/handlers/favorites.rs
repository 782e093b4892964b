use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::services::FavoriteSetView;

use super::{favorite_error, ErrorResponse};

#[derive(Deserialize)]
pub struct CreateFavoriteRequest {
    pub name: String,
    pub description: Option<String>,
    pub prompt_ids: Vec<i32>,
}

#[derive(Deserialize)]
pub struct UpdateFavoriteRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prompt_ids: Option<Vec<i32>>,
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<FavoriteSetView>>, ErrorResponse> {
    let sets = state
        .favorites
        .list_for_user(user_id)
        .await
        .map_err(favorite_error)?;
    Ok(Json(sets))
}

pub async fn create_favorite(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<CreateFavoriteRequest>,
) -> Result<Json<FavoriteSetView>, ErrorResponse> {
    let set = state
        .favorites
        .create(
            user_id,
            &payload.name,
            payload.description.as_deref(),
            &payload.prompt_ids,
        )
        .await
        .map_err(favorite_error)?;
    Ok(Json(set))
}

pub async fn get_favorite(
    State(state): State<AppState>,
    Path((user_id, favorite_id)): Path<(i32, i32)>,
) -> Result<Json<FavoriteSetView>, ErrorResponse> {
    let set = state
        .favorites
        .get_with_items(user_id, favorite_id)
        .await
        .map_err(favorite_error)?;
    Ok(Json(set))
}

pub async fn update_favorite(
    State(state): State<AppState>,
    Path((user_id, favorite_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateFavoriteRequest>,
) -> Result<Json<FavoriteSetView>, ErrorResponse> {
    let set = state
        .favorites
        .update(
            user_id,
            favorite_id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.prompt_ids.as_deref(),
        )
        .await
        .map_err(favorite_error)?;
    Ok(Json(set))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    Path((user_id, favorite_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ErrorResponse> {
    state
        .favorites
        .delete(user_id, favorite_id)
        .await
        .map_err(favorite_error)?;
    Ok(StatusCode::NO_CONTENT)
}
