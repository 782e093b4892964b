use anyhow::{anyhow, Result};
use axum::{
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::services::{AttachmentService, FavoriteService, PromptService, TagService};

use super::handlers::{attachments, favorites, health, prompts, tags};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub prompts: PromptService,
    pub tags: TagService,
    pub attachments: AttachmentService,
    pub favorites: FavoriteService,
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState {
        prompts: PromptService::new(db.clone()),
        tags: TagService::new(db.clone()),
        attachments: AttachmentService::new(db.clone()),
        favorites: FavoriteService::new(db.clone()),
        db,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // Prompt CRUD and ordering
        .route(
            "/api/v1/prompts",
            get(prompts::list_prompts).post(prompts::create_prompt),
        )
        .route("/api/v1/prompts/order", put(prompts::reorder_prompts))
        .route(
            "/api/v1/prompts/:id",
            get(prompts::get_prompt)
                .put(prompts::update_prompt)
                .delete(prompts::delete_prompt),
        )
        .route("/api/v1/prompts/:id/deactivate", post(prompts::deactivate_prompt))
        .route("/api/v1/prompts/:id/restore", post(prompts::restore_prompt))
        .route("/api/v1/prompts/:id/tags", put(prompts::set_prompt_tags))
        // Tags
        .route("/api/v1/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/api/v1/tags/:id",
            put(tags::update_tag).delete(tags::delete_tag),
        )
        // Attachment graph
        .route(
            "/api/v1/prompts/:id/attachments",
            get(attachments::list_attached).post(attachments::attach),
        )
        .route(
            "/api/v1/prompts/:id/attachments/order",
            put(attachments::reorder),
        )
        .route(
            "/api/v1/prompts/:id/attachments/available",
            get(attachments::list_available),
        )
        .route(
            "/api/v1/prompts/:id/attachments/validate",
            post(attachments::validate),
        )
        .route(
            "/api/v1/prompts/:id/attachments/:attached_id",
            axum::routing::delete(attachments::detach),
        )
        .route(
            "/api/v1/prompts/:id/attachments/:attached_id/usage",
            post(attachments::increment_usage),
        )
        .route("/api/v1/attachments/popular", get(attachments::popular))
        // Favorite sets
        .route(
            "/api/v1/users/:user_id/favorites",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route(
            "/api/v1/users/:user_id/favorites/:favorite_id",
            get(favorites::get_favorite)
                .put(favorites::update_favorite)
                .delete(favorites::delete_favorite),
        )
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}
