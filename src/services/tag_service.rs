use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::database::entities::tags;
use crate::errors::{TagError, TagResult};
use crate::services::ValidationService;

/// Service layer for tag CRUD. Names are normalized (trimmed, lowercased)
/// so uniqueness is effectively case-insensitive.
#[derive(Clone)]
pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_tag(&self, name: &str, color: &str) -> TagResult<tags::Model> {
        let normalized = ValidationService::validate_tag_name(name)
            .map_err(|e| TagError::Validation(e.to_string()))?;
        let color = ValidationService::validate_tag_color(color)
            .map_err(|e| TagError::Validation(e.to_string()))?;

        if self.find_by_name(&normalized).await?.is_some() {
            return Err(TagError::DuplicateName(normalized));
        }

        let tag = tags::ActiveModel {
            name: Set(normalized),
            color: Set(color),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let tag = tag.insert(&self.db).await?;
        debug!(tag_id = tag.id, name = %tag.name, "Created tag");
        Ok(tag)
    }

    /// Look up by normalized name, creating with the default color if absent
    pub async fn find_or_create(&self, name: &str) -> TagResult<tags::Model> {
        let normalized = ValidationService::validate_tag_name(name)
            .map_err(|e| TagError::Validation(e.to_string()))?;

        if let Some(tag) = self.find_by_name(&normalized).await? {
            return Ok(tag);
        }

        let tag = tags::ActiveModel {
            name: Set(normalized),
            ..tags::ActiveModel::new()
        };
        Ok(tag.insert(&self.db).await?)
    }

    pub async fn update_tag(
        &self,
        tag_id: i32,
        name: Option<&str>,
        color: Option<&str>,
    ) -> TagResult<tags::Model> {
        let tag = tags::Entity::find_by_id(tag_id)
            .one(&self.db)
            .await?
            .ok_or(TagError::NotFound(tag_id))?;

        let mut active: tags::ActiveModel = tag.clone().into();

        if let Some(name) = name {
            let normalized = ValidationService::validate_tag_name(name)
                .map_err(|e| TagError::Validation(e.to_string()))?;
            if normalized != tag.name {
                if self.find_by_name(&normalized).await?.is_some() {
                    return Err(TagError::DuplicateName(normalized));
                }
                active.name = Set(normalized);
            }
        }

        if let Some(color) = color {
            let color = ValidationService::validate_tag_color(color)
                .map_err(|e| TagError::Validation(e.to_string()))?;
            active.color = Set(color);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Delete a tag; prompt links cascade at the storage layer
    pub async fn delete_tag(&self, tag_id: i32) -> TagResult<()> {
        let result = tags::Entity::delete_by_id(tag_id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(TagError::NotFound(tag_id));
        }

        Ok(())
    }

    pub async fn list_tags(&self) -> TagResult<Vec<tags::Model>> {
        Ok(tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn find_by_name(&self, normalized: &str) -> TagResult<Option<tags::Model>> {
        Ok(tags::Entity::find()
            .filter(tags::Column::Name.eq(normalized))
            .one(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_normalizes_name() {
        let db = setup_test_db().await;
        let service = TagService::new(db);

        let tag = service.create_tag("  Drafting ", "#AABBCC").await.unwrap();
        assert_eq!(tag.name, "drafting");
        assert_eq!(tag.color, "#aabbcc");
    }

    #[tokio::test]
    async fn test_duplicate_name_case_insensitive() {
        let db = setup_test_db().await;
        let service = TagService::new(db);

        service.create_tag("drafting", "#111111").await.unwrap();
        let err = service.create_tag("DRAFTING", "#222222").await.unwrap_err();
        assert!(matches!(err, TagError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_find_or_create() {
        let db = setup_test_db().await;
        let service = TagService::new(db);

        let first = service.find_or_create("review").await.unwrap();
        let second = service.find_or_create("Review").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_invalid_color_rejected() {
        let db = setup_test_db().await;
        let service = TagService::new(db);

        let err = service.create_tag("ok", "blue").await.unwrap_err();
        assert!(matches!(err, TagError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_test_db().await;
        let service = TagService::new(db);

        let tag = service.create_tag("old", "#111111").await.unwrap();
        let updated = service
            .update_tag(tag.id, Some("new"), Some("#222222"))
            .await
            .unwrap();
        assert_eq!(updated.name, "new");
        assert_eq!(updated.color, "#222222");

        service.delete_tag(tag.id).await.unwrap();
        let err = service.delete_tag(tag.id).await.unwrap_err();
        assert!(matches!(err, TagError::NotFound(_)));
    }
}
