use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::database::entities::{prompt_tags, prompts, tags};
use crate::errors::{PromptError, PromptResult};
use crate::services::ValidationService;

/// Service layer for prompt CRUD, search, and manual ordering
#[derive(Clone)]
pub struct PromptService {
    db: DatabaseConnection,
}

impl PromptService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new prompt, appended at the end of the display order
    pub async fn create_prompt(
        &self,
        title: &str,
        content: &str,
        description: Option<&str>,
    ) -> PromptResult<prompts::Model> {
        let validated_title = ValidationService::validate_prompt_title(title)
            .map_err(|e| PromptError::Validation(e.to_string()))?;
        let validated_content = ValidationService::validate_prompt_content(content)
            .map_err(|e| PromptError::Validation(e.to_string()))?;
        let validated_description = match description {
            Some(desc) => Some(
                ValidationService::validate_prompt_description(desc)
                    .map_err(|e| PromptError::Validation(e.to_string()))?,
            ),
            None => None,
        };

        let next_order = prompts::Entity::find()
            .order_by_desc(prompts::Column::DisplayOrder)
            .one(&self.db)
            .await?
            .map(|p| p.display_order + 1)
            .unwrap_or(0);

        let now = Utc::now();
        let prompt = prompts::ActiveModel {
            title: Set(validated_title),
            content: Set(validated_content),
            description: Set(validated_description),
            is_active: Set(true),
            display_order: Set(next_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let prompt = prompt.insert(&self.db).await?;
        debug!(prompt_id = prompt.id, "Created prompt");
        Ok(prompt)
    }

    /// Update title/content/description if provided
    pub async fn update_prompt(
        &self,
        prompt_id: i32,
        title: Option<&str>,
        content: Option<&str>,
        description: Option<&str>,
    ) -> PromptResult<prompts::Model> {
        let prompt = self.find_prompt(prompt_id).await?;
        let mut active: prompts::ActiveModel = prompt.into();

        if let Some(title) = title {
            let validated = ValidationService::validate_prompt_title(title)
                .map_err(|e| PromptError::Validation(e.to_string()))?;
            active.title = Set(validated);
        }

        if let Some(content) = content {
            let validated = ValidationService::validate_prompt_content(content)
                .map_err(|e| PromptError::Validation(e.to_string()))?;
            active.content = Set(validated);
        }

        if let Some(description) = description {
            let validated = ValidationService::validate_prompt_description(description)
                .map_err(|e| PromptError::Validation(e.to_string()))?;
            active.description = Set(Some(validated));
        }

        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    /// Get a prompt by id
    pub async fn get_prompt(&self, prompt_id: i32) -> PromptResult<prompts::Model> {
        self.find_prompt(prompt_id).await
    }

    /// Get a prompt with its tags
    pub async fn get_prompt_with_tags(
        &self,
        prompt_id: i32,
    ) -> PromptResult<(prompts::Model, Vec<tags::Model>)> {
        let prompt = self.find_prompt(prompt_id).await?;

        let tags = tags::Entity::find()
            .inner_join(prompt_tags::Entity)
            .filter(prompt_tags::Column::PromptId.eq(prompt_id))
            .all(&self.db)
            .await?;

        Ok((prompt, tags))
    }

    /// List prompts ordered by display order. `include_inactive` controls
    /// whether soft-deleted prompts show up.
    pub async fn list_prompts(&self, include_inactive: bool) -> PromptResult<Vec<prompts::Model>> {
        let mut query = prompts::Entity::find().order_by_asc(prompts::Column::DisplayOrder);

        if !include_inactive {
            query = query.filter(prompts::Column::IsActive.eq(true));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Case-insensitive substring search over title and content of active
    /// prompts, optionally restricted to prompts carrying a given tag.
    pub async fn search_prompts(
        &self,
        search: &str,
        tag_id: Option<i32>,
    ) -> PromptResult<Vec<prompts::Model>> {
        let mut query = prompts::Entity::find()
            .filter(prompts::Column::IsActive.eq(true))
            .order_by_asc(prompts::Column::DisplayOrder);

        let trimmed = search.trim();
        if !trimmed.is_empty() {
            let pattern = format!("%{}%", trimmed);
            query = query.filter(
                Condition::any()
                    .add(prompts::Column::Title.like(pattern.clone()))
                    .add(prompts::Column::Content.like(pattern)),
            );
        }

        if let Some(tag_id) = tag_id {
            let tagged_ids: Vec<i32> = prompt_tags::Entity::find()
                .filter(prompt_tags::Column::TagId.eq(tag_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|link| link.prompt_id)
                .collect();
            query = query.filter(prompts::Column::Id.is_in(tagged_ids));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Soft-delete: flip the active flag, keep the row and its relations
    pub async fn deactivate_prompt(&self, prompt_id: i32) -> PromptResult<prompts::Model> {
        self.set_active(prompt_id, false).await
    }

    /// Undo a soft-delete
    pub async fn restore_prompt(&self, prompt_id: i32) -> PromptResult<prompts::Model> {
        self.set_active(prompt_id, true).await
    }

    /// Hard-delete: physically remove the row. Attachment edges, tag links,
    /// and favorite items cascade at the storage layer.
    pub async fn delete_prompt(&self, prompt_id: i32) -> PromptResult<()> {
        let result = prompts::Entity::delete_by_id(prompt_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(PromptError::NotFound(prompt_id));
        }

        debug!(prompt_id, "Hard-deleted prompt");
        Ok(())
    }

    /// Rewrite display order from a full `(prompt_id, display_order)` list
    /// in one transaction; used by drag-and-drop reordering.
    pub async fn reorder_prompts(&self, ordered_pairs: &[(i32, i32)]) -> PromptResult<()> {
        let txn = self.db.begin().await?;

        for (prompt_id, display_order) in ordered_pairs {
            let Some(prompt) = prompts::Entity::find_by_id(*prompt_id).one(&txn).await? else {
                debug!(prompt_id, "Reorder pair without prompt ignored");
                continue;
            };

            let mut active: prompts::ActiveModel = prompt.into();
            active.display_order = Set(*display_order);
            active.updated_at = Set(Utc::now());
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Replace a prompt's tag links with the given set. Link order carries
    /// no meaning, so a full replace is safe and simple.
    pub async fn set_tags(&self, prompt_id: i32, tag_ids: &[i32]) -> PromptResult<()> {
        self.find_prompt(prompt_id).await?;

        let unique: HashSet<i32> = tag_ids.iter().copied().collect();
        let found: HashSet<i32> = tags::Entity::find()
            .filter(tags::Column::Id.is_in(unique.iter().copied().collect::<Vec<_>>()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        for id in &unique {
            if !found.contains(id) {
                return Err(PromptError::TagNotFound(*id));
            }
        }

        let txn = self.db.begin().await?;

        prompt_tags::Entity::delete_many()
            .filter(prompt_tags::Column::PromptId.eq(prompt_id))
            .exec(&txn)
            .await?;

        for tag_id in unique {
            let link = prompt_tags::ActiveModel {
                prompt_id: Set(prompt_id),
                tag_id: Set(tag_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn set_active(&self, prompt_id: i32, is_active: bool) -> PromptResult<prompts::Model> {
        let prompt = self.find_prompt(prompt_id).await?;
        let mut active: prompts::ActiveModel = prompt.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn find_prompt(&self, prompt_id: i32) -> PromptResult<prompts::Model> {
        prompts::Entity::find_by_id(prompt_id)
            .one(&self.db)
            .await?
            .ok_or(PromptError::NotFound(prompt_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::TagService;

    #[tokio::test]
    async fn test_create_and_get() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let created = service
            .create_prompt("  Greeting  ", "Hello!", Some("Opening line"))
            .await
            .unwrap();
        assert_eq!(created.title, "Greeting");
        assert!(created.is_active);
        assert_eq!(created.display_order, 0);

        let fetched = service.get_prompt(created.id).await.unwrap();
        assert_eq!(fetched.content, "Hello!");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let err = service.create_prompt("  ", "content", None).await.unwrap_err();
        assert!(matches!(err, PromptError::Validation(_)));
    }

    #[tokio::test]
    async fn test_display_order_appends() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let a = service.create_prompt("A", "a", None).await.unwrap();
        let b = service.create_prompt("B", "b", None).await.unwrap();
        assert_eq!(a.display_order, 0);
        assert_eq!(b.display_order, 1);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let prompt = service.create_prompt("A", "a", None).await.unwrap();
        service.deactivate_prompt(prompt.id).await.unwrap();

        assert!(service.list_prompts(false).await.unwrap().is_empty());
        assert_eq!(service.list_prompts(true).await.unwrap().len(), 1);

        service.restore_prompt(prompt.id).await.unwrap();
        assert_eq!(service.list_prompts(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_hard_delete() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let prompt = service.create_prompt("A", "a", None).await.unwrap();
        service.delete_prompt(prompt.id).await.unwrap();

        let err = service.get_prompt(prompt.id).await.unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));

        let err = service.delete_prompt(prompt.id).await.unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reorder_prompts() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let a = service.create_prompt("A", "a", None).await.unwrap();
        let b = service.create_prompt("B", "b", None).await.unwrap();

        service.reorder_prompts(&[(a.id, 1), (b.id, 0)]).await.unwrap();

        let listed = service.list_prompts(false).await.unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[tokio::test]
    async fn test_search_by_text_and_tag() {
        let db = setup_test_db().await;
        let service = PromptService::new(db.clone());
        let tag_service = TagService::new(db);

        let hello = service.create_prompt("Hello", "greeting text", None).await.unwrap();
        let bye = service.create_prompt("Bye", "farewell text", None).await.unwrap();

        let tag = tag_service.create_tag("intro", "#112233").await.unwrap();
        service.set_tags(hello.id, &[tag.id]).await.unwrap();

        let results = service.search_prompts("text", None).await.unwrap();
        assert_eq!(results.len(), 2);

        let results = service.search_prompts("text", Some(tag.id)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, hello.id);

        let results = service.search_prompts("farewell", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, bye.id);
    }

    #[tokio::test]
    async fn test_set_tags_replaces_links() {
        let db = setup_test_db().await;
        let service = PromptService::new(db.clone());
        let tag_service = TagService::new(db);

        let prompt = service.create_prompt("A", "a", None).await.unwrap();
        let t1 = tag_service.create_tag("one", "#111111").await.unwrap();
        let t2 = tag_service.create_tag("two", "#222222").await.unwrap();

        service.set_tags(prompt.id, &[t1.id]).await.unwrap();
        service.set_tags(prompt.id, &[t2.id]).await.unwrap();

        let (_, tags) = service.get_prompt_with_tags(prompt.id).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, t2.id);
    }

    #[tokio::test]
    async fn test_set_tags_unknown_tag_rejected() {
        let db = setup_test_db().await;
        let service = PromptService::new(db);

        let prompt = service.create_prompt("A", "a", None).await.unwrap();
        let err = service.set_tags(prompt.id, &[9999]).await.unwrap_err();
        assert!(matches!(err, PromptError::TagNotFound(9999)));
    }
}
