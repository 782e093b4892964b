use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use crate::database::entities::{favorite_set_items, favorite_sets, prompts};
use crate::errors::{FavoriteError, FavoriteResult};
use crate::services::ValidationService;

/// One favorite set with its items in stored order
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteSetView {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<FavoriteSetItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteSetItemView {
    pub prompt_id: i32,
    pub position: i32,
}

/// Service layer for user-owned, ordered favorite sets.
///
/// Item positions always mirror the caller-supplied sequence: creation
/// inserts items at their list index and updates replace the whole item
/// list rather than diffing it, so a re-applied favorite reproduces the
/// exact saved order.
#[derive(Clone)]
pub struct FavoriteService {
    db: DatabaseConnection,
}

impl FavoriteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a favorite set from an ordered prompt selection
    pub async fn create(
        &self,
        user_id: i32,
        name: &str,
        description: Option<&str>,
        prompt_ids: &[i32],
    ) -> FavoriteResult<FavoriteSetView> {
        let validated_name = ValidationService::validate_favorite_name(name)
            .map_err(|e| FavoriteError::Validation(e.to_string()))?;

        if prompt_ids.is_empty() {
            return Err(FavoriteError::Validation(
                "A favorite set needs at least one prompt".to_string(),
            ));
        }

        self.check_prompts_exist(prompt_ids).await?;
        self.check_name_available(user_id, &validated_name, None)
            .await?;

        let txn = self.db.begin().await?;

        let set = favorite_sets::ActiveModel {
            user_id: Set(user_id),
            name: Set(validated_name),
            description: Set(description.map(str::to_string)),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let set = set.insert(&txn).await?;

        for (index, prompt_id) in prompt_ids.iter().enumerate() {
            let item = favorite_set_items::ActiveModel {
                favorite_set_id: Set(set.id),
                prompt_id: Set(*prompt_id),
                position: Set(index as i32),
                ..Default::default()
            };
            item.insert(&txn).await?;
        }

        txn.commit().await?;
        debug!(user_id, favorite_id = set.id, "Created favorite set");

        self.get_with_items(user_id, set.id).await
    }

    /// Update name, description, and/or the full item list.
    ///
    /// A supplied item list replaces the stored one wholesale inside a
    /// single transaction: delete all items, reinsert in the given order.
    pub async fn update(
        &self,
        user_id: i32,
        favorite_id: i32,
        name: Option<&str>,
        description: Option<&str>,
        prompt_ids: Option<&[i32]>,
    ) -> FavoriteResult<FavoriteSetView> {
        let set = self.find_owned(user_id, favorite_id).await?;

        let validated_name = match name {
            Some(name) => {
                let validated = ValidationService::validate_favorite_name(name)
                    .map_err(|e| FavoriteError::Validation(e.to_string()))?;
                if !validated.eq_ignore_ascii_case(&set.name) {
                    self.check_name_available(user_id, &validated, Some(favorite_id))
                        .await?;
                }
                Some(validated)
            }
            None => None,
        };

        if let Some(ids) = prompt_ids {
            if ids.is_empty() {
                return Err(FavoriteError::Validation(
                    "A favorite set needs at least one prompt".to_string(),
                ));
            }
            self.check_prompts_exist(ids).await?;
        }

        let txn = self.db.begin().await?;

        let mut active: favorite_sets::ActiveModel = set.into();
        if let Some(name) = validated_name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(Some(description.to_string()));
        }
        active.update(&txn).await?;

        if let Some(ids) = prompt_ids {
            favorite_set_items::Entity::delete_many()
                .filter(favorite_set_items::Column::FavoriteSetId.eq(favorite_id))
                .exec(&txn)
                .await?;

            for (index, prompt_id) in ids.iter().enumerate() {
                let item = favorite_set_items::ActiveModel {
                    favorite_set_id: Set(favorite_id),
                    prompt_id: Set(*prompt_id),
                    position: Set(index as i32),
                    ..Default::default()
                };
                item.insert(&txn).await?;
            }
        }

        txn.commit().await?;

        self.get_with_items(user_id, favorite_id).await
    }

    /// Delete a favorite set; items cascade with it
    pub async fn delete(&self, user_id: i32, favorite_id: i32) -> FavoriteResult<()> {
        self.find_owned(user_id, favorite_id).await?;

        favorite_sets::Entity::delete_by_id(favorite_id)
            .exec(&self.db)
            .await?;

        debug!(user_id, favorite_id, "Deleted favorite set");
        Ok(())
    }

    /// All favorite sets for a user, items strictly ordered by position
    pub async fn list_for_user(&self, user_id: i32) -> FavoriteResult<Vec<FavoriteSetView>> {
        let sets = favorite_sets::Entity::find()
            .filter(favorite_sets::Column::UserId.eq(user_id))
            .order_by_asc(favorite_sets::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let set_ids: Vec<i32> = sets.iter().map(|s| s.id).collect();
        let items = favorite_set_items::Entity::find()
            .filter(favorite_set_items::Column::FavoriteSetId.is_in(set_ids))
            .order_by_asc(favorite_set_items::Column::Position)
            .all(&self.db)
            .await?;

        let mut by_set: HashMap<i32, Vec<FavoriteSetItemView>> = HashMap::new();
        for item in items {
            by_set
                .entry(item.favorite_set_id)
                .or_default()
                .push(FavoriteSetItemView {
                    prompt_id: item.prompt_id,
                    position: item.position,
                });
        }

        let views = sets
            .into_iter()
            .map(|set| {
                let items = by_set.remove(&set.id).unwrap_or_default();
                FavoriteSetView {
                    id: set.id,
                    user_id: set.user_id,
                    name: set.name,
                    description: set.description,
                    items,
                }
            })
            .collect();

        Ok(views)
    }

    /// One favorite set with its items in stored order, ownership checked
    pub async fn get_with_items(
        &self,
        user_id: i32,
        favorite_id: i32,
    ) -> FavoriteResult<FavoriteSetView> {
        let set = self.find_owned(user_id, favorite_id).await?;

        let items = favorite_set_items::Entity::find()
            .filter(favorite_set_items::Column::FavoriteSetId.eq(favorite_id))
            .order_by_asc(favorite_set_items::Column::Position)
            .all(&self.db)
            .await?;

        Ok(FavoriteSetView {
            id: set.id,
            user_id: set.user_id,
            name: set.name,
            description: set.description,
            items: items
                .into_iter()
                .map(|item| FavoriteSetItemView {
                    prompt_id: item.prompt_id,
                    position: item.position,
                })
                .collect(),
        })
    }

    async fn find_owned(
        &self,
        user_id: i32,
        favorite_id: i32,
    ) -> FavoriteResult<favorite_sets::Model> {
        let set = favorite_sets::Entity::find_by_id(favorite_id)
            .one(&self.db)
            .await?
            .ok_or(FavoriteError::NotFound(favorite_id))?;

        if set.user_id != user_id {
            return Err(FavoriteError::Forbidden {
                user_id,
                favorite_id,
            });
        }

        Ok(set)
    }

    /// Case-insensitive per-user name check; the DB index only covers the
    /// exact-case collision.
    async fn check_name_available(
        &self,
        user_id: i32,
        name: &str,
        exclude_id: Option<i32>,
    ) -> FavoriteResult<()> {
        let existing = favorite_sets::Entity::find()
            .filter(favorite_sets::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let lowered = name.to_lowercase();
        let collision = existing.iter().any(|set| {
            Some(set.id) != exclude_id && set.name.to_lowercase() == lowered
        });

        if collision {
            return Err(FavoriteError::DuplicateName(name.to_string()));
        }

        Ok(())
    }

    /// Fail fast on any referenced prompt id that does not exist
    async fn check_prompts_exist(&self, prompt_ids: &[i32]) -> FavoriteResult<()> {
        let unique: HashSet<i32> = prompt_ids.iter().copied().collect();

        let found: HashSet<i32> = prompts::Entity::find()
            .filter(prompts::Column::Id.is_in(unique.iter().copied().collect::<Vec<_>>()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        for id in prompt_ids {
            if !found.contains(id) {
                return Err(FavoriteError::PromptNotFound(*id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::users;
    use crate::database::test_utils::setup_test_db;
    use crate::services::PromptService;

    async fn seed_user(db: &DatabaseConnection, email: &str) -> i32 {
        let user = users::ActiveModel {
            email: Set(email.to_string()),
            role: Set("user".to_string()),
            status: Set("active".to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        user.insert(db).await.expect("Failed to seed user").id
    }

    async fn seed_prompts(db: &DatabaseConnection, count: usize) -> Vec<i32> {
        let prompt_service = PromptService::new(db.clone());
        let mut ids = Vec::new();
        for i in 0..count {
            let prompt = prompt_service
                .create_prompt(&format!("Prompt {}", i), "content", None)
                .await
                .expect("Failed to seed prompt");
            ids.push(prompt.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_order_round_trip() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 3).await;
        let service = FavoriteService::new(db);

        // Deliberately not in id order
        let ordered = vec![ids[2], ids[0], ids[1]];
        let created = service
            .create(user_id, "QA Combo", None, &ordered)
            .await
            .unwrap();

        let fetched = service.get_with_items(user_id, created.id).await.unwrap();
        let fetched_ids: Vec<i32> = fetched.items.iter().map(|i| i.prompt_id).collect();
        let positions: Vec<i32> = fetched.items.iter().map(|i| i.position).collect();
        assert_eq!(fetched_ids, ordered);
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_replaces_not_merges() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 3).await;
        let service = FavoriteService::new(db);

        let created = service
            .create(user_id, "Combo", None, &[ids[0], ids[1], ids[2]])
            .await
            .unwrap();

        let updated = service
            .update(user_id, created.id, None, None, Some(&[ids[2], ids[0]]))
            .await
            .unwrap();

        let item_ids: Vec<i32> = updated.items.iter().map(|i| i.prompt_id).collect();
        assert_eq!(item_ids, vec![ids[2], ids[0]]);
        let positions: Vec<i32> = updated.items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_name_unique_per_user_only() {
        let db = setup_test_db().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;
        let ids = seed_prompts(&db, 1).await;
        let service = FavoriteService::new(db);

        service.create(alice, "Standup", None, &ids).await.unwrap();
        // Different user, same name: fine
        service.create(bob, "Standup", None, &ids).await.unwrap();

        // Same user, different case: rejected
        let err = service
            .create(alice, "standup", None, &ids)
            .await
            .unwrap_err();
        assert!(matches!(err, FavoriteError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_rename_keeps_own_name_available() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 1).await;
        let service = FavoriteService::new(db);

        let created = service
            .create(user_id, "Standup", None, &ids)
            .await
            .unwrap();

        // Case-only rename of the same set must not collide with itself
        let updated = service
            .update(user_id, created.id, Some("standup"), None, None)
            .await
            .unwrap();
        assert_eq!(updated.name, "standup");
    }

    #[tokio::test]
    async fn test_ownership_enforced() {
        let db = setup_test_db().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;
        let ids = seed_prompts(&db, 1).await;
        let service = FavoriteService::new(db);

        let created = service.create(alice, "Mine", None, &ids).await.unwrap();

        let err = service
            .update(bob, created.id, Some("Stolen"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, FavoriteError::Forbidden { .. }));

        let err = service.delete(bob, created.id).await.unwrap_err();
        assert!(matches!(err, FavoriteError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 1).await;
        let service = FavoriteService::new(db);

        let err = service.create(user_id, "  ", None, &ids).await.unwrap_err();
        assert!(matches!(err, FavoriteError::Validation(_)));

        let err = service.create(user_id, "Empty", None, &[]).await.unwrap_err();
        assert!(matches!(err, FavoriteError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_prompt_rejected() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 1).await;
        let service = FavoriteService::new(db);

        let err = service
            .create(user_id, "Broken", None, &[ids[0], 9999])
            .await
            .unwrap_err();
        assert!(matches!(err, FavoriteError::PromptNotFound(9999)));

        // Nothing half-created
        assert!(service.list_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let db = setup_test_db().await;
        let user_id = seed_user(&db, "alice@example.com").await;
        let ids = seed_prompts(&db, 2).await;
        let service = FavoriteService::new(db.clone());

        let created = service.create(user_id, "Gone", None, &ids).await.unwrap();
        service.delete(user_id, created.id).await.unwrap();

        let leftover = favorite_set_items::Entity::find()
            .filter(favorite_set_items::Column::FavoriteSetId.eq(created.id))
            .all(&db)
            .await
            .unwrap();
        assert!(leftover.is_empty());
    }
}
