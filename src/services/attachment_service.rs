use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::database::entities::{attached_prompts, prompts};
use crate::errors::{AttachmentError, AttachmentResult};

/// Default cap on outgoing attachments per main prompt
pub const DEFAULT_MAX_ATTACHMENTS: usize = 10;

/// A created or listed edge joined with the prompt records it references
#[derive(Debug, Clone, Serialize)]
pub struct AttachedPromptView {
    pub id: i32,
    pub main_prompt_id: i32,
    pub attached_prompt_id: i32,
    pub position: i32,
    pub usage_count: i32,
    pub attached_prompt: prompts::Model,
}

/// Result row for the popular-combinations widget
#[derive(Debug, Clone, Serialize)]
pub struct PopularCombination {
    pub main_prompt: prompts::Model,
    pub attachment_count: usize,
    pub total_usage: i64,
}

/// One violated rule from a dry-run `validate` check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AttachmentRuleViolation {
    MissingPrompt { prompt_id: i32 },
    SelfAttachment,
    AlreadyAttached,
    WouldCreateCycle { path: String },
    LimitReached { limit: usize },
}

/// Service layer for the directed "attached prompts" relation.
///
/// Enforces the invariants the relational schema cannot express: no
/// self-edges, no cycles, and a per-prompt attachment cap. The unique index
/// on (main_prompt_id, attached_prompt_id) remains the last line of defence
/// against concurrent writers; the checks here are the fast path.
#[derive(Clone)]
pub struct AttachmentService {
    db: DatabaseConnection,
    max_attachments: usize,
}

impl AttachmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
        }
    }

    pub fn with_max_attachments(db: DatabaseConnection, max_attachments: usize) -> Self {
        Self {
            db,
            max_attachments,
        }
    }

    /// Attach `attached_id` to `main_id`.
    ///
    /// Checks run in order: both prompts exist, no self-edge, no duplicate
    /// edge, cap not reached, and no path from `attached_id` back to
    /// `main_id` (which would close a cycle through the new edge). The new
    /// edge is appended at position max + 1, starting from 0.
    pub async fn attach(
        &self,
        main_id: i32,
        attached_id: i32,
    ) -> AttachmentResult<AttachedPromptView> {
        self.find_prompt(main_id).await?;
        let attached = self.find_prompt(attached_id).await?;

        if main_id == attached_id {
            return Err(AttachmentError::SelfAttachment(main_id));
        }

        let edges = self.load_all_edges().await?;

        if edges
            .iter()
            .any(|e| e.main_prompt_id == main_id && e.attached_prompt_id == attached_id)
        {
            return Err(AttachmentError::AlreadyExists {
                main: main_id,
                attached: attached_id,
            });
        }

        let outgoing = edges
            .iter()
            .filter(|e| e.main_prompt_id == main_id)
            .count();
        if outgoing >= self.max_attachments {
            return Err(AttachmentError::LimitExceeded {
                main: main_id,
                limit: self.max_attachments,
            });
        }

        if let Some(path) = reachability_path(&edges, attached_id, main_id) {
            return Err(AttachmentError::CycleDetected(format_cycle(
                main_id, &path,
            )));
        }

        let next_position = edges
            .iter()
            .filter(|e| e.main_prompt_id == main_id)
            .map(|e| e.position + 1)
            .max()
            .unwrap_or(0);

        let now = Utc::now();
        let edge = attached_prompts::ActiveModel {
            main_prompt_id: Set(main_id),
            attached_prompt_id: Set(attached_id),
            position: Set(next_position),
            usage_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let edge = edge.insert(&self.db).await?;
        debug!(
            main_id,
            attached_id,
            position = edge.position,
            "Attached prompt"
        );

        Ok(AttachedPromptView {
            id: edge.id,
            main_prompt_id: edge.main_prompt_id,
            attached_prompt_id: edge.attached_prompt_id,
            position: edge.position,
            usage_count: edge.usage_count,
            attached_prompt: attached,
        })
    }

    /// Remove the edge if present. Detaching an absent edge is a successful
    /// no-op so clients can retry freely.
    pub async fn detach(&self, main_id: i32, attached_id: i32) -> AttachmentResult<()> {
        let result = attached_prompts::Entity::delete_many()
            .filter(attached_prompts::Column::MainPromptId.eq(main_id))
            .filter(attached_prompts::Column::AttachedPromptId.eq(attached_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!(main_id, attached_id, "Detach of non-existent edge ignored");
        }

        Ok(())
    }

    /// Rewrite positions for one main prompt's edges in a single
    /// transaction. Pairs naming edges that do not exist for `main_id` are
    /// ignored; everything else applies atomically.
    pub async fn reorder(
        &self,
        main_id: i32,
        ordered_pairs: &[(i32, i32)],
    ) -> AttachmentResult<()> {
        let txn = self.db.begin().await?;

        let edges = attached_prompts::Entity::find()
            .filter(attached_prompts::Column::MainPromptId.eq(main_id))
            .all(&txn)
            .await?;

        let by_attached: HashMap<i32, attached_prompts::Model> = edges
            .into_iter()
            .map(|e| (e.attached_prompt_id, e))
            .collect();

        for (attached_id, new_position) in ordered_pairs {
            let Some(edge) = by_attached.get(attached_id) else {
                debug!(main_id, attached_id, "Reorder pair without edge ignored");
                continue;
            };

            let mut active: attached_prompts::ActiveModel = edge.clone().into();
            active.position = Set(*new_position);
            active.updated_at = Set(Utc::now());
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// List edges for `main_id` ordered by position, each joined with the
    /// attached prompt's record.
    pub async fn list_attached(&self, main_id: i32) -> AttachmentResult<Vec<AttachedPromptView>> {
        let rows = attached_prompts::Entity::find()
            .filter(attached_prompts::Column::MainPromptId.eq(main_id))
            .order_by_asc(attached_prompts::Column::Position)
            .find_also_related(prompts::Entity)
            .all(&self.db)
            .await?;

        let views = rows
            .into_iter()
            .filter_map(|(edge, prompt)| {
                prompt.map(|p| AttachedPromptView {
                    id: edge.id,
                    main_prompt_id: edge.main_prompt_id,
                    attached_prompt_id: edge.attached_prompt_id,
                    position: edge.position,
                    usage_count: edge.usage_count,
                    attached_prompt: p,
                })
            })
            .collect();

        Ok(views)
    }

    /// Active prompts that could still be attached to `main_id`: excludes
    /// the main prompt itself, everything already attached, caller-supplied
    /// ids, and optionally filters by a substring match on title/content.
    pub async fn list_available_for_attachment(
        &self,
        main_id: i32,
        exclude_ids: &[i32],
        search: Option<&str>,
    ) -> AttachmentResult<Vec<prompts::Model>> {
        let attached_ids: Vec<i32> = attached_prompts::Entity::find()
            .filter(attached_prompts::Column::MainPromptId.eq(main_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| e.attached_prompt_id)
            .collect();

        let mut excluded: Vec<i32> = attached_ids;
        excluded.push(main_id);
        excluded.extend_from_slice(exclude_ids);

        let mut query = prompts::Entity::find()
            .filter(prompts::Column::IsActive.eq(true))
            .filter(prompts::Column::Id.is_not_in(excluded))
            .order_by_asc(prompts::Column::DisplayOrder);

        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(prompts::Column::Title.like(pattern.clone()))
                    .add(prompts::Column::Content.like(pattern)),
            );
        }

        Ok(query.all(&self.db).await?)
    }

    /// Dry-run the `attach` rule set without mutating anything, collecting
    /// every violated rule so the UI can show all problems at once.
    pub async fn validate(
        &self,
        main_id: i32,
        attached_id: i32,
    ) -> AttachmentResult<Vec<AttachmentRuleViolation>> {
        let mut violations = Vec::new();

        for id in [main_id, attached_id] {
            let exists = prompts::Entity::find_by_id(id).one(&self.db).await?.is_some();
            if !exists {
                violations.push(AttachmentRuleViolation::MissingPrompt { prompt_id: id });
            }
        }

        if main_id == attached_id {
            violations.push(AttachmentRuleViolation::SelfAttachment);
            return Ok(violations);
        }

        let edges = self.load_all_edges().await?;

        if edges
            .iter()
            .any(|e| e.main_prompt_id == main_id && e.attached_prompt_id == attached_id)
        {
            violations.push(AttachmentRuleViolation::AlreadyAttached);
        }

        let outgoing = edges
            .iter()
            .filter(|e| e.main_prompt_id == main_id)
            .count();
        if outgoing >= self.max_attachments {
            violations.push(AttachmentRuleViolation::LimitReached {
                limit: self.max_attachments,
            });
        }

        if let Some(path) = reachability_path(&edges, attached_id, main_id) {
            violations.push(AttachmentRuleViolation::WouldCreateCycle {
                path: format_cycle(main_id, &path),
            });
        }

        Ok(violations)
    }

    /// Main prompts ranked by how heavily their combinations are used:
    /// summed usage count first, edge count as the tie-breaker.
    pub async fn popular_combinations(
        &self,
        limit: usize,
    ) -> AttachmentResult<Vec<PopularCombination>> {
        let edges = self.load_all_edges().await?;

        let mut stats: HashMap<i32, (usize, i64)> = HashMap::new();
        for edge in &edges {
            let entry = stats.entry(edge.main_prompt_id).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += edge.usage_count as i64;
        }

        let mut ranked: Vec<(i32, usize, i64)> = stats
            .into_iter()
            .map(|(id, (count, usage))| (id, count, usage))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(b.1.cmp(&a.1)).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        let ids: Vec<i32> = ranked.iter().map(|(id, _, _)| *id).collect();
        let prompt_rows = prompts::Entity::find()
            .filter(prompts::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        let by_id: HashMap<i32, prompts::Model> =
            prompt_rows.into_iter().map(|p| (p.id, p)).collect();

        let combinations = ranked
            .into_iter()
            .filter_map(|(id, count, usage)| {
                by_id.get(&id).map(|prompt| PopularCombination {
                    main_prompt: prompt.clone(),
                    attachment_count: count,
                    total_usage: usage,
                })
            })
            .collect();

        Ok(combinations)
    }

    /// Best-effort usage counter for "combination copied" events. Failures
    /// are logged and swallowed so they never break the copy action itself.
    ///
    /// The increment is a single UPDATE against the stored value, so
    /// concurrent copies of the same combination never lose a count.
    pub async fn increment_usage(&self, main_id: i32, attached_id: i32) {
        let result = attached_prompts::Entity::update_many()
            .col_expr(
                attached_prompts::Column::UsageCount,
                Expr::col(attached_prompts::Column::UsageCount).add(1),
            )
            .col_expr(
                attached_prompts::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(attached_prompts::Column::MainPromptId.eq(main_id))
            .filter(attached_prompts::Column::AttachedPromptId.eq(attached_id))
            .exec(&self.db)
            .await;

        match result {
            Ok(res) if res.rows_affected == 0 => {
                warn!(main_id, attached_id, "Usage increment on unknown edge");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(main_id, attached_id, "Usage increment failed: {}", e);
            }
        }
    }

    async fn find_prompt(&self, id: i32) -> AttachmentResult<prompts::Model> {
        prompts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AttachmentError::PromptNotFound(id))
    }

    async fn load_all_edges(&self) -> AttachmentResult<Vec<EdgeRow>> {
        let rows = attached_prompts::Entity::find()
            .select_only()
            .column(attached_prompts::Column::MainPromptId)
            .column(attached_prompts::Column::AttachedPromptId)
            .column(attached_prompts::Column::Position)
            .column(attached_prompts::Column::UsageCount)
            .into_tuple::<(i32, i32, i32, i32)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(main_prompt_id, attached_prompt_id, position, usage_count)| EdgeRow {
                    main_prompt_id,
                    attached_prompt_id,
                    position,
                    usage_count,
                },
            )
            .collect())
    }
}

#[derive(Debug, Clone)]
struct EdgeRow {
    main_prompt_id: i32,
    attached_prompt_id: i32,
    position: i32,
    usage_count: i32,
}

/// Depth-first search over the edge set: returns a path `from -> ... -> to`
/// if `to` is reachable from `from`. A visited set guards against loops in
/// pre-existing data that should never contain them.
fn reachability_path(edges: &[EdgeRow], from: i32, to: i32) -> Option<Vec<i32>> {
    let mut adjacency: HashMap<i32, Vec<i32>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.main_prompt_id)
            .or_default()
            .push(edge.attached_prompt_id);
    }

    let mut visited: HashSet<i32> = HashSet::new();
    let mut path: Vec<i32> = Vec::new();

    fn dfs(
        adjacency: &HashMap<i32, Vec<i32>>,
        visited: &mut HashSet<i32>,
        path: &mut Vec<i32>,
        current: i32,
        target: i32,
    ) -> bool {
        if !visited.insert(current) {
            return false;
        }
        path.push(current);

        if current == target {
            return true;
        }

        if let Some(next) = adjacency.get(&current) {
            for &n in next {
                if dfs(adjacency, visited, path, n, target) {
                    return true;
                }
            }
        }

        path.pop();
        false
    }

    if dfs(&adjacency, &mut visited, &mut path, from, to) {
        Some(path)
    } else {
        None
    }
}

/// Render the cycle the rejected edge would close, starting and ending at
/// the main prompt: `main -> attached -> ... -> main`.
fn format_cycle(main_id: i32, path: &[i32]) -> String {
    let mut ids = vec![main_id.to_string()];
    ids.extend(path.iter().map(|id| id.to_string()));
    ids.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::PromptService;

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
    async fn test_attach_rejects_self_edge() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 1).await;
        let service = AttachmentService::new(db);

        let err = service.attach(ids[0], ids[0]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::SelfAttachment(id) if id == ids[0]));

        // No row may be created by a rejected attach
        let edges = service.list_attached(ids[0]).await.unwrap();
        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn test_attach_rejects_duplicate() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 2).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        let err = service.attach(ids[0], ids[1]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_attach_rejects_missing_prompt() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 1).await;
        let service = AttachmentService::new(db);

        let err = service.attach(ids[0], 9999).await.unwrap_err();
        assert!(matches!(err, AttachmentError::PromptNotFound(9999)));
    }

    #[tokio::test]
    async fn test_attach_rejects_transitive_cycle() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 4).await;
        let service = AttachmentService::new(db);

        // 0 -> 1 -> 2 succeeds; 2 -> 0 would close the cycle
        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[1], ids[2]).await.unwrap();

        let err = service.attach(ids[2], ids[0]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::CycleDetected(_)));

        // An unrelated target is still fine
        service.attach(ids[2], ids[3]).await.unwrap();
    }

    #[tokio::test]
    async fn test_attachment_limit() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 4).await;
        let service = AttachmentService::with_max_attachments(db, 2);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[0], ids[2]).await.unwrap();

        let err = service.attach(ids[0], ids[3]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::LimitExceeded { limit: 2, .. }));
    }

    #[tokio::test]
    async fn test_positions_append_in_order() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 3).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[0], ids[2]).await.unwrap();

        let edges = service.list_attached(ids[0]).await.unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].position, 0);
        assert_eq!(edges[0].attached_prompt_id, ids[1]);
        assert_eq!(edges[1].position, 1);
        assert_eq!(edges[1].attached_prompt_id, ids[2]);
    }

    #[tokio::test]
    async fn test_reorder_rewrites_positions() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 3).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[0], ids[2]).await.unwrap();

        // Swap, with one bogus pair that must be ignored
        service
            .reorder(ids[0], &[(ids[2], 0), (ids[1], 1), (9999, 2)])
            .await
            .unwrap();

        let edges = service.list_attached(ids[0]).await.unwrap();
        assert_eq!(edges[0].attached_prompt_id, ids[2]);
        assert_eq!(edges[1].attached_prompt_id, ids[1]);
    }

    #[tokio::test]
    async fn test_reorder_rolls_back_on_failure() {
        use sea_orm::ConnectionTrait;

        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 3).await;
        let service = AttachmentService::new(db.clone());

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[0], ids[2]).await.unwrap();

        // Abort any update that writes the sentinel position, so the second
        // pair fails after the first has already been applied.
        db.execute_unprepared(
            "CREATE TRIGGER reject_sentinel_position BEFORE UPDATE ON attached_prompts \
             WHEN NEW.position = 99 BEGIN SELECT RAISE(ABORT, 'sentinel position'); END",
        )
        .await
        .unwrap();

        let result = service
            .reorder(ids[0], &[(ids[2], 0), (ids[1], 99)])
            .await;
        assert!(result.is_err());

        // The already-applied first pair must have rolled back with the
        // transaction: original order and positions intact.
        let edges = service.list_attached(ids[0]).await.unwrap();
        assert_eq!(edges[0].attached_prompt_id, ids[1]);
        assert_eq!(edges[0].position, 0);
        assert_eq!(edges[1].attached_prompt_id, ids[2]);
        assert_eq!(edges[1].position, 1);
    }

    #[tokio::test]
    async fn test_detach_is_idempotent() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 2).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.detach(ids[0], ids[1]).await.unwrap();
        // Second detach of the now-absent edge is still a success
        service.detach(ids[0], ids[1]).await.unwrap();

        assert!(service.list_attached(ids[0]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_available_excludes_attached_and_self() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 4).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();

        let available = service
            .list_available_for_attachment(ids[0], &[ids[2]], None)
            .await
            .unwrap();
        let available_ids: Vec<i32> = available.iter().map(|p| p.id).collect();
        assert_eq!(available_ids, vec![ids[3]]);
    }

    #[tokio::test]
    async fn test_available_search_filter() {
        let db = setup_test_db().await;
        let prompt_service = PromptService::new(db.clone());
        let a = prompt_service
            .create_prompt("Greeting draft", "hello there", None)
            .await
            .unwrap();
        let _signoff = prompt_service
            .create_prompt("Sign-off", "regards", None)
            .await
            .unwrap();
        let main = prompt_service
            .create_prompt("Main", "body", None)
            .await
            .unwrap();

        let service = AttachmentService::new(db);
        let available = service
            .list_available_for_attachment(main.id, &[], Some("hello"))
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, a.id);
    }

    #[tokio::test]
    async fn test_validate_collects_all_violations() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 3).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[1], ids[2]).await.unwrap();

        // 2 -> 0 would close a cycle; nothing else is wrong
        let violations = service.validate(ids[2], ids[0]).await.unwrap();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            AttachmentRuleViolation::WouldCreateCycle { .. }
        ));

        // Duplicate edge reports exactly that
        let violations = service.validate(ids[0], ids[1]).await.unwrap();
        assert!(violations.contains(&AttachmentRuleViolation::AlreadyAttached));

        // Self edge short-circuits
        let violations = service.validate(ids[0], ids[0]).await.unwrap();
        assert!(violations.contains(&AttachmentRuleViolation::SelfAttachment));
    }

    #[tokio::test]
    async fn test_increment_usage_accumulates_on_stored_value() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 2).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();

        service.increment_usage(ids[0], ids[1]).await;
        service.increment_usage(ids[0], ids[1]).await;
        service.increment_usage(ids[0], ids[1]).await;

        let edges = service.list_attached(ids[0]).await.unwrap();
        assert_eq!(edges[0].usage_count, 3);
    }

    #[tokio::test]
    async fn test_increment_usage_missing_edge_is_swallowed() {
        let db = setup_test_db().await;
        let service = AttachmentService::new(db);

        // Must not panic or return an error surface
        service.increment_usage(1, 2).await;
    }

    #[tokio::test]
    async fn test_popular_combinations_ranked_by_usage() {
        let db = setup_test_db().await;
        let ids = seed_prompts(&db, 4).await;
        let service = AttachmentService::new(db);

        service.attach(ids[0], ids[1]).await.unwrap();
        service.attach(ids[2], ids[3]).await.unwrap();

        service.increment_usage(ids[2], ids[3]).await;
        service.increment_usage(ids[2], ids[3]).await;
        service.increment_usage(ids[0], ids[1]).await;

        let popular = service.popular_combinations(10).await.unwrap();
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].main_prompt.id, ids[2]);
        assert_eq!(popular[0].total_usage, 2);
        assert_eq!(popular[1].main_prompt.id, ids[0]);
    }

    #[test]
    fn test_cycle_path_formatting() {
        let edges = vec![
            EdgeRow {
                main_prompt_id: 1,
                attached_prompt_id: 2,
                position: 0,
                usage_count: 0,
            },
            EdgeRow {
                main_prompt_id: 2,
                attached_prompt_id: 3,
                position: 0,
                usage_count: 0,
            },
        ];

        let path = reachability_path(&edges, 1, 3).expect("3 reachable from 1");
        assert_eq!(path, vec![1, 2, 3]);
        assert_eq!(format_cycle(3, &path), "3 -> 1 -> 2 -> 3");

        assert!(reachability_path(&edges, 3, 1).is_none());
    }
}
