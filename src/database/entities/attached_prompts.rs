use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed edge "main prompt has attached prompt", ordered by `position`.
/// The (main_prompt_id, attached_prompt_id) pair is unique at the storage
/// layer; acyclicity is enforced by the attachment service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attached_prompts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub main_prompt_id: i32,
    pub attached_prompt_id: i32,
    pub position: i32,
    pub usage_count: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prompts::Entity",
        from = "Column::MainPromptId",
        to = "super::prompts::Column::Id"
    )]
    MainPrompt,
    #[sea_orm(
        belongs_to = "super::prompts::Entity",
        from = "Column::AttachedPromptId",
        to = "super::prompts::Column::Id"
    )]
    AttachedPrompt,
}

// Default prompt join resolves to the attached side, which is what
// list/display queries need.
impl Related<super::prompts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttachedPrompt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
