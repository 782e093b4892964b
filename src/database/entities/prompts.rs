use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prompts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prompt_tags::Entity")]
    PromptTags,
    #[sea_orm(has_many = "super::favorite_set_items::Entity")]
    FavoriteSetItems,
}

impl Related<super::prompt_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PromptTags.def()
    }
}

impl Related<super::favorite_set_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteSetItems.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::prompt_tags::Relation::Tags.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::prompt_tags::Relation::Prompts.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
