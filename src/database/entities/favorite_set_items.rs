use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered membership of a prompt in a favorite set. `position` mirrors the
/// caller-supplied sequence exactly; item lists are replaced wholesale on
/// update rather than diffed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite_set_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub favorite_set_id: i32,
    pub prompt_id: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::favorite_sets::Entity",
        from = "Column::FavoriteSetId",
        to = "super::favorite_sets::Column::Id"
    )]
    FavoriteSets,
    #[sea_orm(
        belongs_to = "super::prompts::Entity",
        from = "Column::PromptId",
        to = "super::prompts::Column::Id"
    )]
    Prompts,
}

impl Related<super::favorite_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteSets.def()
    }
}

impl Related<super::prompts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prompts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
