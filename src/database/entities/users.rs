use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account record. Ownership anchor for favorite sets; emails are stored
/// lowercase. OAuth handshake details live outside this crate.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub status: String,
    pub oauth_subject: Option<String>,
    pub approved_at: Option<ChronoDateTimeUtc>,
    pub approved_by: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite_sets::Entity")]
    FavoriteSets,
}

impl Related<super::favorite_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteSets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
