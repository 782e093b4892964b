use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavoriteSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteSets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavoriteSets::UserId).integer().not_null())
                    .col(ColumnDef::new(FavoriteSets::Name).string().not_null())
                    .col(ColumnDef::new(FavoriteSets::Description).string())
                    .col(
                        ColumnDef::new(FavoriteSets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FavoriteSets::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_sets_user_id")
                            .from(FavoriteSets::Table, FavoriteSets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Exact-case uniqueness as the storage safety net; the
                    // service layer performs the case-insensitive check.
                    .index(
                        Index::create()
                            .name("idx_favorite_sets_user_name")
                            .table(FavoriteSets::Table)
                            .col(FavoriteSets::UserId)
                            .col(FavoriteSets::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FavoriteSetItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteSetItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FavoriteSetItems::FavoriteSetId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteSetItems::PromptId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteSetItems::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_set_items_favorite_set_id")
                            .from(FavoriteSetItems::Table, FavoriteSetItems::FavoriteSetId)
                            .to(FavoriteSets::Table, FavoriteSets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_set_items_prompt_id")
                            .from(FavoriteSetItems::Table, FavoriteSetItems::PromptId)
                            .to(Prompts::Table, Prompts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteSetItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoriteSets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FavoriteSets {
    Table,
    Id,
    UserId,
    Name,
    Description,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FavoriteSetItems {
    Table,
    Id,
    FavoriteSetId,
    PromptId,
    Position,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Prompts {
    Table,
    Id,
}
