use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttachedPrompts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttachedPrompts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::MainPromptId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::AttachedPromptId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::UsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttachedPrompts::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attached_prompts_main_prompt_id")
                            .from(AttachedPrompts::Table, AttachedPrompts::MainPromptId)
                            .to(Prompts::Table, Prompts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attached_prompts_attached_prompt_id")
                            .from(AttachedPrompts::Table, AttachedPrompts::AttachedPromptId)
                            .to(Prompts::Table, Prompts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Final safety net against concurrent attach calls that
                    // both pass the application-level duplicate check.
                    .index(
                        Index::create()
                            .name("idx_attached_prompts_pair")
                            .table(AttachedPrompts::Table)
                            .col(AttachedPrompts::MainPromptId)
                            .col(AttachedPrompts::AttachedPromptId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttachedPrompts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AttachedPrompts {
    Table,
    Id,
    MainPromptId,
    AttachedPromptId,
    Position,
    UsageCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Prompts {
    Table,
    Id,
}
