use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string())
                    .col(ColumnDef::new(Users::Role).string().not_null().default("user"))
                    .col(
                        ColumnDef::new(Users::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Users::OauthSubject).string())
                    .col(ColumnDef::new(Users::ApprovedAt).timestamp())
                    .col(ColumnDef::new(Users::ApprovedBy).integer())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .index(
                        Index::create()
                            .name("idx_users_email")
                            .table(Users::Table)
                            .col(Users::Email)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create prompts table
        manager
            .create_table(
                Table::create()
                    .table(Prompts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prompts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prompts::Title).string().not_null())
                    .col(ColumnDef::new(Prompts::Content).text().not_null())
                    .col(ColumnDef::new(Prompts::Description).string())
                    .col(
                        ColumnDef::new(Prompts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prompts::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Prompts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Prompts::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create tags table
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null())
                    .col(
                        ColumnDef::new(Tags::Color)
                            .string()
                            .not_null()
                            .default("#808080"),
                    )
                    .col(ColumnDef::new(Tags::CreatedAt).timestamp().not_null())
                    .index(
                        Index::create()
                            .name("idx_tags_name")
                            .table(Tags::Table)
                            .col(Tags::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create prompt_tags join table
        manager
            .create_table(
                Table::create()
                    .table(PromptTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PromptTags::PromptId).integer().not_null())
                    .col(ColumnDef::new(PromptTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PromptTags::PromptId)
                            .col(PromptTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prompt_tags_prompt_id")
                            .from(PromptTags::Table, PromptTags::PromptId)
                            .to(Prompts::Table, Prompts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prompt_tags_tag_id")
                            .from(PromptTags::Table, PromptTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromptTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prompts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    DisplayName,
    Role,
    Status,
    OauthSubject,
    ApprovedAt,
    ApprovedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Prompts {
    Table,
    Id,
    Title,
    Content,
    Description,
    IsActive,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PromptTags {
    Table,
    PromptId,
    TagId,
}
