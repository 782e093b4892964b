pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_initial_schema;
mod m20250901_000002_create_attached_prompts;
mod m20250901_000003_create_favorite_sets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_initial_schema::Migration),
            Box::new(m20250901_000002_create_attached_prompts::Migration),
            Box::new(m20250901_000003_create_favorite_sets::Migration),
        ]
    }
}
