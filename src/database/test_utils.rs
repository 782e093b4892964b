#[cfg(test)]
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory database with the full schema applied. Each test gets
/// its own, so tests never see each other's rows.
#[cfg(test)]
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    use sea_orm_migration::MigratorTrait;
    crate::database::migrations::Migrator::up(&db, None)
        .await
        .expect("migrations should apply cleanly");

    db
}
