use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::database::{establish_connection, migrations::Migrator};

/// Fresh in-memory store with the schema applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = establish_connection("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
