// Common test utilities for integration tests

use account_registry::stores::{AccountStore, DepartmentStore, GradeStore};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Creates a test registry database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates the three stores over one freshly migrated database
pub async fn setup_test_registry() -> (DatabaseConnection, AccountStore, DepartmentStore, GradeStore) {
    let db = setup_test_db().await;
    let accounts = AccountStore::new(db.clone());
    let departments = DepartmentStore::new(db.clone());
    let grades = GradeStore::new(db.clone());
    (db, accounts, departments, grades)
}
