use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::RegistrySettings;
use crate::errors::RegistryError;

/// Initialize the registry database connection
///
/// Connects to the database and returns the connection.
/// Does NOT run migrations - call migrate_database() separately.
///
/// # Returns
/// * `Ok(DatabaseConnection)` - Connection established successfully
/// * `Err(RegistryError)` - Connection failed
pub async fn init_database(settings: &RegistrySettings) -> Result<DatabaseConnection, RegistryError> {
    let database_url = settings.database_url();

    let db = Database::connect(database_url)
        .await
        .map_err(|e| RegistryError::database("connect_database", e))?;

    tracing::debug!("Connected to registry database: {}", database_url);

    Ok(db)
}

/// Run migrations on the registry database
///
/// Runs all pending migrations on the provided database connection.
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(RegistryError)` - Migration failed
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), RegistryError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| RegistryError::database("run_migrations", e))?;

    tracing::debug!("Registry database migrations completed");

    Ok(())
}
