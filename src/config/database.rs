//! Defaults-store configuration module.
//!
//! This module handles the `SQLite` connection backing the saved-defaults
//! store using `SeaORM`. The cart itself is never persisted here; the store
//! only holds named preference records (see [`crate::core::defaults`]).
//! Table creation uses `SeaORM`'s `Schema::create_table_from_entity` so the
//! schema always matches the entity definitions without manual SQL.

use crate::entities::SavedDefault;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// Loads a `.env` file if one is present, then looks for `DATABASE_URL` and
/// falls back to a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/boxcart.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` defaults store.
///
/// Uses the URL from [`get_database_url`]. This function handles connection
/// errors and provides a clean interface for store access throughout the
/// application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the defaults-store tables using `SeaORM`'s schema generation.
///
/// The `DeriveEntityModel` macros generate the proper SQL for table creation,
/// ensuring the schema matches the Rust struct definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let saved_default_table = schema.create_table_from_entity(SavedDefault);

    db.execute(builder.build(&saved_default_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SavedDefaultModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        // Use in-memory database for testing to avoid clobbering a local store
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that the table exists by querying it
        let _: Vec<SavedDefaultModel> = SavedDefault::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_database_url_fallback() {
        // With no DATABASE_URL set the local SQLite fallback is used
        if std::env::var("DATABASE_URL").is_err() {
            assert!(get_database_url().starts_with("sqlite://"));
        }
    }
}
