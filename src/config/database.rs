//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::entities::{Order, OrderAudit, OrderFile, Profile};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

/// Default location of the local `SQLite` store.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/printshop.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to {database_url}");

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the profile, order, order file, and audit tables if they do not exist yet.
///
/// Profiles come first so that the foreign keys on `orders` resolve, then orders,
/// then the two tables owned by an order.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    for mut table in [
        schema.create_table_from_entity(Profile),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderFile),
        schema.create_table_from_entity(OrderAudit),
    ] {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{OrderAuditModel, OrderFileModel, OrderModel, ProfileModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProfileModel> = Profile::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderFileModel> = OrderFile::find().limit(1).all(&db).await?;
        let _: Vec<OrderAuditModel> = OrderAudit::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
