//! Shared test utilities.
//!
//! Helpers for setting up an in-memory store and creating profiles, orders,
//! and file uploads with sensible defaults.

use crate::{
    core::{
        order,
        order_file::{ColorMode, NewOrderFile},
        profile::{self, NewProfile, Profile},
        role::Role,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Profile fields with defaults: named "Test Client", no shop, no password flag.
pub fn new_profile(id: &str, role: Role) -> NewProfile {
    NewProfile {
        id: id.to_string(),
        role,
        first_name: Some("Test".to_string()),
        last_name: Some("Client".to_string()),
        local_id: None,
        must_change_password: false,
    }
}

/// Inserts a profile built by [`new_profile`].
pub async fn create_test_profile(
    db: &DatabaseConnection,
    id: &str,
    role: Role,
) -> Result<Profile> {
    profile::create_profile(db, new_profile(id, role)).await
}

/// Submits an order for `client_id` at shop `local_id`.
pub async fn create_test_order(
    db: &DatabaseConnection,
    client_id: &str,
    local_id: i64,
) -> Result<entities::order::Model> {
    order::create_order(db, client_id, local_id).await
}

/// Black-and-white A4 PDF upload stored under `uploads/<name>`.
pub fn test_file(name: &str, copies: i32, price_per_copy: f64) -> NewOrderFile {
    NewOrderFile {
        file_path: format!("uploads/{name}"),
        file_name: name.to_string(),
        file_type: Some("application/pdf".to_string()),
        copies,
        color_mode: ColorMode::Bw,
        paper_size: Some("A4".to_string()),
        price_per_copy,
    }
}

/// Sets up a store with one client (`test_client`) and one pending order at shop 1.
/// Returns (db, client, order) for order-related tests.
pub async fn setup_with_order() -> Result<(
    DatabaseConnection,
    Profile,
    entities::order::Model,
)> {
    let db = setup_test_db().await?;
    let client = create_test_profile(&db, "test_client", Role::Client).await?;
    let order = create_test_order(&db, &client.id, 1).await?;
    Ok((db, client, order))
}
