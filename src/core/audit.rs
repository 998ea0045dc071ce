//! Order audit trail - append-only history of an order.
//!
//! Entries are only ever inserted and come back in insertion
//! order.

use crate::{
    entities::{Order, OrderAudit, order_audit},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Recorded when an order is submitted.
pub const ORDER_CREATED: &str = "order_created";
/// Recorded when a file is attached.
pub const FILE_ADDED: &str = "file_added";
/// Recorded on every accepted status change.
pub const STATUS_CHANGED: &str = "status_changed";

/// Appends an entry to the trail of `order_id`.
///
/// `user_id` is `None` for system-initiated entries.
///
/// # Errors
/// Returns an error if:
/// - The action tag is empty
/// - The order does not exist
/// - The insert fails
pub async fn append_audit<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    user_id: Option<&str>,
    action: &str,
    details: Option<Json>,
) -> Result<order_audit::Model> {
    if action.trim().is_empty() {
        return Err(Error::Config {
            message: "Audit action cannot be empty".to_string(),
        });
    }

    if Order::find_by_id(order_id).one(db).await?.is_none() {
        return Err(Error::OrderNotFound { id: order_id });
    }

    let entry = order_audit::ActiveModel {
        order_id: Set(order_id),
        user_id: Set(user_id.map(str::to_string)),
        action: Set(action.trim().to_string()),
        details: Set(details),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(order_id, action = %entry.action, "Audit entry appended");
    Ok(entry)
}

/// Returns the full trail of `order_id`, oldest entry first.
pub async fn audit_trail<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
) -> Result<Vec<order_audit::Model>> {
    OrderAudit::find()
        .filter(order_audit::Column::OrderId.eq(order_id))
        .order_by_asc(order_audit::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
