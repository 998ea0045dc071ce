//! Order business logic - Submitting orders, moving them through their lifecycle,
//! and reading them back the way each role is allowed to see them.
//!
//! Status changes and their audit entries are written in one database transaction,
//! so an order never changes status without a matching `status_changed` entry.

use crate::{
    core::{
        audit,
        profile::{Profile, join_name},
        role::Role,
    },
    entities::{Order, Profile as ProfileEntity, order, order_audit, order_file},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use serde_json::json;
use std::{fmt, str::FromStr};
use tracing::info;

/// Lifecycle tag of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, files may still be attached
    Pending,
    /// Being printed
    Processing,
    /// Waiting for pickup
    Ready,
    /// Picked up
    Completed,
    /// Abandoned
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// The string stored in `orders.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Forward one step, or cancel from any non-terminal status.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Ready)
                | (Self::Ready, Self::Completed)
                | (Self::Pending | Self::Processing | Self::Ready, Self::Cancelled)
        )
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| Error::InvalidStatus {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal name record of the client, embedded in order views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientName {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
}

impl ClientName {
    /// First and last name joined, `None` when both are missing.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// An order with everything it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    /// The order row
    pub order: order::Model,
    /// Parsed status
    pub status: OrderStatus,
    /// Client name, `None` if the client profile is gone
    pub client: Option<ClientName>,
    /// Attached files, in upload order
    pub files: Vec<order_file::Model>,
    /// Audit trail, oldest first
    pub audit: Vec<order_audit::Model>,
}

/// Reward points for an order of `total_price` at `rate` points per currency unit.
///
/// Fractions are dropped; negative or non-finite inputs earn nothing.
#[must_use]
pub fn calculate_points(total_price: f64, rate: f64) -> f64 {
    let points = (total_price * rate).floor();
    if points.is_finite() && points > 0.0 {
        points
    } else {
        0.0
    }
}

/// Submits a new, empty order for `client_id` at shop `local_id`.
///
/// # Errors
/// Returns [`Error::ProfileNotFound`] if the client has no profile, or a database error.
pub async fn create_order(
    db: &DatabaseConnection,
    client_id: &str,
    local_id: i64,
) -> Result<order::Model> {
    if ProfileEntity::find_by_id(client_id.to_string())
        .one(db)
        .await?
        .is_none()
    {
        return Err(Error::ProfileNotFound {
            id: client_id.to_string(),
        });
    }

    let txn = db.begin().await?;

    let now = chrono::Utc::now();
    let order = order::ActiveModel {
        client_id: Set(client_id.to_string()),
        local_id: Set(local_id),
        status: Set(OrderStatus::Pending.to_string()),
        total_price: Set(0.0),
        points_earned: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    audit::append_audit(&txn, order.id, Some(client_id), audit::ORDER_CREATED, None).await?;
    txn.commit().await?;

    info!(order_id = order.id, client_id, local_id, "Order created");
    Ok(order)
}

/// Retrieves a single order row by id.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Loads an order together with its client name, files, and audit trail.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if there is no such order, or
/// [`Error::InvalidStatus`] if the stored status is not a known tag.
pub async fn get_order_detail(db: &DatabaseConnection, order_id: i64) -> Result<OrderDetail> {
    let order = get_order_by_id(db, order_id)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let status = order.status.parse()?;

    let client = ProfileEntity::find_by_id(order.client_id.clone())
        .one(db)
        .await?
        .map(|profile| ClientName {
            first_name: profile.first_name,
            last_name: profile.last_name,
        });

    let files = crate::core::order_file::files_for_order(db, order_id).await?;

    let audit = audit::audit_trail(db, order_id).await?;

    Ok(OrderDetail {
        order,
        status,
        client,
        files,
        audit,
    })
}

/// Lists the orders `profile` may see, newest first.
///
/// - admin: every order
/// - local: orders of the profile's shop, none when no shop is assigned
/// - client: the profile's own orders
/// - any other role: none
pub async fn list_orders_for(
    db: &DatabaseConnection,
    profile: &Profile,
) -> Result<Vec<order::Model>> {
    let query = match (&profile.role, profile.local_id) {
        (Role::Admin, _) => Order::find(),
        (Role::Local, Some(local_id)) => {
            Order::find().filter(order::Column::LocalId.eq(local_id))
        }
        (Role::Client, _) => Order::find().filter(order::Column::ClientId.eq(profile.id.as_str())),
        (Role::Local, None) | (Role::Other(_), _) => return Ok(Vec::new()),
    };

    query
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves an order to `next`, recording who did it.
///
/// Touches `updated_at`, appends a `status_changed` entry with `{"from", "to"}`,
/// and on completion sets `points_earned` from `points_rate`. All in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The order does not exist
/// - The stored status is unknown
/// - `next` is not reachable from the current status
/// - Any write fails
pub async fn update_status(
    db: &DatabaseConnection,
    order_id: i64,
    next: OrderStatus,
    actor: Option<&str>,
    points_rate: f64,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let current = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let previous: OrderStatus = current.status.parse()?;

    if !previous.can_transition_to(next) {
        return Err(Error::InvalidStatusTransition {
            from: previous.to_string(),
            to: next.to_string(),
        });
    }

    let total_price = current.total_price;
    let mut active: order::ActiveModel = current.into();
    active.status = Set(next.to_string());
    active.updated_at = Set(chrono::Utc::now());
    if next == OrderStatus::Completed {
        active.points_earned = Set(calculate_points(total_price, points_rate));
    }
    let updated = active.update(&txn).await?;

    audit::append_audit(
        &txn,
        order_id,
        actor,
        audit::STATUS_CHANGED,
        Some(json!({ "from": previous.as_str(), "to": next.as_str() })),
    )
    .await?;
    txn.commit().await?;

    info!(order_id, from = %previous, to = %next, "Order status changed");
    Ok(updated)
}
