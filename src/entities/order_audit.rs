//! Order audit entity - Append-only log of what happened to an order.
//!
//! Rows are only ever inserted. `user_id` is `None` for system-initiated entries.
//! `details` carries an unconstrained JSON payload.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order audit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_audit")]
pub struct Model {
    /// Unique identifier, increasing in insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this entry belongs to
    pub order_id: i64,
    /// Actor, `None` when the system recorded the entry
    pub user_id: Option<String>,
    /// Event tag such as `"status_changed"`
    pub action: String,
    /// Arbitrary structured payload
    pub details: Option<Json>,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between OrderAudit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
