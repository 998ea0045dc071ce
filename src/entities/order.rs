//! Order entity - One print job submitted by a client to a shop.
//!
//! `status` holds the lifecycle tag as text (`pending`, `processing`, `ready`,
//! `completed`, `cancelled`); [`crate::core::order::OrderStatus`] is the typed view.
//! `created_at` never changes after insert, `updated_at` is touched on every
//! status or content change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile id of the client who placed the order
    pub client_id: String,
    /// Shop processing the order
    pub local_id: i64,
    /// Lifecycle tag
    pub status: String,
    /// Sum of `copies * price_per_copy` over the attached files
    pub total_price: f64,
    /// Reward points granted when the order completes
    pub points_earned: f64,
    /// When the order was submitted
    pub created_at: DateTimeUtc,
    /// When the order last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one client profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ClientId",
        to = "super::profile::Column::Id"
    )]
    Client,
    /// One order has many files
    #[sea_orm(has_many = "super::order_file::Entity")]
    Files,
    /// One order has many audit entries
    #[sea_orm(has_many = "super::order_audit::Entity")]
    Audit,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::order_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl Related<super::order_audit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Audit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
