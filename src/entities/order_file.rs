//! Order file entity - One uploaded document attached to an order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order file database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_files")]
pub struct Model {
    /// Unique identifier for the file
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this file is attached to
    pub order_id: i64,
    /// Storage path of the uploaded document
    pub file_path: String,
    /// Name shown to staff and client
    pub file_name: String,
    /// MIME type, when the uploader reported one
    pub file_type: Option<String>,
    /// Number of copies to print
    pub copies: i32,
    /// `"color"`, `"bw"`, or whatever the client sent
    pub color_mode: String,
    /// Paper size such as `"A4"`
    pub paper_size: Option<String>,
    /// Price of a single copy
    pub price_per_copy: f64,
    /// When the file was attached
    pub created_at: DateTimeUtc,
}

/// Defines relationships between OrderFile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each file belongs to one order
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
