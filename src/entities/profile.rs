//! Profile entity - Extended user record fetched after authentication.
//!
//! The primary key is the authenticated user's id, so a profile is looked up
//! directly from the session's user. `role` is kept as the raw string the
//! account was provisioned with; [`crate::core::role::Role`] parses it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Authenticated user id this profile belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Given name, may be missing for accounts created by an administrator
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Access-level tag: `"admin"`, `"local"`, `"client"`, or anything else
    pub role: String,
    /// Shop a `local` staff member works for
    pub local_id: Option<i64>,
    /// Set while the account still uses a temporary password
    pub must_change_password: bool,
    /// When the profile was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A client profile has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
