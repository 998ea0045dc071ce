//! Entity module - SeaORM definitions for the print shop tables.
//! These mirror the relational layout the order views read from:
//! profiles, orders, order files, and the order audit trail.

pub mod order;
pub mod order_audit;
pub mod order_file;
pub mod profile;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_audit::{
    Column as OrderAuditColumn, Entity as OrderAudit, Model as OrderAuditModel,
};
pub use order_file::{Column as OrderFileColumn, Entity as OrderFile, Model as OrderFileModel};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
