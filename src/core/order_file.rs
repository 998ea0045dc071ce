//! Order file business logic - Attaching uploaded documents to an order.
//!
//! Attaching a file recomputes the order's `total_price` from all of its files and
//! appends a `file_added` audit entry, inside one transaction.

use crate::{
    core::{audit, order::OrderStatus},
    entities::{Order, OrderFile, order, order_file},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde_json::json;
use std::fmt;
use tracing::info;

/// How a file is printed. Unknown modes sent by clients are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// Full color
    Color,
    /// Black and white
    Bw,
    /// Anything else
    Other(String),
}

impl ColorMode {
    /// The string stored in `order_files.color_mode`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Bw => "bw",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for ColorMode {
    fn from(value: &str) -> Self {
        match value {
            "color" => Self::Color,
            "bw" => Self::Bw,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload metadata for a file being attached.
#[derive(Debug, Clone)]
pub struct NewOrderFile {
    /// Storage path
    pub file_path: String,
    /// Display name
    pub file_name: String,
    /// MIME type, if known
    pub file_type: Option<String>,
    /// Copies to print, at least one
    pub copies: i32,
    /// Color mode
    pub color_mode: ColorMode,
    /// Paper size, if chosen
    pub paper_size: Option<String>,
    /// Price of one copy
    pub price_per_copy: f64,
}

impl NewOrderFile {
    fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(Error::InvalidFile {
                message: "File name cannot be empty".to_string(),
            });
        }
        if self.file_path.trim().is_empty() {
            return Err(Error::InvalidFile {
                message: "Storage path cannot be empty".to_string(),
            });
        }
        if self.copies < 1 {
            return Err(Error::InvalidFile {
                message: format!("Copies must be at least 1, got {}", self.copies),
            });
        }
        if !self.price_per_copy.is_finite() || self.price_per_copy < 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.price_per_copy,
            });
        }
        Ok(())
    }
}

/// Price of all copies of one file.
#[must_use]
pub fn line_total(file: &order_file::Model) -> f64 {
    f64::from(file.copies) * file.price_per_copy
}

/// Lists the files of `order_id` in upload order.
pub async fn files_for_order<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
) -> Result<Vec<order_file::Model>> {
    OrderFile::find()
        .filter(order_file::Column::OrderId.eq(order_id))
        .order_by_asc(order_file::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches a file to a pending order and refreshes the order total.
///
/// # Errors
/// Returns an error if:
/// - The file metadata is invalid (empty name or path, no copies, bad price)
/// - The order does not exist
/// - The order is no longer pending
/// - Any write fails
pub async fn add_file(
    db: &DatabaseConnection,
    order_id: i64,
    new: NewOrderFile,
    actor: Option<&str>,
) -> Result<order_file::Model> {
    new.validate()?;

    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let status: OrderStatus = order.status.parse()?;
    if status != OrderStatus::Pending {
        return Err(Error::InvalidFile {
            message: format!("Files can only be added to pending orders, order is {status}"),
        });
    }

    let now = chrono::Utc::now();
    let file = order_file::ActiveModel {
        order_id: Set(order_id),
        file_path: Set(new.file_path.trim().to_string()),
        file_name: Set(new.file_name.trim().to_string()),
        file_type: Set(new.file_type),
        copies: Set(new.copies),
        color_mode: Set(new.color_mode.to_string()),
        paper_size: Set(new.paper_size),
        price_per_copy: Set(new.price_per_copy),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let total_price: f64 = files_for_order(&txn, order_id)
        .await?
        .iter()
        .map(line_total)
        .sum();

    let mut active: order::ActiveModel = order.into();
    active.total_price = Set(total_price);
    active.updated_at = Set(now);
    active.update(&txn).await?;

    audit::append_audit(
        &txn,
        order_id,
        actor,
        audit::FILE_ADDED,
        Some(json!({
            "file_id": file.id,
            "file_name": file.file_name,
            "copies": file.copies,
        })),
    )
    .await?;
    txn.commit().await?;

    info!(order_id, file_id = file.id, total_price, "File attached to order");
    Ok(file)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::order, test_utils::*};

    #[test]
    fn test_color_mode_keeps_unknown_values() {
        assert_eq!(ColorMode::from("color"), ColorMode::Color);
        assert_eq!(ColorMode::from("bw"), ColorMode::Bw);
        assert_eq!(ColorMode::from("sepia").as_str(), "sepia");
    }

    #[tokio::test]
    async fn test_add_file_updates_total() -> Result<()> {
        let (db, _client, order) = setup_with_order().await?;

        let file = add_file(
            &db,
            order.id,
            NewOrderFile {
                color_mode: ColorMode::Color,
                paper_size: Some("A3".to_string()),
                ..test_file("plans.pdf", 3, 1.5)
            },
            Some("test_client"),
        )
        .await?;

        assert_eq!(file.order_id, order.id);
        assert_eq!(file.color_mode, "color");
        assert_eq!(file.paper_size.as_deref(), Some("A3"));
        assert_eq!(line_total(&file), 4.5);

        add_file(&db, order.id, test_file("notes.pdf", 2, 0.1), None).await?;

        let refreshed = order::get_order_by_id(&db, order.id).await?.unwrap();
        assert!((refreshed.total_price - 4.7).abs() < 1e-9);
        assert!(refreshed.updated_at >= order.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_file_validation() -> Result<()> {
        let (db, _client, order) = setup_with_order().await?;

        let result = add_file(&db, order.id, test_file("", 1, 1.0), None).await;
        assert!(matches!(result, Err(Error::InvalidFile { .. })));

        let result = add_file(&db, order.id, test_file("a.pdf", 0, 1.0), None).await;
        assert!(matches!(result, Err(Error::InvalidFile { .. })));

        let result = add_file(&db, order.id, test_file("a.pdf", 1, -1.0), None).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: -1.0 })));

        let result = add_file(&db, order.id, test_file("a.pdf", 1, f64::NAN), None).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        assert!(files_for_order(&db, order.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_file_to_missing_order() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_file(&db, 5, test_file("a.pdf", 1, 1.0), None).await;
        assert!(matches!(result, Err(Error::OrderNotFound { id: 5 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_file_rejected_once_processing() -> Result<()> {
        let (db, _client, order) = setup_with_order().await?;
        order::update_status(&db, order.id, OrderStatus::Processing, None, 1.0).await?;

        let result = add_file(&db, order.id, test_file("late.pdf", 1, 1.0), None).await;
        assert!(matches!(result, Err(Error::InvalidFile { .. })));
        assert!(files_for_order(&db, order.id).await?.is_empty());
        Ok(())
    }
}
