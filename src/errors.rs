//! Unified error type for the store, configuration, and driver layers.
//!
//! Access-control denials are not errors; they are values produced by
//! [`crate::core::guard`]. Everything here is an actual failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Order not found: {id}")]
    OrderNotFound { id: i64 },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    #[error("Unknown order status: {value}")]
    InvalidStatus { value: String },

    #[error("Cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Invalid file: {message}")]
    InvalidFile { message: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("A route guard needs at least one allowed role")]
    EmptyAllowList,

    #[error("No protected route configured for {path}")]
    RouteNotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
