//! Core logic - framework-agnostic access gate and order operations.

/// Order audit trail
pub mod audit;
/// Route guard decision and effect adapter
pub mod guard;
/// Security notice for temporary passwords
pub mod notice;
/// Order lifecycle and role-scoped queries
pub mod order;
/// Files attached to orders
pub mod order_file;
/// Profile store and typed profile view
pub mod profile;
/// Roles and landing pages
pub mod role;
/// Resolved authentication state and providers
pub mod session;
