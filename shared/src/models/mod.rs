//! Listing models
//!
//! Shared between the server and its web client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod draft;
pub mod item;

// Re-exports
pub use draft::*;
pub use item::*;
