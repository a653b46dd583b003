//! market-server - listing backend for the marketplace web client
//!
//! - Items: published listings with a category and an image
//! - Drafts: unpublished listings with a user-controlled display order
//! - Images: write-once JPEG stores with a default fallback

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod image_store;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;
