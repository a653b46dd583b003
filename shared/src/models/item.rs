//! Item Model

use serde::{Deserialize, Serialize};

/// Published item, joined with its category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Category name (`None` only if the category row went missing)
    pub category: Option<String>,
    /// Image file name in the item image store (`<sha256-hex>.jpg`)
    pub image: String,
}

/// Create item payload (text fields of the multipart form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub category: String,
}

/// `{"items": [...]}` envelope used by listing and search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}
