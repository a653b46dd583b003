//! Draft Model

use serde::{Deserialize, Serialize};

/// Unpublished listing, joined with category, state and delivery labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Draft {
    pub id: i64,
    /// Display position; drafts are listed in ascending order
    pub sort_index: i64,
    pub name: String,
    pub category: Option<String>,
    /// Image file name in the draft image store
    pub image: String,
    /// Item condition label
    pub state: Option<String>,
    pub description: Option<String>,
    /// Delivery method label
    pub delivery: Option<String>,
    pub price: Option<i64>,
}

/// Create draft payload (text fields of the multipart form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftCreate {
    pub item_name: String,
    pub category: String,
    pub item_state_id: i64,
    pub description: String,
    pub delivery_id: i64,
    pub price: i64,
}

/// Swap the display positions of two drafts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DraftSwap {
    pub item_id1: i64,
    pub item_id2: i64,
}

/// `{"draft items": [...]}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftList {
    #[serde(rename = "draft items")]
    pub draft_items: Vec<Draft>,
}

/// Result of a draft creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftCreated {
    pub message: String,
    pub draft_id: i64,
    pub sort_index: i64,
}
