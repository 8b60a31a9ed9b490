//! Wire types exchanged with the backend.
//!
//! These mirror the JSON bodies rather than the backend's domain types so the
//! client compiles without depending on the server crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory item as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text category.
    pub category: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

/// Fields sent when adding or replacing an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Display name.
    pub name: String,
    /// Free-text category.
    pub category: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

/// Mutation recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryAction {
    /// Item created.
    Added,
    /// Item replaced.
    Updated,
    /// Item removed.
    Deleted,
}

/// One audit record with the item snapshot taken at mutation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Entry identifier.
    pub id: String,
    /// Recorded mutation kind.
    pub action: HistoryAction,
    /// Item snapshot.
    pub product: InventoryItem,
    /// When the mutation happened.
    pub timestamp: DateTime<Utc>,
}

/// Public user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Login handle.
    pub user_name: String,
    /// `admin` or `employee`.
    pub role: String,
}

/// Registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Login handle.
    pub user_name: String,
    /// Plain password, sent once over the wire.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Token echoed back as a bearer header.
    pub token: String,
    /// Authenticated user.
    pub user: UserProfile,
}
