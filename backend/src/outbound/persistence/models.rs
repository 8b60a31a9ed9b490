//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain types through the validating constructors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{history_entries, inventory_items, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub user_name: String,
    pub password_hash: String,
    pub role: String,
}

/// Insertable user record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub user_name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Row read from `inventory_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = inventory_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InventoryItemRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub price: f64,
}

/// Insertable item record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = inventory_items)]
pub(crate) struct NewInventoryItemRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
    pub quantity: i32,
    pub price: f64,
}

/// Full replacement of an item's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = inventory_items)]
pub(crate) struct InventoryItemUpdate<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub quantity: i32,
    pub price: f64,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `history_entries`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = history_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryEntryRow {
    pub id: Uuid,
    pub action: String,
    pub product: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

/// Insertable history record; `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_entries)]
pub(crate) struct NewHistoryEntryRow<'a> {
    pub id: Uuid,
    pub action: &'a str,
    pub product: &'a serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}
