//! PostgreSQL-backed `InventoryRepository`.
//!
//! Each mutation runs the item write and the history insert inside one
//! transaction, so a failed audit append rolls the item change back.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{InventoryRepository, InventoryRepositoryError};
use crate::domain::{
    AuditStamp, HistoryAction, HistoryEntry, InventoryItem, ItemDraft, ItemId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    InventoryItemRow, InventoryItemUpdate, NewHistoryEntryRow, NewInventoryItemRow,
};
use super::pool::DbPool;
use super::schema::{history_entries, inventory_items};

/// Diesel-backed implementation of the inventory repository port.
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<diesel::result::Error> for InventoryRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        map_diesel_error(
            error,
            InventoryRepositoryError::query,
            InventoryRepositoryError::connection,
        )
    }
}

pub(super) fn row_to_item(row: InventoryItemRow) -> Result<InventoryItem, String> {
    let quantity = u32::try_from(row.quantity)
        .map_err(|_| format!("stored quantity {} is negative", row.quantity))?;
    let draft = ItemDraft::new(&row.name, &row.category, quantity, row.price)
        .map_err(|err| format!("stored item {} is invalid: {err}", row.id))?;
    Ok(InventoryItem::new(ItemId::from_uuid(row.id), draft))
}

fn stored_quantity(item: &InventoryItem) -> Result<i32, InventoryRepositoryError> {
    i32::try_from(item.quantity())
        .map_err(|_| InventoryRepositoryError::query("quantity exceeds column range"))
}

fn encode_snapshot(item: &InventoryItem) -> Result<serde_json::Value, InventoryRepositoryError> {
    serde_json::to_value(item)
        .map_err(|err| InventoryRepositoryError::query(format!("encode snapshot: {err}")))
}

#[async_trait]
impl InventoryRepository for DieselInventoryRepository {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, InventoryRepositoryError::connection))?;

        let rows: Vec<InventoryItemRow> = inventory_items::table
            .order((inventory_items::created_at.asc(), inventory_items::id.asc()))
            .select(InventoryItemRow::as_select())
            .load(&mut conn)
            .await?;

        rows.into_iter()
            .map(|row| row_to_item(row).map_err(InventoryRepositoryError::query))
            .collect()
    }

    async fn create(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<HistoryEntry, InventoryRepositoryError> {
        let quantity = stored_quantity(item)?;
        let snapshot = encode_snapshot(item)?;
        let new_item = NewInventoryItemRow {
            id: *item.id().as_uuid(),
            name: item.name(),
            category: item.category(),
            quantity,
            price: item.price(),
        };
        let new_entry = NewHistoryEntryRow {
            id: stamp.entry_id,
            action: HistoryAction::Added.as_str(),
            product: &snapshot,
            recorded_at: stamp.recorded_at,
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, InventoryRepositoryError::connection))?;

        conn.transaction::<_, InventoryRepositoryError, _>(|conn| {
            async move {
                diesel::insert_into(inventory_items::table)
                    .values(&new_item)
                    .execute(conn)
                    .await?;
                diesel::insert_into(history_entries::table)
                    .values(&new_entry)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        Ok(HistoryEntry::record(stamp, HistoryAction::Added, item.clone()))
    }

    async fn update(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError> {
        let quantity = stored_quantity(item)?;
        let snapshot = encode_snapshot(item)?;
        let id = *item.id().as_uuid();
        let changes = InventoryItemUpdate {
            name: item.name(),
            category: item.category(),
            quantity,
            price: item.price(),
            updated_at: Utc::now(),
        };
        let new_entry = NewHistoryEntryRow {
            id: stamp.entry_id,
            action: HistoryAction::Updated.as_str(),
            product: &snapshot,
            recorded_at: stamp.recorded_at,
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, InventoryRepositoryError::connection))?;

        let updated = conn
            .transaction::<_, InventoryRepositoryError, _>(|conn| {
                async move {
                    let rows = diesel::update(inventory_items::table.find(id))
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    if rows == 0 {
                        return Ok(false);
                    }
                    diesel::insert_into(history_entries::table)
                        .values(&new_entry)
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await?;

        Ok(updated.then(|| HistoryEntry::record(stamp, HistoryAction::Updated, item.clone())))
    }

    async fn delete(
        &self,
        id: &ItemId,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError> {
        let id = *id.as_uuid();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, InventoryRepositoryError::connection))?;

        conn.transaction::<_, InventoryRepositoryError, _>(|conn| {
            async move {
                let Some(row) = diesel::delete(inventory_items::table.find(id))
                    .returning(InventoryItemRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };
                let removed = row_to_item(row).map_err(InventoryRepositoryError::query)?;
                let snapshot = encode_snapshot(&removed)?;
                diesel::insert_into(history_entries::table)
                    .values(&NewHistoryEntryRow {
                        id: stamp.entry_id,
                        action: HistoryAction::Deleted.as_str(),
                        product: &snapshot,
                        recorded_at: stamp.recorded_at,
                    })
                    .execute(conn)
                    .await?;
                Ok(Some(HistoryEntry::record(
                    stamp,
                    HistoryAction::Deleted,
                    removed,
                )))
            }
            .scope_boxed()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(quantity: i32, name: &str) -> InventoryItemRow {
        InventoryItemRow {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            category: "Fabric".to_owned(),
            quantity,
            price: 4000.0,
        }
    }

    #[rstest]
    fn rows_convert_to_items() {
        let item = row_to_item(row(50, "Cotton Fabric")).expect("valid row");
        assert_eq!(item.quantity(), 50);
        assert_eq!(item.name(), "Cotton Fabric");
    }

    #[rstest]
    #[case(-1, "Cotton Fabric")]
    #[case(5, "  ")]
    fn corrupt_rows_are_reported(#[case] quantity: i32, #[case] name: &str) {
        assert!(row_to_item(row(quantity, name)).is_err());
    }

    #[rstest]
    fn diesel_errors_convert_to_query_errors() {
        let err = InventoryRepositoryError::from(diesel::result::Error::NotFound);
        assert_eq!(err, InventoryRepositoryError::query("record not found"));
    }
}
