//! PostgreSQL-backed `HistoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HistoryRepository, HistoryRepositoryError};
use crate::domain::{AuditStamp, HistoryAction, HistoryEntry, InventoryItem};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::HistoryEntryRow;
use super::pool::DbPool;
use super::schema::history_entries;

/// Diesel-backed implementation of the history repository port.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_entry(row: HistoryEntryRow) -> Result<HistoryEntry, HistoryRepositoryError> {
    let HistoryEntryRow {
        id,
        action,
        product,
        recorded_at,
    } = row;
    let action = action
        .parse::<HistoryAction>()
        .map_err(|err| HistoryRepositoryError::query(err.to_string()))?;
    let product: InventoryItem = serde_json::from_value(product)
        .map_err(|err| HistoryRepositoryError::query(format!("decode snapshot {id}: {err}")))?;
    Ok(HistoryEntry::record(
        AuditStamp {
            entry_id: id,
            recorded_at,
        },
        action,
        product,
    ))
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn list_entries(&self) -> Result<Vec<HistoryEntry>, HistoryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, HistoryRepositoryError::connection))?;

        let rows: Vec<HistoryEntryRow> = history_entries::table
            .order((
                history_entries::recorded_at.desc(),
                history_entries::seq.desc(),
            ))
            .select(HistoryEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    HistoryRepositoryError::query,
                    HistoryRepositoryError::connection,
                )
            })?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    fn row(action: &str, product: serde_json::Value) -> HistoryEntryRow {
        HistoryEntryRow {
            id: Uuid::new_v4(),
            action: action.to_owned(),
            product,
            recorded_at: Utc::now(),
        }
    }

    #[rstest]
    fn snapshot_rows_decode() {
        let item_id = Uuid::new_v4();
        let entry = row_to_entry(row(
            "Deleted",
            json!({
                "id": item_id,
                "name": "Lockstitch Machine",
                "category": "Sewing Machine",
                "quantity": 5,
                "price": 40000.0,
            }),
        ))
        .expect("valid row");
        assert_eq!(entry.action(), HistoryAction::Deleted);
        assert_eq!(entry.product().id().as_uuid(), &item_id);
    }

    #[rstest]
    #[case("Renamed", json!({}))]
    #[case("Added", json!({"name": "missing fields"}))]
    fn undecodable_rows_are_query_errors(
        #[case] action: &str,
        #[case] product: serde_json::Value,
    ) {
        let err = row_to_entry(row(action, product)).expect_err("invalid row");
        assert!(matches!(err, HistoryRepositoryError::Query { .. }));
    }
}
