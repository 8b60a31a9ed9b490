//! PostgreSQL-backed `SeedRepository`.
//!
//! Each collection is checked and filled inside one transaction holding a
//! table lock, so two instances starting together cannot both seed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SeedRepository, SeedRepositoryError};
use crate::domain::{InventoryItem, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_user_repository::user_to_row;
use super::models::NewInventoryItemRow;
use super::pool::DbPool;
use super::schema::{inventory_items, users};

/// Diesel-backed implementation of the seed repository port.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<diesel::result::Error> for SeedRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        map_diesel_error(
            error,
            SeedRepositoryError::query,
            SeedRepositoryError::connection,
        )
    }
}

fn item_rows(items: &[InventoryItem]) -> Result<Vec<NewInventoryItemRow<'_>>, SeedRepositoryError> {
    items
        .iter()
        .map(|item| {
            let quantity = i32::try_from(item.quantity())
                .map_err(|_| SeedRepositoryError::query("quantity exceeds column range"))?;
            Ok(NewInventoryItemRow {
                id: *item.id().as_uuid(),
                name: item.name(),
                category: item.category(),
                quantity,
                price: item.price(),
            })
        })
        .collect()
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn seed_users_if_empty(&self, seed: &[User]) -> Result<bool, SeedRepositoryError> {
        let rows: Vec<_> = seed.iter().map(user_to_row).collect();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SeedRepositoryError::connection))?;

        conn.transaction::<_, SeedRepositoryError, _>(|conn| {
            async move {
                diesel::sql_query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                    .execute(conn)
                    .await?;
                let existing: i64 = users::table.count().get_result(conn).await?;
                if existing > 0 {
                    return Ok(false);
                }
                diesel::insert_into(users::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
    }

    async fn seed_items_if_empty(
        &self,
        items: &[InventoryItem],
    ) -> Result<bool, SeedRepositoryError> {
        let rows = item_rows(items)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SeedRepositoryError::connection))?;

        conn.transaction::<_, SeedRepositoryError, _>(|conn| {
            async move {
                diesel::sql_query("LOCK TABLE inventory_items IN SHARE ROW EXCLUSIVE MODE")
                    .execute(conn)
                    .await?;
                let existing: i64 = inventory_items::table.count().get_result(conn).await?;
                if existing > 0 {
                    return Ok(false);
                }
                diesel::insert_into(inventory_items::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
    }
}
