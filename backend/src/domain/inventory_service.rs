//! Inventory domain service.
//!
//! Implements the inventory driving ports on top of an
//! [`InventoryRepository`]. The service owns identity and time: it assigns
//! item ids, history entry ids and timestamps, then asks the repository to
//! apply each mutation together with its history entry.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    InventoryCommand, InventoryQuery, InventoryRepository, InventoryRepositoryError,
};
use crate::domain::{
    AuditStamp, Error, InventoryItem, ItemDraft, ItemId, ItemInput, ItemValidationError,
};

pub(crate) const PRODUCT_NOT_FOUND: &str = "Product not found";

fn map_repository_error(error: InventoryRepositoryError) -> Error {
    match error {
        InventoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("inventory repository unavailable: {message}"))
        }
        InventoryRepositoryError::Query { message } => {
            Error::internal(format!("inventory repository error: {message}"))
        }
    }
}

fn map_validation_error(error: ItemValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_detail(error.code())
}

/// Inventory service implementing [`InventoryCommand`] and
/// [`InventoryQuery`].
#[derive(Clone)]
pub struct InventoryService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> InventoryService<R> {
    /// Create a service over `repository`, stamping mutations with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn stamp(&self) -> AuditStamp {
        AuditStamp::at(self.clock.utc())
    }
}

#[async_trait]
impl<R> InventoryCommand for InventoryService<R>
where
    R: InventoryRepository,
{
    async fn create_item(&self, input: ItemInput) -> Result<InventoryItem, Error> {
        let draft = ItemDraft::try_from_input(input).map_err(map_validation_error)?;
        let item = InventoryItem::new(ItemId::random(), draft);

        let entry = self
            .repository
            .create(&item, self.stamp())
            .await
            .map_err(map_repository_error)?;

        info!(item_id = %item.id(), entry_id = %entry.id(), "inventory item added");
        Ok(item)
    }

    async fn update_item(&self, id: ItemId, input: ItemInput) -> Result<InventoryItem, Error> {
        let draft = ItemDraft::try_from_input(input).map_err(map_validation_error)?;
        let item = InventoryItem::new(id, draft);

        let entry = self
            .repository
            .update(&item, self.stamp())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))?;

        info!(item_id = %id, entry_id = %entry.id(), "inventory item updated");
        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let entry = self
            .repository
            .delete(&id, self.stamp())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))?;

        info!(item_id = %id, entry_id = %entry.id(), "inventory item deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> InventoryQuery for InventoryService<R>
where
    R: InventoryRepository,
{
    async fn list_items(&self) -> Result<Vec<InventoryItem>, Error> {
        self.repository
            .list_items()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
