//! Driven port for inventory persistence with an attached audit trail.
//!
//! Every mutating method applies the change and appends the matching
//! [`HistoryEntry`] as one atomic unit: adapters must either persist both or
//! neither. The returned entry is the one that was appended.

use async_trait::async_trait;

use crate::domain::{AuditStamp, HistoryEntry, InventoryItem, ItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by inventory repository adapters.
    pub enum InventoryRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "inventory store connection failed: {message}",
        /// A read, write or snapshot encoding failed.
        Query { message: String } => "inventory store query failed: {message}",
    }
}

/// Port for reading items and applying audited mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// All items in the store's natural order.
    async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryRepositoryError>;

    /// Insert `item` and append an `Added` entry.
    async fn create(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<HistoryEntry, InventoryRepositoryError>;

    /// Replace the stored fields of `item.id()` and append an `Updated` entry.
    ///
    /// Returns `None`, appending nothing, when the id is unknown.
    async fn update(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError>;

    /// Remove the item and append a `Deleted` entry holding its last state.
    ///
    /// Returns `None`, appending nothing, when the id is unknown.
    async fn delete(
        &self,
        id: &ItemId,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn errors_render_their_message() {
        let err = InventoryRepositoryError::query("duplicate key");
        assert_eq!(err.to_string(), "inventory store query failed: duplicate key");
    }
}
