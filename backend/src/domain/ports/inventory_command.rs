//! Driving port for inventory mutations.
//!
//! Inbound adapters hand over raw [`ItemInput`] so coercion and validation
//! stay in the domain. Each successful call has appended exactly one history
//! entry by the time it returns.

use async_trait::async_trait;

use crate::domain::{Error, InventoryItem, ItemId, ItemInput};

/// Domain use-case port for creating, updating and deleting items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryCommand: Send + Sync {
    /// Validate `input`, store a new item and record `Added`.
    async fn create_item(&self, input: ItemInput) -> Result<InventoryItem, Error>;

    /// Replace every field of item `id` and record `Updated`.
    ///
    /// Fails with `NotFound` when the item does not exist.
    async fn update_item(&self, id: ItemId, input: ItemInput) -> Result<InventoryItem, Error>;

    /// Remove item `id` and record `Deleted` with its last state.
    ///
    /// Fails with `NotFound` when the item does not exist.
    async fn delete_item(&self, id: ItemId) -> Result<(), Error>;
}
