//! Driving port for reading the current inventory.

use async_trait::async_trait;

use crate::domain::{Error, InventoryItem};

/// Domain use-case port listing items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// Every item currently stored.
    async fn list_items(&self) -> Result<Vec<InventoryItem>, Error>;
}
