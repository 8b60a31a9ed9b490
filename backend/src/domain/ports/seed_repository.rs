//! Driven port for first-start default data.
//!
//! Seeding bypasses the audit trail: seeded items are the starting stock,
//! not client mutations.

use async_trait::async_trait;

use crate::domain::{InventoryItem, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while seeding default data.
    pub enum SeedRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "seed store connection failed: {message}",
        /// Insert failed.
        Query { message: String } => "seed store query failed: {message}",
    }
}

/// Port inserting default rows into empty collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Insert `users` if no user exists yet. Returns whether rows were written.
    async fn seed_users_if_empty(&self, users: &[User]) -> Result<bool, SeedRepositoryError>;

    /// Insert `items` if the inventory is empty. Returns whether rows were
    /// written.
    async fn seed_items_if_empty(
        &self,
        items: &[InventoryItem],
    ) -> Result<bool, SeedRepositoryError>;
}
