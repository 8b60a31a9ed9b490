//! Driven port for reading the audit trail.

use async_trait::async_trait;

use crate::domain::HistoryEntry;

use super::define_port_error;

define_port_error! {
    /// Errors raised by history repository adapters.
    pub enum HistoryRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "history store connection failed: {message}",
        /// The read failed or a stored snapshot could not be decoded.
        Query { message: String } => "history store query failed: {message}",
    }
}

/// Port for listing history entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Every entry, newest first.
    ///
    /// Entries sharing a timestamp are ordered by insertion, latest first.
    async fn list_entries(&self) -> Result<Vec<HistoryEntry>, HistoryRepositoryError>;
}
