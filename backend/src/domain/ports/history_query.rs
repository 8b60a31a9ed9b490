//! Driving port for reading the audit trail.

use async_trait::async_trait;

use crate::domain::{Error, HistoryEntry};

/// Domain use-case port listing history entries newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Every history entry, newest first.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, Error>;
}
