//! History query service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{HistoryQuery, HistoryRepository, HistoryRepositoryError};
use crate::domain::{Error, HistoryEntry};

fn map_repository_error(error: HistoryRepositoryError) -> Error {
    match error {
        HistoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("history repository unavailable: {message}"))
        }
        HistoryRepositoryError::Query { message } => {
            Error::internal(format!("history repository error: {message}"))
        }
    }
}

/// Read-only service over the audit trail.
#[derive(Clone)]
pub struct HistoryService<R> {
    repository: Arc<R>,
}

impl<R> HistoryService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> HistoryQuery for HistoryService<R>
where
    R: HistoryRepository,
{
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, Error> {
        self.repository
            .list_entries()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockHistoryRepository;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn undecodable_snapshots_surface_as_internal_errors() {
        let mut repo = MockHistoryRepository::new();
        repo.expect_list_entries()
            .times(1)
            .returning(|| Err(HistoryRepositoryError::query("invalid snapshot")));

        let err = HistoryService::new(Arc::new(repo))
            .list_history()
            .await
            .expect_err("query failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_trail_lists_nothing() {
        let mut repo = MockHistoryRepository::new();
        repo.expect_list_entries().times(1).returning(|| Ok(Vec::new()));

        let entries = HistoryService::new(Arc::new(repo))
            .list_history()
            .await
            .expect("listed");
        assert!(entries.is_empty());
    }
}
