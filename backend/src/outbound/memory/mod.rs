//! In-process store implementing every persistence port.
//!
//! Used when no database URL is configured and by the HTTP test suites. All
//! collections sit behind a single mutex, so an item mutation and its history
//! append happen under one lock acquisition and no reader can observe one
//! without the other. Contents are lost when the process exits.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    HistoryRepository, HistoryRepositoryError, InventoryRepository, InventoryRepositoryError,
    SeedRepository, SeedRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{AuditStamp, HistoryAction, HistoryEntry, InventoryItem, ItemId, User};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    items: Vec<InventoryItem>,
    history: Vec<HistoryEntry>,
}

impl Collections {
    fn append(
        &mut self,
        stamp: AuditStamp,
        action: HistoryAction,
        product: InventoryItem,
    ) -> HistoryEntry {
        let entry = HistoryEntry::record(stamp, action, product);
        self.history.push(entry.clone());
        entry
    }
}

/// Mutex-guarded collections of users, items and history entries.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Collections>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, Collections>> {
        self.inner.lock().ok()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| InventoryRepositoryError::query(POISONED))?;
        Ok(state.items.clone())
    }

    async fn create(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<HistoryEntry, InventoryRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| InventoryRepositoryError::query(POISONED))?;
        if state.items.iter().any(|stored| stored.id() == item.id()) {
            return Err(InventoryRepositoryError::query(format!(
                "item {} already exists",
                item.id()
            )));
        }
        state.items.push(item.clone());
        Ok(state.append(stamp, HistoryAction::Added, item.clone()))
    }

    async fn update(
        &self,
        item: &InventoryItem,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| InventoryRepositoryError::query(POISONED))?;
        let Some(slot) = state
            .items
            .iter_mut()
            .find(|stored| stored.id() == item.id())
        else {
            return Ok(None);
        };
        *slot = item.clone();
        Ok(Some(state.append(stamp, HistoryAction::Updated, item.clone())))
    }

    async fn delete(
        &self,
        id: &ItemId,
        stamp: AuditStamp,
    ) -> Result<Option<HistoryEntry>, InventoryRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| InventoryRepositoryError::query(POISONED))?;
        let Some(position) = state.items.iter().position(|stored| stored.id() == *id) else {
            return Ok(None);
        };
        let removed = state.items.remove(position);
        Ok(Some(state.append(stamp, HistoryAction::Deleted, removed)))
    }
}

#[async_trait]
impl HistoryRepository for InMemoryStore {
    async fn list_entries(&self) -> Result<Vec<HistoryEntry>, HistoryRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| HistoryRepositoryError::query(POISONED))?;
        // Reverse first so the stable sort keeps later appends ahead on ties.
        let mut entries: Vec<HistoryEntry> = state.history.iter().rev().cloned().collect();
        entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Ok(entries)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.iter().find(|user| user.email() == email).cloned())
    }

    async fn exists_with(
        &self,
        email: &str,
        user_name: &str,
    ) -> Result<bool, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .users
            .iter()
            .any(|user| user.email() == email || user.user_name() == user_name))
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if state.users.iter().any(|stored| stored.email() == user.email()) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        if state
            .users
            .iter()
            .any(|stored| stored.user_name() == user.user_name())
        {
            return Err(UserPersistenceError::duplicate("userName"));
        }
        state.users.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl SeedRepository for InMemoryStore {
    async fn seed_users_if_empty(&self, users: &[User]) -> Result<bool, SeedRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| SeedRepositoryError::query(POISONED))?;
        if !state.users.is_empty() {
            return Ok(false);
        }
        state.users.extend_from_slice(users);
        Ok(true)
    }

    async fn seed_items_if_empty(
        &self,
        items: &[InventoryItem],
    ) -> Result<bool, SeedRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| SeedRepositoryError::query(POISONED))?;
        if !state.items.is_empty() {
            return Ok(false);
        }
        state.items.extend_from_slice(items);
        Ok(true)
    }
}
