//! Audit trail of inventory mutations.
//!
//! Every successful create, update or delete appends exactly one
//! [`HistoryEntry`] holding a snapshot of the item. Entries are never edited
//! or removed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::InventoryItem;

/// Kind of mutation recorded by a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum HistoryAction {
    /// The item was created.
    Added,
    /// The item's fields were replaced.
    Updated,
    /// The item was removed; the snapshot is its last state.
    Deleted,
}

impl HistoryAction {
    /// Canonical label, also used as the stored column value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored action label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown history action: {0}")]
pub struct UnknownHistoryAction(pub String);

impl FromStr for HistoryAction {
    type Err = UnknownHistoryAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Added" => Ok(Self::Added),
            "Updated" => Ok(Self::Updated),
            "Deleted" => Ok(Self::Deleted),
            other => Err(UnknownHistoryAction(other.to_owned())),
        }
    }
}

/// Identifier and time allotted to the history entry of one mutation.
///
/// The service mints the stamp before calling the repository so adapters
/// never invent ids or read clocks themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamp {
    /// Identifier of the entry to append.
    pub entry_id: Uuid,
    /// Time the mutation is recorded at.
    pub recorded_at: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp with a random entry id.
    #[must_use]
    pub fn at(recorded_at: DateTime<Utc>) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            recorded_at,
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: Uuid,
    action: HistoryAction,
    product: InventoryItem,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Record `action` against `product` using the supplied stamp.
    #[must_use]
    pub fn record(stamp: AuditStamp, action: HistoryAction, product: InventoryItem) -> Self {
        Self {
            id: stamp.entry_id,
            action,
            product,
            timestamp: stamp.recorded_at,
        }
    }

    /// Entry identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Recorded mutation kind.
    #[must_use]
    pub fn action(&self) -> HistoryAction {
        self.action
    }

    /// Snapshot of the item at the time of the mutation.
    #[must_use]
    pub fn product(&self) -> &InventoryItem {
        &self.product
    }

    /// When the mutation happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemDraft, ItemId};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(HistoryAction::Added)]
    #[case(HistoryAction::Updated)]
    #[case(HistoryAction::Deleted)]
    fn labels_parse_back(#[case] action: HistoryAction) {
        assert_eq!(action.as_str().parse::<HistoryAction>(), Ok(action));
        assert_eq!(
            serde_json::to_value(action).expect("json"),
            json!(action.as_str())
        );
    }

    #[rstest]
    fn lowercase_labels_are_not_actions() {
        assert_eq!(
            "added".parse::<HistoryAction>(),
            Err(UnknownHistoryAction("added".to_owned()))
        );
    }

    #[rstest]
    fn entry_serialises_snapshot_and_rfc3339_timestamp() {
        let recorded_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let stamp = AuditStamp::at(recorded_at);
        let item = InventoryItem::new(
            ItemId::random(),
            ItemDraft::new("Lockstitch Machine", "Sewing Machine", 5, 40000.0).expect("draft"),
        );
        let entry = HistoryEntry::record(stamp, HistoryAction::Deleted, item.clone());

        let value = serde_json::to_value(&entry).expect("json");
        assert_eq!(value["action"], json!("Deleted"));
        assert_eq!(value["timestamp"], json!("2026-03-01T09:30:00Z"));
        assert_eq!(value["product"]["quantity"], json!(5));
        assert_eq!(entry.id(), stamp.entry_id);
        assert_eq!(entry.product(), &item);
    }
}
