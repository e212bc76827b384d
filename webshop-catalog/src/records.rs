//! Change-tracked record wrappers for batch writes.
//!
//! The reconciler in `webshop-db` applies only the records whose state says
//! they need work: `Added` records are inserted and receive their
//! server-assigned id, `Modified` records are rewritten in full, and
//! `Unchanged`/`Deleted` records are skipped. After a successful write the
//! reconciler calls [`Record::accept`] to mark the record clean.

use serde::{Deserialize, Serialize};

/// Per-record change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    Unchanged,
    Added,
    Modified,
    Deleted,
}

/// A catalog record plus its change state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub data: T,
    pub state: RecordState,
}

impl<T> Record<T> {
    /// A record that does not yet exist in the store.
    pub fn added(data: T) -> Self {
        Self {
            data,
            state: RecordState::Added,
        }
    }

    /// An existing record whose fields should be rewritten.
    pub fn modified(data: T) -> Self {
        Self {
            data,
            state: RecordState::Modified,
        }
    }

    /// An existing record already in sync with the store.
    pub fn unchanged(data: T) -> Self {
        Self {
            data,
            state: RecordState::Unchanged,
        }
    }

    /// A record marked for deletion. The reconciler skips these; deletion is
    /// a separate single-row operation.
    pub fn deleted(data: T) -> Self {
        Self {
            data,
            state: RecordState::Deleted,
        }
    }

    /// Whether the reconciler has work to do for this record.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, RecordState::Added | RecordState::Modified)
    }

    /// Mark the record as applied to the store.
    pub fn accept(&mut self) {
        self.state = RecordState::Unchanged;
    }
}
