//! Snapshot-based linear undo/redo log
//!
//! A single array of full snapshots with a cursor. Adding an entry while
//! the cursor sits behind the tail truncates the forward branch first, the
//! standard undo-then-new-edit behavior. Once the log exceeds its cap the
//! oldest entry is evicted and the cursor shifts back with it.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Default maximum number of retained entries
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Tag identifying what kind of mutation produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryAction {
    Initialize,
    SetValue,
    AddVersion,
    AddZone,
    SetEfficacy,
    AddGroup,
    RemoveGroup,
    UpdateGroup,
    Import,
}

/// One recorded state, with enough metadata to describe it in a history panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry<S> {
    pub id: String,
    pub timestamp: Timestamp,
    pub action: HistoryAction,
    pub description: String,
    pub snapshot: S,
}

/// Linear snapshot log with a movable cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLog<S> {
    entries: Vec<HistoryEntry<S>>,
    /// Position of the current snapshot; `None` while the log is empty
    cursor: Option<usize>,
    cap: usize,
    next_id: u64,
}

impl<S: Clone> Default for HistoryLog<S> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl<S: Clone> HistoryLog<S> {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            cap: cap.max(1),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry<S>] {
        &self.entries
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Record a new snapshot as the current state.
    ///
    /// Truncates any redo branch, then evicts the oldest entry if the cap
    /// is exceeded.
    pub fn add_entry(&mut self, action: HistoryAction, description: impl Into<String>, snapshot: S) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        } else {
            self.entries.clear();
        }

        self.entries.push(HistoryEntry {
            id: format!("h{}", self.next_id),
            timestamp: Timestamp::now(),
            action,
            description: description.into(),
            snapshot,
        });
        self.next_id += 1;
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.cap {
            self.entries.remove(0);
            self.cursor = Some(self.entries.len() - 1);
        }
    }

    /// Step the cursor back and return the snapshot now current; `None` at
    /// the boundary (no-op, not an error)
    pub fn undo(&mut self) -> Option<&S> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).map(|e| &e.snapshot)
    }

    /// Step the cursor forward and return the snapshot now current; `None`
    /// at the boundary (no-op, not an error)
    pub fn redo(&mut self) -> Option<&S> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1).map(|e| &e.snapshot)
    }

    /// The snapshot at the cursor, if any
    #[must_use]
    pub fn current(&self) -> Option<&S> {
        self.cursor.and_then(|c| self.entries.get(c)).map(|e| &e.snapshot)
    }
}
