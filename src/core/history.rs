//! Linear state history with an undo/redo cursor.
//!
//! The history records every state entered through a forward mutation
//! (`change_state`, `trigger` or `reset`). A cursor marks the entry the
//! machine currently sits on; undo and redo move the cursor without adding
//! entries, and a new forward mutation discards everything after it.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a history entry came to be recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Direct jump via `change_state`
    Changed,
    /// Transition fired by the named event
    Triggered { event: String },
    /// Return to the initial state via `reset`
    Reset,
}

/// A single recorded state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryEntry<S: State> {
    /// The state that was entered
    pub state: S,
    /// The mutation that entered it
    pub kind: EntryKind,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl<S: State> HistoryEntry<S> {
    /// Create an entry stamped with the current time.
    pub fn new(state: S, kind: EntryKind) -> Self {
        Self {
            state,
            kind,
            recorded_at: Utc::now(),
        }
    }
}

/// Ordered history of entered states plus an undo/redo cursor.
///
/// `cursor` is `None` when there is nothing to undo: either nothing was
/// recorded yet, or every entry has been undone.
///
/// # Example
///
/// ```rust
/// use fsm_history::core::{EntryKind, HistoryEntry, StateHistory};
///
/// let mut history = StateHistory::new();
/// history.record(HistoryEntry::new("a".to_string(), EntryKind::Changed));
/// history.record(HistoryEntry::new("b".to_string(), EntryKind::Changed));
///
/// assert!(history.step_back());
/// assert_eq!(history.current().map(|e| e.state.as_str()), Some("a"));
///
/// // A new entry discards the undone future.
/// history.record(HistoryEntry::new("c".to_string(), EntryKind::Changed));
/// assert!(!history.can_redo());
/// assert_eq!(history.get_path(), vec!["a", "c"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    entries: Vec<HistoryEntry<S>>,
    cursor: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            limit: None,
        }
    }

    /// Create a history that keeps at most `limit` entries.
    ///
    /// A limit of zero means unbounded.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: (limit > 0).then_some(limit),
            ..Self::new()
        }
    }

    /// Record a new entry.
    ///
    /// Entries after the cursor (the redo future) are discarded first, then
    /// the entry is appended and the cursor moves onto it. When every entry
    /// has been undone, the whole buffer is discarded.
    pub fn record(&mut self, entry: HistoryEntry<S>) {
        let keep = self.next_index();
        if keep < self.entries.len() {
            tracing::trace!(
                kept = keep,
                discarded = self.entries.len() - keep,
                "truncating redo history"
            );
            self.entries.truncate(keep);
        }

        self.entries.push(entry);

        if let Some(limit) = self.limit.filter(|&limit| limit > 0) {
            let excess = self.entries.len().saturating_sub(limit);
            if excess > 0 {
                self.entries.drain(..excess);
                tracing::warn!(
                    limit,
                    evicted = excess,
                    "history limit reached, evicting oldest entries"
                );
            }
        }

        self.cursor = self.entries.len().checked_sub(1);
    }

    /// Move the cursor one entry back.
    ///
    /// Returns `false` when the cursor is already before the first entry.
    /// Stepping back from the first entry leaves the cursor at `None`.
    pub fn step_back(&mut self) -> bool {
        match self.cursor {
            Some(index) => {
                self.cursor = index.checked_sub(1);
                true
            }
            None => false,
        }
    }

    /// Move the cursor one entry forward and return the entry it lands on.
    ///
    /// Returns `None`, leaving the cursor alone, when there is no entry
    /// after the cursor.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry<S>> {
        let next = self.next_index();
        let entry = self.entries.get(next)?;
        self.cursor = Some(next);
        Some(entry)
    }

    /// The entry under the cursor, if any.
    pub fn current(&self) -> Option<&HistoryEntry<S>> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    /// Whether [`step_back`](Self::step_back) would move.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether [`step_forward`](Self::step_forward) would move.
    pub fn can_redo(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    /// Drop every entry and reset the cursor. The limit is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Configured entry limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// All recorded entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry<S>] {
        &self.entries
    }

    /// Number of recorded entries, including undone ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded states in order, ignoring the cursor.
    pub fn get_path(&self) -> Vec<&S> {
        self.entries.iter().map(|entry| &entry.state).collect()
    }

    /// Time elapsed between the first and last recorded entry.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.recorded_at.signed_duration_since(first.recorded_at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Describe why a deserialized history breaks its own invariants.
    ///
    /// The cursor must point at an entry, and a limit must be non-zero and
    /// not already exceeded.
    pub(crate) fn inconsistency(&self) -> Option<String> {
        if let Some(index) = self.cursor {
            if index >= self.entries.len() {
                return Some(format!(
                    "history cursor {index} out of range for {} entries",
                    self.entries.len()
                ));
            }
        }

        match self.limit {
            Some(0) => Some("history limit must be greater than zero".to_string()),
            Some(limit) if self.entries.len() > limit => Some(format!(
                "history holds {} entries, above its limit of {limit}",
                self.entries.len()
            )),
            _ => None,
        }
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |index| index + 1)
    }
}
