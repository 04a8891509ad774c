//! Core state machine types and logic.
//!
//! This module contains the building blocks the machine is made of:
//! - State and event identifiers via the `State` and `Event` traits
//! - The cursor-based history buffer used for undo/redo
//!
//! Nothing in this module knows about transition tables; that lives in
//! [`crate::config`].

mod history;
mod state;

pub use history::{EntryKind, HistoryEntry, StateHistory};
pub use state::{Event, State};
