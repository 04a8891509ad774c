//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures everything that changes over a machine's life: the
//! current state and the full undo/redo history. The configuration is not
//! part of it; a checkpoint is resumed against a configuration supplied by
//! the caller, and is checked against it first.

use crate::config::MachineConfig;
use crate::core::{Event, State, StateHistory};
use crate::machine::{MachineError, StateMachine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's mutable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial_state: S,

    /// Current state of the machine
    pub current_state: S,

    /// History including cursor position
    pub history: StateHistory<S>,
}

impl<S: State> Checkpoint<S> {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a checkpoint written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Serialize to the compact bincode format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode a checkpoint written by [`to_binary`](Self::to_binary).
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check the checkpoint against the configuration it will be resumed with.
    fn validate<E: Event>(&self, config: &MachineConfig<S, E>) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if self.initial_state != config.initial {
            return Err(CheckpointError::ValidationFailed(format!(
                "initial state `{}` does not match configured `{}`",
                self.initial_state.name(),
                config.initial.name()
            )));
        }

        if let Some(state) = std::iter::once(&self.current_state)
            .chain(self.history.get_path())
            .find(|state| !config.declares(state))
        {
            return Err(CheckpointError::ValidationFailed(format!(
                "state `{}` is not declared",
                state.name()
            )));
        }

        if let Some(reason) = self.history.inconsistency() {
            return Err(CheckpointError::ValidationFailed(reason));
        }

        // Only a fully undone history may leave the machine off its entries,
        // and then it sits on the initial state.
        let expected = match self.history.current() {
            Some(entry) => Some(&entry.state),
            None if !self.history.is_empty() => Some(&self.initial_state),
            None => None,
        };
        if let Some(expected) = expected {
            if *expected != self.current_state {
                return Err(CheckpointError::ValidationFailed(format!(
                    "current state `{}` does not match `{}` under the history cursor",
                    self.current_state.name(),
                    expected.name()
                )));
            }
        }

        Ok(())
    }
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Capture the current state and history.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        let checkpoint = Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial().clone(),
            current_state: self.state().clone(),
            history: self.history().clone(),
        };
        tracing::debug!(
            id = %checkpoint.id,
            state = checkpoint.current_state.name(),
            "checkpoint created"
        );
        checkpoint
    }

    /// Rebuild a machine from `config` and a previously taken checkpoint.
    pub fn resume(
        config: MachineConfig<S, E>,
        checkpoint: Checkpoint<S>,
    ) -> Result<Self, CheckpointError> {
        config.validate().map_err(MachineError::from)?;
        checkpoint.validate(&config)?;

        tracing::debug!(
            id = %checkpoint.id,
            state = checkpoint.current_state.name(),
            entries = checkpoint.history.len(),
            "resuming from checkpoint"
        );
        Ok(Self::restore(
            config,
            checkpoint.current_state,
            checkpoint.history,
        ))
    }
}
