//! Runtime errors raised by the state machine.

use crate::builder::BuildError;
use thiserror::Error;

/// Errors returned by [`StateMachine`](super::StateMachine) operations.
///
/// None of these leave the machine partially updated: state and history are
/// untouched whenever an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("Cannot create a state machine without a configuration")]
    ConfigMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] BuildError),

    #[error("Malformed configuration: {0}")]
    Parse(String),

    #[error("Undeclared state `{state}`")]
    UndeclaredState { state: String },

    #[error("Unknown event `{event}` for state `{state}`")]
    UnknownEvent { event: String, state: String },
}
