//! Declarative machine configuration.
//!
//! A configuration names the initial state and, for every declared state,
//! the events it reacts to and where each one leads. It is immutable once a
//! machine is built from it.
//!
//! The JSON shape is:
//!
//! ```json
//! {
//!   "initial": "green",
//!   "states": {
//!     "green":  { "transitions": { "next": "yellow" } },
//!     "yellow": { "transitions": { "next": "red" } },
//!     "red":    { "transitions": { "next": "green" } }
//!   }
//! }
//! ```
//!
//! State declaration order is preserved; it is the order
//! [`StateMachine::states`](crate::StateMachine::states) reports.

mod table;

pub use table::StateTable;

use crate::builder::BuildError;
use crate::core::{Event, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transitions declared for a single state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateDescriptor<S: State, E: Event> {
    /// Event -> target state
    #[serde(default)]
    pub transitions: HashMap<E, S>,
}

impl<S: State, E: Event> Default for StateDescriptor<S, E> {
    fn default() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }
}

impl<S: State, E: Event> StateDescriptor<S, E> {
    /// Target of `event`, if this state declares it.
    pub fn target(&self, event: &E) -> Option<&S> {
        self.transitions.get(event)
    }

    /// Whether this state declares a transition for `event`.
    pub fn handles(&self, event: &E) -> bool {
        self.transitions.contains_key(event)
    }
}

/// Complete machine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineConfig<S: State = String, E: Event = String> {
    /// State the machine starts in and returns to on reset
    pub initial: S,
    /// Declared states, in declaration order
    pub states: StateTable<S, E>,
}

impl<S: State, E: Event> MachineConfig<S, E> {
    /// Create a configuration from its parts without validating it.
    pub fn new(initial: S, states: StateTable<S, E>) -> Self {
        Self { initial, states }
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Render the configuration as pretty-printed JSON, in declaration order.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the configuration is internally consistent.
    ///
    /// Rejects an empty state table, an undeclared initial state and any
    /// transition whose target is not declared.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        if !self.states.contains(&self.initial) {
            return Err(BuildError::UndeclaredInitial {
                state: self.initial.name().to_string(),
            });
        }

        for (from, descriptor) in self.states.iter() {
            for (event, to) in &descriptor.transitions {
                if !self.states.contains(to) {
                    return Err(BuildError::UndeclaredTarget {
                        from: from.name().to_string(),
                        event: event.name().to_string(),
                        to: to.name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether `state` is declared.
    pub fn declares(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Target of `event` from `state`.
    pub fn target(&self, state: &S, event: &E) -> Option<&S> {
        self.states.get(state).and_then(|d| d.target(event))
    }
}
