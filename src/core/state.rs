//! Identifier traits for state machine states and events.
//!
//! States and events are plain values: the machine only ever compares,
//! hashes, clones and names them. `String` implements both traits so a
//! machine can be driven entirely from a JSON document; closed enumerations
//! can be declared with [`state_enum!`](crate::state_enum) and
//! [`event_enum!`](crate::event_enum).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history entries
/// - `Eq` + `Hash`: States key the transition table
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: States appear in configs and checkpoints
///
/// # Example
///
/// ```rust
/// use fsm_history::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for events that drive transitions.
///
/// Same requirements as [`State`]; events key each state's transition table.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Get the event's name for display/logging.
    ///
    /// An empty name is treated as "no event" by
    /// [`StateMachine::states`](crate::StateMachine::states).
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
