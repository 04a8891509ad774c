//! fsm-history: a declarative finite state machine with undo/redo history.
//!
//! A machine is described by a configuration naming an initial state and,
//! for each declared state, the events it reacts to. The machine tracks the
//! current state and records every state it enters in a linear history that
//! can be walked backwards and forwards.
//!
//! # Core Concepts
//!
//! - **State** / **Event**: identifiers, either `String`s or closed enums
//!   declared with [`state_enum!`] and [`event_enum!`]
//! - **Configuration**: validated once, when the machine is built
//! - **History**: entries plus a cursor; a new forward move discards the
//!   undone future
//! - **Checkpoint**: serializable snapshot of state and history
//!
//! # Example
//!
//! ```rust
//! use fsm_history::{event_enum, state_enum, StateMachineBuilder};
//!
//! state_enum! {
//!     enum Light { Green, Yellow, Red }
//! }
//!
//! event_enum! {
//!     enum Signal { Next }
//! }
//!
//! let mut machine = StateMachineBuilder::new()
//!     .initial(Light::Green)
//!     .states([Light::Green, Light::Yellow, Light::Red])
//!     .transition(Light::Green, Signal::Next, Light::Yellow)
//!     .transition(Light::Yellow, Signal::Next, Light::Red)
//!     .transition(Light::Red, Signal::Next, Light::Green)
//!     .build()
//!     .unwrap();
//!
//! machine.trigger(&Signal::Next).unwrap();
//! machine.trigger(&Signal::Next).unwrap();
//! assert_eq!(machine.state(), &Light::Red);
//!
//! assert!(machine.undo());
//! assert_eq!(machine.state(), &Light::Yellow);
//!
//! // Moving forward again discards the undone step.
//! machine.change_state(Light::Green).unwrap();
//! assert!(!machine.redo());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{MachineConfig, StateDescriptor, StateTable};
pub use self::core::{EntryKind, Event, HistoryEntry, State, StateHistory};
pub use machine::{MachineError, StateMachine};
