//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and macros for declaring states,
//! events and transitions in code instead of a JSON document.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
