//! Build errors for machine configurations.

use thiserror::Error;

/// Errors that can occur when building or validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Declare at least one state")]
    NoStates,

    #[error("State `{state}` is declared more than once")]
    DuplicateState { state: String },

    #[error("Initial state `{state}` is not declared")]
    UndeclaredInitial { state: String },

    #[error("Transition `{from}` --{event}--> `{to}` targets an undeclared state")]
    UndeclaredTarget {
        from: String,
        event: String,
        to: String,
    },
}
