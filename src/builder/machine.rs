//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{MachineConfig, StateDescriptor, StateTable};
use crate::core::{Event, State};
use crate::machine::{MachineError, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// States are declared in call order, which is the order
/// [`StateMachine::states`] reports them in. A transition implicitly declares
/// its source state; its target must be declared somewhere in the builder.
pub struct StateMachineBuilder<S: State = String, E: Event = String> {
    initial: Option<S>,
    states: StateTable<S, E>,
    history_limit: Option<usize>,
    error: Option<BuildError>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: StateTable::new(),
            history_limit: None,
            error: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state. Declaring the same state twice fails at build time.
    pub fn state(mut self, state: S) -> Self {
        let name = state.name().to_string();
        let duplicate = self.states.insert(state, StateDescriptor::default()).is_err();
        if duplicate && self.error.is_none() {
            self.error = Some(BuildError::DuplicateState { state: name });
        }
        self
    }

    /// Declare multiple states at once.
    pub fn states(self, states: impl IntoIterator<Item = S>) -> Self {
        states.into_iter().fold(self, Self::state)
    }

    /// Add a transition from `from` to `to` on `event`.
    ///
    /// A later transition for the same state and event replaces an earlier one.
    pub fn transition(mut self, from: S, event: E, to: S) -> Self {
        if !self.states.contains(&from) {
            let _ = self.states.insert(from.clone(), StateDescriptor::default());
        }
        if let Some(descriptor) = self.states.get_mut(&from) {
            descriptor.transitions.insert(event, to);
        }
        self
    }

    /// Bound the machine's history to `limit` entries.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build and validate the configuration only.
    pub fn build_config(self) -> Result<MachineConfig<S, E>, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let config = MachineConfig::new(initial, self.states);
        config.validate()?;
        Ok(config)
    }

    /// Build the state machine.
    pub fn build(self) -> Result<StateMachine<S, E>, MachineError> {
        let history_limit = self.history_limit;
        let config = self.build_config()?;
        match history_limit {
            Some(limit) => StateMachine::with_history_limit(config, limit),
            None => StateMachine::new(config),
        }
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
