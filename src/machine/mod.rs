//! The state machine: current state, configuration and undo/redo history.

pub mod error;

pub use error::MachineError;

use crate::config::MachineConfig;
use crate::core::{EntryKind, Event, HistoryEntry, State, StateHistory};

/// Finite state machine with a linear undo/redo history.
///
/// The configuration is validated once, at construction, so every state the
/// machine can reach through `change_state`, `trigger`, `reset`, `undo` or
/// `redo` is a declared state.
///
/// # Example
///
/// ```rust
/// use fsm_history::StateMachine;
///
/// let mut machine: StateMachine = StateMachine::from_json_str(r#"{
///     "initial": "green",
///     "states": {
///         "green":  { "transitions": { "next": "yellow" } },
///         "yellow": { "transitions": { "next": "red" } },
///         "red":    { "transitions": { "next": "green" } }
///     }
/// }"#).unwrap();
///
/// machine.trigger(&"next".to_string()).unwrap();
/// assert_eq!(machine.state(), "yellow");
///
/// assert!(machine.undo());
/// assert_eq!(machine.state(), "green");
/// assert!(machine.redo());
/// assert_eq!(machine.state(), "yellow");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S: State = String, E: Event = String> {
    config: MachineConfig<S, E>,
    current: S,
    history: StateHistory<S>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a machine in the configuration's initial state.
    ///
    /// The initial state is not recorded in history.
    pub fn new(config: MachineConfig<S, E>) -> Result<Self, MachineError> {
        Self::with_history(config, StateHistory::new())
    }

    /// Create a machine whose history keeps at most `limit` entries.
    pub fn with_history_limit(
        config: MachineConfig<S, E>,
        limit: usize,
    ) -> Result<Self, MachineError> {
        Self::with_history(config, StateHistory::with_limit(limit))
    }

    /// Create a machine from a configuration that may be absent.
    pub fn from_optional(config: Option<MachineConfig<S, E>>) -> Result<Self, MachineError> {
        config.ok_or(MachineError::ConfigMissing).and_then(Self::new)
    }

    /// Create a machine from a JSON configuration document.
    ///
    /// A `null` document is reported as [`MachineError::ConfigMissing`].
    pub fn from_json_str(json: &str) -> Result<Self, MachineError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| MachineError::Parse(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Create a machine from a parsed JSON configuration.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, MachineError> {
        if value.is_null() {
            return Err(MachineError::ConfigMissing);
        }
        let config = MachineConfig::from_json_value(value)
            .map_err(|e| MachineError::Parse(e.to_string()))?;
        Self::new(config)
    }

    pub(crate) fn with_history(
        config: MachineConfig<S, E>,
        history: StateHistory<S>,
    ) -> Result<Self, MachineError> {
        config.validate()?;
        let current = config.initial.clone();
        tracing::debug!(
            initial = current.name(),
            states = config.states.len(),
            "state machine created"
        );
        Ok(Self {
            config,
            current,
            history,
        })
    }

    pub(crate) fn restore(
        config: MachineConfig<S, E>,
        current: S,
        history: StateHistory<S>,
    ) -> Self {
        Self {
            config,
            current,
            history,
        }
    }

    /// Current state.
    pub fn state(&self) -> &S {
        &self.current
    }

    /// State the machine started in.
    pub fn initial(&self) -> &S {
        &self.config.initial
    }

    /// The validated configuration the machine was built from.
    pub fn config(&self) -> &MachineConfig<S, E> {
        &self.config
    }

    /// Recorded history and its undo/redo cursor.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Jump directly to `target`, ignoring transitions.
    pub fn change_state(&mut self, target: S) -> Result<(), MachineError> {
        if !self.config.declares(&target) {
            return Err(MachineError::UndeclaredState {
                state: target.name().to_string(),
            });
        }
        self.enter(target, EntryKind::Changed);
        Ok(())
    }

    /// Fire `event` from the current state and return the new state.
    pub fn trigger(&mut self, event: &E) -> Result<&S, MachineError> {
        let target = self
            .config
            .target(&self.current, event)
            .cloned()
            .ok_or_else(|| MachineError::UnknownEvent {
                event: event.name().to_string(),
                state: self.current.name().to_string(),
            })?;

        self.enter(
            target,
            EntryKind::Triggered {
                event: event.name().to_string(),
            },
        );
        Ok(&self.current)
    }

    /// Return to the initial state. The reset is recorded in history.
    pub fn reset(&mut self) {
        let initial = self.config.initial.clone();
        self.enter(initial, EntryKind::Reset);
    }

    /// Declared states, in declaration order.
    ///
    /// With an event, only the states that declare a transition for it are
    /// returned. An event with an empty name counts as no event.
    pub fn states(&self, event: Option<&E>) -> Vec<&S> {
        match event.filter(|e| !e.name().is_empty()) {
            Some(event) => self
                .config
                .states
                .iter()
                .filter(|(_, descriptor)| descriptor.handles(event))
                .map(|(state, _)| state)
                .collect(),
            None => self.config.states.names().collect(),
        }
    }

    /// Events the current state declares a transition for.
    pub fn available_events(&self) -> Vec<&E> {
        self.config
            .states
            .get(&self.current)
            .map(|descriptor| descriptor.transitions.keys().collect())
            .unwrap_or_default()
    }

    /// Whether the current state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.config
            .states
            .get(&self.current)
            .map_or(true, |descriptor| descriptor.transitions.is_empty())
    }

    /// Step back one history entry.
    ///
    /// Returns `false` if there is nothing to undo. Undoing the first
    /// recorded entry returns the machine to its initial state.
    pub fn undo(&mut self) -> bool {
        if !self.history.step_back() {
            tracing::debug!(state = self.current.name(), "nothing to undo");
            return false;
        }

        let previous = self
            .history
            .current()
            .map_or_else(|| self.config.initial.clone(), |entry| entry.state.clone());
        tracing::debug!(
            from = self.current.name(),
            to = previous.name(),
            cursor = ?self.history.cursor(),
            "undo"
        );
        self.current = previous;
        true
    }

    /// Re-apply the next undone history entry.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.step_forward().map(|entry| entry.state.clone()) else {
            tracing::debug!(state = self.current.name(), "nothing to redo");
            return false;
        };
        tracing::debug!(
            from = self.current.name(),
            to = next.name(),
            cursor = ?self.history.cursor(),
            "redo"
        );
        self.current = next;
        true
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forget all history. The current state is kept.
    pub fn clear_history(&mut self) {
        tracing::debug!(discarded = self.history.len(), "history cleared");
        self.history.clear();
    }

    fn enter(&mut self, target: S, kind: EntryKind) {
        tracing::debug!(
            from = self.current.name(),
            to = target.name(),
            kind = ?kind,
            "state change"
        );
        self.history.record(HistoryEntry::new(target.clone(), kind));
        self.current = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildError;

    fn traffic_light() -> StateMachine {
        StateMachine::from_json_str(
            r#"{
                "initial": "green",
                "states": {
                    "green": { "transitions": { "next": "yellow", "stop": "red" } },
                    "yellow": { "transitions": { "next": "red" } },
                    "red": { "transitions": { "next": "green" } },
                    "off": {}
                }
            }"#,
        )
        .unwrap()
    }

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn starts_in_initial_state_with_empty_history() {
        let machine = traffic_light();
        assert_eq!(machine.state(), "green");
        assert!(machine.history().is_empty());
        assert!(!machine.can_undo());
        assert!(!machine.can_redo());
    }

    #[test]
    fn null_config_is_missing() {
        let result = StateMachine::<String, String>::from_json_str("null");
        assert_eq!(result.unwrap_err(), MachineError::ConfigMissing);

        let result = StateMachine::<String, String>::from_optional(None);
        assert_eq!(result.unwrap_err(), MachineError::ConfigMissing);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = StateMachine::<String, String>::from_json_str("{ not json");
        assert!(matches!(result, Err(MachineError::Parse(_))));

        let result = StateMachine::<String, String>::from_json_str(r#"{ "initial": "a" }"#);
        assert!(matches!(result, Err(MachineError::Parse(_))));
    }

    #[test]
    fn undeclared_initial_is_rejected() {
        let result = StateMachine::<String, String>::from_json_str(
            r#"{ "initial": "nope", "states": { "a": {} } }"#,
        );
        assert_eq!(
            result.unwrap_err(),
            MachineError::InvalidConfig(BuildError::UndeclaredInitial { state: s("nope") })
        );
    }

    #[test]
    fn trigger_follows_transition() {
        let mut machine = traffic_light();
        assert_eq!(machine.trigger(&s("next")).unwrap(), "yellow");
        assert_eq!(machine.state(), "yellow");
        assert_eq!(
            machine.history().entries()[0].kind,
            EntryKind::Triggered { event: s("next") }
        );
    }

    #[test]
    fn unknown_event_leaves_machine_untouched() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap();

        let err = machine.trigger(&s("stop")).unwrap_err();
        assert_eq!(
            err,
            MachineError::UnknownEvent {
                event: s("stop"),
                state: s("yellow")
            }
        );
        assert_eq!(machine.state(), "yellow");
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn change_state_rejects_undeclared_state() {
        let mut machine = traffic_light();
        let err = machine.change_state(s("blue")).unwrap_err();
        assert_eq!(err, MachineError::UndeclaredState { state: s("blue") });
        assert_eq!(machine.state(), "green");
        assert!(machine.history().is_empty());
    }

    #[test]
    fn change_state_ignores_transitions() {
        let mut machine = traffic_light();
        machine.change_state(s("off")).unwrap();
        assert_eq!(machine.state(), "off");
        assert!(machine.is_terminal());
        assert_eq!(machine.history().entries()[0].kind, EntryKind::Changed);
    }

    #[test]
    fn reset_is_recorded() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap();
        machine.reset();

        assert_eq!(machine.state(), "green");
        assert_eq!(machine.history().get_path(), vec!["yellow", "green"]);
        assert_eq!(machine.history().entries()[1].kind, EntryKind::Reset);

        assert!(machine.undo());
        assert_eq!(machine.state(), "yellow");
    }

    #[test]
    fn states_filters_by_event_in_declared_order() {
        let machine = traffic_light();
        assert_eq!(machine.states(None), vec!["green", "yellow", "red", "off"]);
        assert_eq!(
            machine.states(Some(&s("next"))),
            vec!["green", "yellow", "red"]
        );
        assert_eq!(machine.states(Some(&s("stop"))), vec!["green"]);
        assert!(machine.states(Some(&s("bogus"))).is_empty());
        assert_eq!(machine.states(Some(&s(""))).len(), 4);
    }

    #[test]
    fn available_events_of_current_state() {
        let mut machine = traffic_light();
        let mut events = machine.available_events();
        events.sort();
        assert_eq!(events, vec!["next", "stop"]);

        machine.change_state(s("off")).unwrap();
        assert!(machine.available_events().is_empty());
    }

    #[test]
    fn undo_past_first_entry_returns_to_initial() {
        let mut machine = traffic_light();
        machine.change_state(s("red")).unwrap();
        machine.change_state(s("off")).unwrap();

        assert!(machine.undo());
        assert_eq!(machine.state(), "red");
        assert!(machine.undo());
        assert_eq!(machine.state(), "green");
        assert_eq!(machine.history().cursor(), None);
        assert!(!machine.undo());
        assert_eq!(machine.state(), "green");
    }

    #[test]
    fn redo_walks_forward_again() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap();
        machine.trigger(&s("next")).unwrap();
        machine.undo();
        machine.undo();

        assert!(machine.redo());
        assert_eq!(machine.state(), "yellow");
        assert!(machine.redo());
        assert_eq!(machine.state(), "red");
        assert!(!machine.redo());
        assert_eq!(machine.state(), "red");
    }

    #[test]
    fn refused_redo_keeps_cursor_and_state() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap();
        machine.trigger(&s("next")).unwrap();
        machine.undo();
        assert!(machine.redo());

        let cursor = machine.history().cursor();
        assert!(!machine.redo());
        assert_eq!(machine.history().cursor(), cursor);
        assert_eq!(machine.state(), "red");
    }

    #[test]
    fn new_branch_keeps_state_under_cursor() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap(); // yellow
        machine.trigger(&s("next")).unwrap(); // red
        machine.undo(); // yellow
        machine.change_state(s("off")).unwrap();

        assert!(!machine.redo());
        assert_eq!(machine.history().get_path(), vec!["yellow", "off"]);
        assert!(machine.undo());
        assert_eq!(machine.state(), "yellow");
    }

    #[test]
    fn clear_history_keeps_state() {
        let mut machine = traffic_light();
        machine.trigger(&s("next")).unwrap();
        machine.clear_history();

        assert_eq!(machine.state(), "yellow");
        assert!(!machine.undo());
        assert!(!machine.redo());
        assert_eq!(machine.state(), "yellow");
    }

    #[test]
    fn history_limit_bounds_undo_depth() {
        let config = traffic_light().config().clone();
        let mut machine = StateMachine::with_history_limit(config, 2).unwrap();
        for _ in 0..3 {
            machine.trigger(&s("next")).unwrap();
        }
        // yellow, red, green recorded; yellow evicted
        assert_eq!(machine.history().get_path(), vec!["red", "green"]);
        assert!(machine.undo());
        assert_eq!(machine.state(), "red");
        assert!(machine.undo());
        assert_eq!(machine.state(), "green");
        assert!(!machine.undo());
    }
}
