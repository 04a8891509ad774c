//! End-to-end scenarios on a three-light traffic signal.

use fsm_history::{event_enum, state_enum, MachineError, StateMachine, StateMachineBuilder};

fn traffic_light() -> StateMachine {
    StateMachine::from_json_str(
        r#"{
            "initial": "green",
            "states": {
                "green": { "transitions": { "next": "yellow" } },
                "yellow": { "transitions": { "next": "red" } },
                "red": { "transitions": { "next": "green" } }
            }
        }"#,
    )
    .unwrap()
}

fn next() -> String {
    "next".to_string()
}

#[test]
fn undo_walks_back_to_initial_and_stops() {
    let mut machine = traffic_light();

    machine.trigger(&next()).unwrap();
    assert_eq!(machine.state(), "yellow");
    machine.trigger(&next()).unwrap();
    assert_eq!(machine.state(), "red");

    assert!(machine.undo());
    assert_eq!(machine.state(), "yellow");
    assert!(machine.undo());
    assert_eq!(machine.state(), "green");
    assert!(!machine.undo());
    assert_eq!(machine.state(), "green");
}

#[test]
fn direct_jump_then_unknown_event() {
    let mut machine = traffic_light();
    machine.trigger(&next()).unwrap();
    machine.trigger(&next()).unwrap();
    assert_eq!(machine.state(), "red");

    machine.change_state("green".to_string()).unwrap();
    assert_eq!(machine.state(), "green");

    let err = machine.trigger(&"bogus".to_string()).unwrap_err();
    assert!(matches!(err, MachineError::UnknownEvent { .. }));
    assert_eq!(err.to_string(), "Unknown event `bogus` for state `green`");
    assert_eq!(machine.state(), "green");
}

#[test]
fn states_lists_declared_order() {
    let machine = traffic_light();
    assert_eq!(
        machine.states(Some(&next())),
        vec!["green", "yellow", "red"]
    );
    assert_eq!(machine.states(None), vec!["green", "yellow", "red"]);
}

#[test]
fn branching_discards_redo() {
    let mut machine = traffic_light();
    machine.trigger(&next()).unwrap();
    machine.trigger(&next()).unwrap();
    assert!(machine.undo());
    machine.trigger(&next()).unwrap();

    assert!(!machine.redo());
    assert_eq!(machine.state(), "red");
    assert_eq!(machine.history().get_path(), vec!["yellow", "red"]);
}

#[test]
fn absent_configuration_is_rejected() {
    let err = StateMachine::<String, String>::from_optional(None).unwrap_err();
    assert_eq!(err, MachineError::ConfigMissing);
    assert_eq!(
        err.to_string(),
        "Cannot create a state machine without a configuration"
    );
}

#[test]
fn undeclared_target_fails_at_construction() {
    let result = StateMachine::<String, String>::from_json_str(
        r#"{
            "initial": "green",
            "states": { "green": { "transitions": { "next": "blue" } } }
        }"#,
    );
    assert!(matches!(result, Err(MachineError::InvalidConfig(_))));
}

state_enum! {
    enum Door {
        Open,
        Closed,
        Locked,
    }
}

event_enum! {
    enum DoorEvent {
        Close,
        Open,
        Lock,
        Unlock,
    }
}

#[test]
fn typed_machine_with_checkpoint_round_trip() {
    let build = || {
        StateMachineBuilder::new()
            .initial(Door::Open)
            .transition(Door::Open, DoorEvent::Close, Door::Closed)
            .transition(Door::Closed, DoorEvent::Open, Door::Open)
            .transition(Door::Closed, DoorEvent::Lock, Door::Locked)
            .transition(Door::Locked, DoorEvent::Unlock, Door::Closed)
            .build_config()
            .unwrap()
    };

    let mut machine = StateMachine::new(build()).unwrap();
    machine.trigger(&DoorEvent::Close).unwrap();
    machine.trigger(&DoorEvent::Lock).unwrap();
    assert!(machine.trigger(&DoorEvent::Open).is_err());
    assert_eq!(machine.states(Some(&DoorEvent::Open)), vec![&Door::Closed]);
    machine.undo();

    let bytes = machine.checkpoint().to_binary().unwrap();
    let checkpoint = fsm_history::Checkpoint::from_binary(&bytes).unwrap();
    let mut resumed = StateMachine::resume(build(), checkpoint).unwrap();

    assert_eq!(resumed.state(), &Door::Closed);
    assert!(resumed.redo());
    assert_eq!(resumed.state(), &Door::Locked);
}
