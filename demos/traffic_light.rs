//! Traffic Light State Machine
//!
//! This example drives a cyclic state machine loaded from JSON and walks
//! its history backwards and forwards.
//!
//! Key concepts:
//! - Declarative configuration
//! - Event-driven transitions
//! - Undo/redo over the recorded history
//! - Branching discards the undone future
//!
//! Run with: cargo run --example traffic_light

use fsm_history::{MachineError, StateMachine};

const CONFIG: &str = r#"{
    "initial": "green",
    "states": {
        "green":  { "transitions": { "next": "yellow" } },
        "yellow": { "transitions": { "next": "red" } },
        "red":    { "transitions": { "next": "green" } }
    }
}"#;

fn main() -> Result<(), MachineError> {
    println!("=== Traffic Light State Machine ===\n");

    let mut machine: StateMachine = StateMachine::from_json_str(CONFIG)?;
    let next = "next".to_string();

    println!("Initial state: {}", machine.state());
    println!("States reacting to `next`: {:?}\n", machine.states(Some(&next)));

    for _ in 0..2 {
        let state = machine.trigger(&next)?;
        println!("next  -> {state}");
    }

    while machine.undo() {
        println!("undo  -> {}", machine.state());
    }
    println!("undo exhausted, still at {}\n", machine.state());

    machine.redo();
    println!("redo  -> {}", machine.state());

    machine.change_state("red".to_string())?;
    println!("jump  -> {}", machine.state());
    println!("redo available after branching: {}", machine.redo());

    if let Err(err) = machine.trigger(&"bogus".to_string()) {
        println!("\nRejected: {err}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
