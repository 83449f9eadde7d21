//! This crate provides the core engine of an LED Turing machine: a bounded,
//! dynamically-growing bit tape, the fixed transition table that drives it,
//! and a 12-cell two-color LED buffer that mirrors the tape window around
//! the head, advanced one animation frame per external tick.
//!
//! The environment (clock source, display driver, entropy for the seed) is
//! out of scope: it constructs an [`Automaton`] from a seed, calls
//! [`Automaton::step`] once per tick until the machine reports a terminal
//! [`Step`], and renders [`Automaton::led_snapshot`] however it likes.

pub mod automaton;
pub mod leds;
pub mod program;
pub mod tape;
pub mod types;

/// Re-exports the `Automaton` struct and its animation `Phase` enum.
pub use automaton::{Automaton, Phase};
/// Re-exports the `LedBuffer` struct from the leds module.
pub use leds::LedBuffer;
/// Re-exports the program `State` enum and the fixed transition table.
pub use program::{transition, Action, State};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared value types and constants.
pub use types::{
    Direction, LedColor, Step, Symbol, TapeError, LED_CELLS, MAX_RUN_TICKS, TAPE_CAPACITY,
};
