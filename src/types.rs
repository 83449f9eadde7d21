//! This module defines the core data structures and types shared across the
//! simulator: tape symbols, LED colors, head directions, step outcomes, and
//! error types, along with the fixed size constants of the machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of addressable tape positions (8-bit circular index space).
pub const TAPE_POSITIONS: usize = 256;
/// Maximum number of usable tape cells: the two boundary sentinels never hold
/// a readable symbol.
pub const TAPE_CAPACITY: usize = TAPE_POSITIONS - 2;
/// Number of logical LED cells in the display buffer.
pub const LED_CELLS: usize = 12;
/// The maximum number of ticks [`crate::Automaton::run`] will drive before
/// giving up. Each tick is a single animation frame; a 16-bit seed finishes
/// far below this.
pub const MAX_RUN_TICKS: usize = 1_000_000;

/// A ternary tape symbol.
///
/// `Blank` doubles as the erase request when passed to [`crate::Tape::write`],
/// matching the read side where positions outside the written region read as
/// `Blank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// No symbol stored (outside the written region).
    Blank,
    /// The bit 0.
    Zero,
    /// The bit 1.
    One,
}

impl Symbol {
    /// Maps a raw storage bit to its symbol.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }

    /// Returns `true` for `Blank`.
    pub fn is_blank(&self) -> bool {
        matches!(self, Symbol::Blank)
    }
}

/// The color of a single LED cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedColor {
    /// Cell unlit.
    Off,
    /// Cell lit red (displays the bit 0).
    Red,
    /// Cell lit green (displays the bit 1).
    Green,
}

impl From<Symbol> for LedColor {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Blank => LedColor::Off,
            Symbol::Zero => LedColor::Red,
            Symbol::One => LedColor::Green,
        }
    }
}

/// Represents the possible directions the tape head can move after a
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// Represents the outcome of a single automaton tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// The automaton performed a frame and continues execution.
    Running,
    /// The program reached its halt state; the display shows green edges.
    Halted,
    /// The program reached its error state; the display shows red edges.
    Failed,
}

/// Errors raised by tape mutation.
///
/// Both are terminal for the automaton: a failed write inside a transition
/// forces the program into its error state, surfaced as [`Step::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TapeError {
    /// An erase was requested away from a tape edge.
    #[error("erase away from tape edge (head {head}, left {left}, right {right})")]
    BoundaryViolation {
        /// Head position at the time of the erase.
        head: u8,
        /// Left boundary sentinel.
        left: u8,
        /// Right boundary sentinel.
        right: u8,
    },
    /// A write would grow the tape past its 254-cell capacity.
    #[error("tape capacity of {TAPE_CAPACITY} cells exhausted")]
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_symbol_to_color_mapping() {
        assert_eq!(LedColor::from(Symbol::One), LedColor::Green);
        assert_eq!(LedColor::from(Symbol::Zero), LedColor::Red);
        assert_eq!(LedColor::from(Symbol::Blank), LedColor::Off);
    }

    #[test]
    fn test_symbol_from_bit() {
        assert_eq!(Symbol::from_bit(true), Symbol::One);
        assert_eq!(Symbol::from_bit(false), Symbol::Zero);
        assert!(!Symbol::from_bit(false).is_blank());
        assert!(Symbol::Blank.is_blank());
    }

    #[test]
    fn test_error_display() {
        let error = TapeError::BoundaryViolation {
            head: 10,
            left: 100,
            right: 120,
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("erase away from tape edge"));
        assert!(error_msg.contains("head 10"));

        let error_msg = format!("{}", TapeError::Exhausted);
        assert!(error_msg.contains("254"));
    }

    #[test]
    fn test_step_serialization_round_trip() {
        for step in [Step::Running, Step::Halted, Step::Failed] {
            let json = serde_json::to_string(&step).unwrap();
            let back: Step = serde_json::from_str(&json).unwrap();
            assert_eq!(step, back);
        }
    }
}
