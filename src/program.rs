//! This module defines the fixed Turing-machine program the automaton runs:
//! the program states and the transition table, expressed as a pure function
//! from (state, symbol) to (next state, write action, head motion). Pacing
//! of the transitions across display frames lives in the automaton, not
//! here.
//!
//! The table is reproduced exactly as given; its arithmetic meaning is
//! deliberately not interpreted here.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Symbol};

/// The control states of the fixed program.
///
/// `Halt` and `Error` are terminal: the table maps them to themselves and
/// the automaton renders the final display when it evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Scan right across the written bits.
    Move,
    /// Scan back from the right end, erasing trailing zeros.
    Check1,
    /// Decide between halting and entering the multiply loop.
    Check2,
    Mul0,
    Mul1,
    Mul2,
    /// Terminal success state.
    Halt,
    /// Terminal failure state.
    Error,
}

impl State {
    /// Returns `true` for the two terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Halt | State::Error)
    }
}

/// The outcome of one table lookup: the state to enter, an optional symbol
/// to write at the head first (`Blank` erases), and the direction the head
/// moves afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub next: State,
    pub write: Option<Symbol>,
    pub motion: Direction,
}

impl Action {
    fn new(next: State, write: Option<Symbol>, motion: Direction) -> Self {
        Self {
            next,
            write,
            motion,
        }
    }
}

/// The fixed transition table.
///
/// Terminal states are fixed points with no write and no motion. A failed
/// write turns `next` into [`State::Error`] at the call site; the motion
/// still animates so the display reaches a consistent final frame.
pub fn transition(state: State, symbol: Symbol) -> Action {
    use Direction::{Left, Right, Stay};
    use State::*;
    use Symbol::{Blank, One, Zero};

    match (state, symbol) {
        (Move, Blank) => Action::new(Check1, None, Left),
        (Move, _) => Action::new(Move, None, Right),

        (Check1, Blank) => Action::new(Error, None, Stay),
        (Check1, Zero) => Action::new(Check1, Some(Blank), Left),
        (Check1, One) => Action::new(Check2, None, Left),

        (Check2, Blank) => Action::new(Halt, None, Right),
        (Check2, _) => Action::new(Mul1, None, Right),

        (Mul0, Blank) => Action::new(Move, None, Right),
        (Mul0, Zero) => Action::new(Mul0, None, Left),
        (Mul0, One) => Action::new(Mul1, None, Left),

        (Mul1, One) => Action::new(Mul2, Some(Zero), Left),
        (Mul1, _) => Action::new(Mul0, Some(One), Left),

        (Mul2, Blank) => Action::new(Mul1, Some(Zero), Left),
        (Mul2, Zero) => Action::new(Mul1, None, Left),
        (Mul2, One) => Action::new(Mul2, None, Left),

        (terminal, _) => Action::new(terminal, None, Stay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Left, Right, Stay};
    use Symbol::{Blank, One, Zero};

    fn row(state: State) -> [Action; 3] {
        [
            transition(state, Blank),
            transition(state, Zero),
            transition(state, One),
        ]
    }

    #[test]
    fn test_move_row() {
        let [blank, zero, one] = row(State::Move);
        assert_eq!(blank, Action::new(State::Check1, None, Left));
        assert_eq!(zero, Action::new(State::Move, None, Right));
        assert_eq!(one, Action::new(State::Move, None, Right));
    }

    #[test]
    fn test_check1_row() {
        let [blank, zero, one] = row(State::Check1);
        assert_eq!(blank, Action::new(State::Error, None, Stay));
        assert_eq!(zero, Action::new(State::Check1, Some(Blank), Left));
        assert_eq!(one, Action::new(State::Check2, None, Left));
    }

    #[test]
    fn test_check2_row() {
        let [blank, zero, one] = row(State::Check2);
        assert_eq!(blank, Action::new(State::Halt, None, Right));
        assert_eq!(zero, Action::new(State::Mul1, None, Right));
        assert_eq!(one, Action::new(State::Mul1, None, Right));
    }

    #[test]
    fn test_mul0_row() {
        let [blank, zero, one] = row(State::Mul0);
        assert_eq!(blank, Action::new(State::Move, None, Right));
        assert_eq!(zero, Action::new(State::Mul0, None, Left));
        assert_eq!(one, Action::new(State::Mul1, None, Left));
    }

    #[test]
    fn test_mul1_row() {
        let [blank, zero, one] = row(State::Mul1);
        assert_eq!(blank, Action::new(State::Mul0, Some(One), Left));
        assert_eq!(zero, Action::new(State::Mul0, Some(One), Left));
        assert_eq!(one, Action::new(State::Mul2, Some(Zero), Left));
    }

    #[test]
    fn test_mul2_row() {
        let [blank, zero, one] = row(State::Mul2);
        assert_eq!(blank, Action::new(State::Mul1, Some(Zero), Left));
        assert_eq!(zero, Action::new(State::Mul1, None, Left));
        assert_eq!(one, Action::new(State::Mul2, None, Left));
    }

    #[test]
    fn test_terminal_states_are_fixed_points() {
        for state in [State::Halt, State::Error] {
            for symbol in [Blank, Zero, One] {
                let action = transition(state, symbol);
                assert_eq!(action.next, state);
                assert_eq!(action.write, None);
                assert_eq!(action.motion, Stay);
                assert!(state.is_terminal());
            }
        }
    }
}
