//! This module defines the [`Automaton`] struct: the dual state machine that
//! drives the fixed program over the tape one display frame per tick. An
//! animation phase paces how many ticks each read-write or head movement
//! consumes; the program state decides what actually happens on the tape.

use serde::{Deserialize, Serialize};

use crate::leds::LedBuffer;
use crate::program::{transition, State};
use crate::tape::Tape;
use crate::types::{Direction, LedColor, Step, Symbol, TapeError, LED_CELLS, MAX_RUN_TICKS};

/// Ticks consumed by one read-write pause or one head movement.
const PHASE_FRAMES: u8 = 3;

/// The animation phase: how the current program activity is paced across
/// ticks. `Idle` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pausing on a cell before applying the transition table.
    ReadWrite,
    /// Sliding the display window while the head moves left.
    MoveLeft,
    /// Sliding the display window while the head moves right.
    MoveRight,
    /// Terminal: the final frame is on display and nothing mutates anymore.
    Idle,
}

/// The LED Turing machine: one tape, one display buffer, and the two state
/// variables that interleave program transitions with window animation.
///
/// Exactly one instance drives a display; `step` is the only mutating entry
/// point and runs synchronously to completion.
pub struct Automaton {
    tape: Tape,
    leds: LedBuffer,
    phase: Phase,
    substep: u8,
    program: State,
    fault: Option<TapeError>,
    ticks: usize,
}

impl Automaton {
    /// Creates an automaton with `seed` loaded onto the tape and the initial
    /// window rendered.
    ///
    /// Fails only if the seed cannot fit the tape, which a 16-bit seed never
    /// triggers; the contract still surfaces it rather than panicking.
    pub fn new(seed: u16) -> Result<Self, TapeError> {
        let mut tape = Tape::new();
        tape.load_number(seed)?;

        let mut leds = LedBuffer::new();
        leds.render_window(&tape);

        Ok(Self {
            tape,
            leds,
            phase: Phase::ReadWrite,
            substep: 0,
            program: State::Move,
            fault: None,
            ticks: 0,
        })
    }

    /// Advances the machine by exactly one display frame.
    ///
    /// A read-write pause spends three ticks on its cell unless
    /// the program is scanning in [`State::Move`], in which case the table
    /// lookup folds into the first frame of the resulting movement. Each
    /// head movement spends three frames: slide, gap, slide.
    ///
    /// Once terminal, every further call returns the same [`Step::Halted`]
    /// or [`Step::Failed`] without mutating anything.
    pub fn step(&mut self) -> Step {
        if self.phase != Phase::Idle {
            self.ticks += 1;
        }

        loop {
            match self.phase {
                Phase::ReadWrite => {
                    if self.program != State::Move && self.substep < PHASE_FRAMES - 1 {
                        self.substep += 1;
                        break;
                    }
                    self.substep = 0;
                    self.read_write();

                    // A Move scan re-enters the movement phase within the
                    // same tick, so scanning costs one frame per cell.
                    if self.program == State::Move && self.phase != Phase::ReadWrite {
                        continue;
                    }
                    break;
                }
                Phase::MoveLeft => {
                    self.move_left_frame();
                    break;
                }
                Phase::MoveRight => {
                    self.move_right_frame();
                    break;
                }
                Phase::Idle => break,
            }
        }

        self.outcome()
    }

    /// Drives `step` until the machine leaves [`Step::Running`], up to
    /// [`MAX_RUN_TICKS`] ticks. Returns `Running` if the budget runs out.
    pub fn run(&mut self) -> Step {
        for _ in 0..MAX_RUN_TICKS {
            match self.step() {
                Step::Running => continue,
                done => return done,
            }
        }

        Step::Running
    }

    /// Reinitializes the machine with a fresh seed.
    pub fn reset(&mut self, seed: u16) -> Result<(), TapeError> {
        *self = Self::new(seed)?;
        Ok(())
    }

    /// Returns the current program state.
    pub fn state(&self) -> State {
        self.program
    }

    /// Returns the current animation phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of ticks consumed so far.
    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    /// Returns the tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the display buffer.
    pub fn leds(&self) -> &LedBuffer {
        &self.leds
    }

    /// Returns a decoded view of the 12 LED cells for the display driver.
    pub fn led_snapshot(&self) -> [LedColor; LED_CELLS] {
        self.leds.snapshot()
    }

    /// Returns the tape error behind a [`Step::Failed`] outcome, when one
    /// exists. An unexpected blank under `Check1` fails without a tape
    /// error.
    pub fn fault(&self) -> Option<&TapeError> {
        self.fault.as_ref()
    }

    /// The third read-write frame: look the head symbol up in the table,
    /// apply its write, and schedule the next phase. Terminal states render
    /// their final frame here and park the machine in `Idle`.
    fn read_write(&mut self) {
        let symbol = self.tape.read_head();

        match self.program {
            State::Halt => {
                self.leds.flood_edges(LedColor::Green);
                self.phase = Phase::Idle;
            }
            State::Error => {
                self.leds.flood_edges(LedColor::Red);
                self.phase = Phase::Idle;
            }
            state => {
                let action = transition(state, symbol);

                self.program = match action.write {
                    Some(symbol) => match self.tape.write(symbol) {
                        Ok(()) => action.next,
                        Err(fault) => {
                            // The scheduled motion still animates; the error
                            // state is evaluated on the next pause.
                            self.fault = Some(fault);
                            State::Error
                        }
                    },
                    None => action.next,
                };

                self.phase = match action.motion {
                    Direction::Left => Phase::MoveLeft,
                    Direction::Right => Phase::MoveRight,
                    Direction::Stay => Phase::ReadWrite,
                };
            }
        }

        // Only the head cell's color can change here; the rest of the
        // window is still valid.
        self.leds.refresh_head(&self.tape);
    }

    /// One frame of leftward head movement: the window slides right.
    fn move_left_frame(&mut self) {
        match self.substep {
            0 => {
                self.leds.shift_right(self.tape.read_offset(-2));
                self.tape.move_head_left();
                self.substep = 1;
            }
            1 => {
                // Gap frame: the connector cell between tape positions.
                self.leds.shift_right(Symbol::Blank);
                self.substep = 2;
            }
            _ => {
                self.leds.shift_right(self.tape.read_offset(-2));
                self.substep = 0;
                self.phase = Phase::ReadWrite;
            }
        }
    }

    /// One frame of rightward head movement: the window slides left.
    fn move_right_frame(&mut self) {
        match self.substep {
            0 => {
                self.leds.shift_left(self.tape.read_offset(2));
                self.tape.move_head_right();
                self.substep = 1;
            }
            1 => {
                self.leds.shift_left(Symbol::Blank);
                self.substep = 2;
            }
            _ => {
                self.leds.shift_left(self.tape.read_offset(2));
                self.substep = 0;
                self.phase = Phase::ReadWrite;
            }
        }
    }

    fn outcome(&self) -> Step {
        if self.phase != Phase::Idle {
            return Step::Running;
        }

        if self.program == State::Error {
            Step::Failed
        } else {
            Step::Halted
        }
    }
}
