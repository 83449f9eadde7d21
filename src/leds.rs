//! This module defines the [`LedBuffer`] struct: a packed tri-state display
//! buffer of 12 logical LED cells mirroring a five-position tape window
//! around the head. Cells are packed four per byte (2 bits each) across
//! three banks, matching the physical charlieplexed layout the buffer is
//! scanned out to.

use crate::tape::Tape;
use crate::types::{LedColor, Symbol, LED_CELLS};

/// Bit plane selecting the green half of every 2-bit cell field.
const GREEN_PLANE: u8 = 0xAA;
/// Bit plane selecting the red half of every 2-bit cell field.
const RED_PLANE: u8 = 0x55;
/// Mask of the lowest cell in a bank (cell 0 of the buffer).
const CELL_FIRST: u8 = 0x03;
/// Mask of the highest cell in a bank (cell 11 of the buffer).
const CELL_LAST: u8 = 0xC0;

/// The tape window rendered around the head: each offset maps to a pair of
/// adjacent cells except the outermost single cells; cells 1, 4, 7 and 10
/// are fixed layout gaps and stay off.
const WINDOW: [(i8, &[usize]); 5] = [
    (-2, &[0]),
    (-1, &[2, 3]),
    (0, &[5, 6]),
    (1, &[8, 9]),
    (2, &[11]),
];

/// A 12-cell two-color LED display buffer.
///
/// Mutated either by full re-renders from tape truth or by 2-bit shifts that
/// slide the whole window one cell, used to animate head movement without
/// re-rendering every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedBuffer {
    banks: [u8; 3],
}

impl LedBuffer {
    /// Creates a buffer with every cell off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one cell to the given color. Indices past the last cell are
    /// ignored.
    pub fn set_cell(&mut self, index: usize, color: LedColor) {
        if index >= LED_CELLS {
            return;
        }

        let bank = index >> 2;
        let mask = CELL_FIRST << ((index & 0x3) * 2);
        self.banks[bank] &= !mask;

        match color {
            LedColor::Green => self.banks[bank] |= mask & GREEN_PLANE,
            LedColor::Red => self.banks[bank] |= mask & RED_PLANE,
            LedColor::Off => {}
        }
    }

    /// Re-renders the whole window from tape truth.
    ///
    /// Clears every cell first; a tape with no written cells renders fully
    /// dark. Idempotent for unchanged tape and head.
    pub fn render_window(&mut self, tape: &Tape) {
        self.banks = [0; 3];

        if tape.is_empty() {
            return;
        }

        for (delta, cells) in WINDOW {
            let color = LedColor::from(tape.read_offset(delta));
            for &cell in cells {
                self.set_cell(cell, color);
            }
        }
    }

    /// Re-renders only the two head cells. Called on every program
    /// transition; mid-animation only the head cell's color can change, so a
    /// full re-render is unnecessary.
    pub fn refresh_head(&mut self, tape: &Tape) {
        let color = LedColor::from(tape.read_head());
        self.set_cell(5, color);
        self.set_cell(6, color);
    }

    /// Shifts the window one cell toward index 0 and feeds `incoming` into
    /// the vacated cell 11. `Blank` leaves the new cell off.
    pub fn shift_left(&mut self, incoming: Symbol) {
        self.shift_down_bit();
        self.shift_down_bit();

        match incoming {
            Symbol::One => self.banks[2] |= CELL_LAST & GREEN_PLANE,
            Symbol::Zero => self.banks[2] |= CELL_LAST & RED_PLANE,
            Symbol::Blank => {}
        }
    }

    /// Shifts the window one cell toward index 11 and feeds `incoming` into
    /// the vacated cell 0.
    pub fn shift_right(&mut self, incoming: Symbol) {
        self.shift_up_bit();
        self.shift_up_bit();

        match incoming {
            Symbol::One => self.banks[0] |= CELL_FIRST & GREEN_PLANE,
            Symbol::Zero => self.banks[0] |= CELL_FIRST & RED_PLANE,
            Symbol::Blank => {}
        }
    }

    /// Floods the two edge banks (cells 0..4 and 8..12) with one color, the
    /// terminal halt/error rendering.
    pub fn flood_edges(&mut self, color: LedColor) {
        let plane = match color {
            LedColor::Green => GREEN_PLANE,
            LedColor::Red => RED_PLANE,
            LedColor::Off => 0,
        };
        self.banks[0] = plane;
        self.banks[2] = plane;
    }

    /// Returns the decoded color of one cell. Indices past the last cell
    /// read as off.
    pub fn cell(&self, index: usize) -> LedColor {
        if index >= LED_CELLS {
            return LedColor::Off;
        }

        match self.banks[index >> 2] >> ((index & 0x3) * 2) & 0x3 {
            0b10 => LedColor::Green,
            0b01 => LedColor::Red,
            _ => LedColor::Off,
        }
    }

    /// Returns a decoded view of all 12 cells for the display driver.
    pub fn snapshot(&self) -> [LedColor; LED_CELLS] {
        let mut cells = [LedColor::Off; LED_CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(i);
        }
        cells
    }

    fn shift_down_bit(&mut self) {
        self.banks[0] >>= 1;
        if self.banks[1] & 0x01 != 0 {
            self.banks[0] |= 0x80;
        }
        self.banks[1] >>= 1;
        if self.banks[2] & 0x01 != 0 {
            self.banks[1] |= 0x80;
        }
        self.banks[2] >>= 1;
    }

    fn shift_up_bit(&mut self) {
        self.banks[2] <<= 1;
        if self.banks[1] & 0x80 != 0 {
            self.banks[2] |= 0x01;
        }
        self.banks[1] <<= 1;
        if self.banks[0] & 0x80 != 0 {
            self.banks[1] |= 0x01;
        }
        self.banks[0] <<= 1;
    }
}
