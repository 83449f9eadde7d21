//! This module defines the [`Tape`] struct: a fixed-capacity circular bit
//! tape with a read/write head and two boundary sentinels tracking the
//! written region. The tape stands in for a conceptually unbounded Turing
//! machine tape; it grows one cell at a time by writing at a sentinel and
//! shrinks only by erasing an edge cell.

use crate::types::{Symbol, TapeError, TAPE_POSITIONS};

/// Bit words backing the 256 tape positions.
const TAPE_WORDS: usize = TAPE_POSITIONS / 16;

/// A bounded circular bit tape addressed by an 8-bit index.
///
/// All position arithmetic wraps mod 256 (`u8` wrapping ops), so the written
/// region may wrap through the 255/0 boundary. The `left` and `right`
/// sentinels mark one-past-the-ends of the region and never hold a readable
/// symbol, which caps the usable capacity at 254 cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    bits: [u16; TAPE_WORDS],
    left: u8,
    right: u8,
    head: u8,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates an empty tape with the sentinels adjacent around the origin
    /// and the head on the right sentinel.
    pub fn new() -> Self {
        Self {
            bits: [0; TAPE_WORDS],
            left: 127,
            right: 128,
            head: 128,
        }
    }

    /// Returns the symbol stored at `pos`, or [`Symbol::Blank`] when `pos`
    /// lies outside the written region. Never fails.
    ///
    /// The region is the open interval between the sentinels: contiguous when
    /// `left < right`, wrapping through 255/0 otherwise.
    pub fn read(&self, pos: u8) -> Symbol {
        let valid = if self.left < self.right {
            self.left < pos && pos < self.right
        } else {
            pos < self.right || self.left < pos
        };

        if valid {
            Symbol::from_bit(self.bit(pos))
        } else {
            Symbol::Blank
        }
    }

    /// Reads relative to the head (`delta` wraps mod 256 like everything
    /// else). Used by the display window.
    pub fn read_offset(&self, delta: i8) -> Symbol {
        self.read(self.head.wrapping_add_signed(delta))
    }

    /// Reads the symbol under the head.
    pub fn read_head(&self) -> Symbol {
        self.read(self.head)
    }

    /// Writes `symbol` at the head position.
    ///
    /// Writing [`Symbol::Blank`] erases: legal only when the head sits on an
    /// edge cell (directly inside a sentinel), shrinking the region by one.
    /// Writing a bit at a sentinel grows the region by moving that sentinel
    /// outward; the write is rejected with [`TapeError::Exhausted`] before
    /// any mutation if growing would collide the sentinels.
    pub fn write(&mut self, symbol: Symbol) -> Result<(), TapeError> {
        match symbol {
            Symbol::Blank => {
                if self.head.wrapping_add(1) == self.right {
                    self.right = self.right.wrapping_sub(1);
                } else if self.head.wrapping_sub(1) == self.left {
                    self.left = self.left.wrapping_add(1);
                } else {
                    return Err(TapeError::BoundaryViolation {
                        head: self.head,
                        left: self.left,
                        right: self.right,
                    });
                }
                Ok(())
            }
            bit => {
                if self.head == self.left && self.left.wrapping_sub(1) == self.right {
                    return Err(TapeError::Exhausted);
                }
                if self.head == self.right && self.right.wrapping_add(1) == self.left {
                    return Err(TapeError::Exhausted);
                }

                self.set_bit(self.head, bit == Symbol::One);

                if self.head == self.left {
                    self.left = self.left.wrapping_sub(1);
                } else if self.head == self.right {
                    self.right = self.right.wrapping_add(1);
                }
                Ok(())
            }
        }
    }

    /// Moves the head to the left sentinel and writes there, growing the
    /// region leftward. Used for the initial number load.
    pub fn push_left(&mut self, symbol: Symbol) -> Result<(), TapeError> {
        self.head = self.left;
        self.write(symbol)
    }

    /// Moves the head to the right sentinel and writes there, growing the
    /// region rightward.
    pub fn push_right(&mut self, symbol: Symbol) -> Result<(), TapeError> {
        self.head = self.right;
        self.write(symbol)
    }

    /// Loads `n` onto the tape, least-significant bit first, each bit pushed
    /// one cell further left. Always pushes at least one bit, so loading 0
    /// leaves a single `Zero` on the tape. The head ends on the
    /// most-significant bit.
    pub fn load_number(&mut self, n: u16) -> Result<(), TapeError> {
        let mut n = n;
        loop {
            self.push_left(Symbol::from_bit(n & 1 == 1))?;
            n >>= 1;
            if n == 0 {
                return Ok(());
            }
        }
    }

    /// Moves the head one position left (wrapping).
    pub fn move_head_left(&mut self) {
        self.head = self.head.wrapping_sub(1);
    }

    /// Moves the head one position right (wrapping).
    pub fn move_head_right(&mut self) {
        self.head = self.head.wrapping_add(1);
    }

    /// Returns the current head position.
    pub fn head(&self) -> u8 {
        self.head
    }

    /// Returns the number of usable cells currently inside the written
    /// region.
    pub fn len(&self) -> usize {
        self.right.wrapping_sub(self.left).wrapping_sub(1) as usize
    }

    /// Returns `true` when the written region holds no cells.
    pub fn is_empty(&self) -> bool {
        self.left.wrapping_add(1) == self.right
    }

    fn bit(&self, pos: u8) -> bool {
        let pos = pos as usize;
        self.bits[pos >> 4] >> (pos & 0xF) & 1 == 1
    }

    fn set_bit(&mut self, pos: u8, bit: bool) {
        let pos = pos as usize;
        if bit {
            self.bits[pos >> 4] |= 1 << (pos & 0xF);
        } else {
            self.bits[pos >> 4] &= !(1 << (pos & 0xF));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TAPE_CAPACITY;

    #[test]
    fn test_new_tape_is_empty() {
        let tape = Tape::new();

        assert!(tape.is_empty());
        assert_eq!(tape.len(), 0);
        assert_eq!(tape.head(), 128);
        assert_eq!(tape.read_head(), Symbol::Blank);
    }

    #[test]
    fn test_sentinels_never_readable() {
        let mut tape = Tape::new();
        tape.push_left(Symbol::One).unwrap();

        // Region is the single cell at 127; sentinels 126 and 128 read blank.
        assert_eq!(tape.read(127), Symbol::One);
        assert_eq!(tape.read(126), Symbol::Blank);
        assert_eq!(tape.read(128), Symbol::Blank);
    }

    #[test]
    fn test_last_write_wins() {
        let mut tape = Tape::new();
        tape.push_left(Symbol::One).unwrap();
        assert_eq!(tape.read(127), Symbol::One);

        // Overwrite the interior cell without growing.
        let len = tape.len();
        tape.write(Symbol::Zero).unwrap();
        assert_eq!(tape.read(127), Symbol::Zero);
        assert_eq!(tape.len(), len);
    }

    #[test]
    fn test_push_left_grows_leftward() {
        let mut tape = Tape::new();
        tape.push_left(Symbol::Zero).unwrap();
        tape.push_left(Symbol::One).unwrap();

        assert_eq!(tape.len(), 2);
        assert_eq!(tape.read(127), Symbol::Zero);
        assert_eq!(tape.read(126), Symbol::One);
        assert_eq!(tape.head(), 126);
    }

    #[test]
    fn test_push_right_grows_rightward() {
        let mut tape = Tape::new();
        tape.push_right(Symbol::One).unwrap();
        tape.push_right(Symbol::Zero).unwrap();

        assert_eq!(tape.len(), 2);
        assert_eq!(tape.read(128), Symbol::One);
        assert_eq!(tape.read(129), Symbol::Zero);
    }

    #[test]
    fn test_load_number_bit_layout() {
        let mut tape = Tape::new();
        tape.load_number(0b110).unwrap();

        // LSB pushed first, each later bit one cell further left; head ends
        // on the most significant bit.
        assert_eq!(tape.read(127), Symbol::Zero);
        assert_eq!(tape.read(126), Symbol::One);
        assert_eq!(tape.read(125), Symbol::One);
        assert_eq!(tape.head(), 125);
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_load_number_zero_pushes_one_bit() {
        let mut tape = Tape::new();
        tape.load_number(0).unwrap();

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(127), Symbol::Zero);
        assert_eq!(tape.head(), 127);
    }

    #[test]
    fn test_erase_right_edge() {
        let mut tape = Tape::new();
        tape.load_number(0b11).unwrap();

        // Head to the rightmost cell (one inside the right sentinel).
        tape.move_head_right();
        assert_eq!(tape.head(), 127);
        tape.write(Symbol::Blank).unwrap();

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(127), Symbol::Blank);
        assert_eq!(tape.read(126), Symbol::One);
    }

    #[test]
    fn test_erase_left_edge() {
        let mut tape = Tape::new();
        tape.load_number(0b11).unwrap();

        // Head is already on the leftmost cell after loading.
        tape.write(Symbol::Blank).unwrap();

        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(126), Symbol::Blank);
        assert_eq!(tape.read(127), Symbol::One);
    }

    #[test]
    fn test_erase_interior_is_boundary_violation() {
        let mut tape = Tape::new();
        tape.load_number(0b111).unwrap();

        // Head on the middle cell of three.
        tape.move_head_right();
        let before = tape.clone();

        let err = tape.write(Symbol::Blank).unwrap_err();
        assert!(matches!(err, TapeError::BoundaryViolation { .. }));
        assert_eq!(tape, before);
    }

    #[test]
    fn test_capacity_is_254_cells() {
        let mut tape = Tape::new();
        for i in 0..TAPE_CAPACITY {
            assert!(
                tape.push_left(Symbol::One).is_ok(),
                "push {} of {} failed",
                i + 1,
                TAPE_CAPACITY
            );
        }
        assert_eq!(tape.len(), TAPE_CAPACITY);

        let before = tape.clone();
        assert_eq!(tape.push_left(Symbol::One), Err(TapeError::Exhausted));
        // A rejected write must not mutate anything, head move excepted.
        assert_eq!(tape.bits, before.bits);
        assert_eq!(tape.left, before.left);
        assert_eq!(tape.right, before.right);
    }

    #[test]
    fn test_region_wraps_through_origin() {
        let mut tape = Tape::new();
        // 130 pushes drive the left sentinel from 127 through 0 to 253.
        for _ in 0..130 {
            tape.push_left(Symbol::One).unwrap();
        }

        assert_eq!(tape.left, 253);
        assert_eq!(tape.len(), 130);
        assert_eq!(tape.read(0), Symbol::One);
        assert_eq!(tape.read(255), Symbol::One);
        assert_eq!(tape.read(254), Symbol::One);
        assert_eq!(tape.read(253), Symbol::Blank);
    }

    #[test]
    fn test_head_moves_wrap() {
        let mut tape = Tape::new();
        tape.head = 0;
        tape.move_head_left();
        assert_eq!(tape.head(), 255);
        tape.move_head_right();
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_write_outside_region_then_unreadable() {
        let mut tape = Tape::new();
        tape.push_left(Symbol::One).unwrap();

        // Parking the head far outside and writing stores a bit but does not
        // extend the region, so the cell still reads blank.
        tape.head = 20;
        tape.write(Symbol::One).unwrap();
        assert_eq!(tape.read(20), Symbol::Blank);
        assert_eq!(tape.len(), 1);
    }
}
