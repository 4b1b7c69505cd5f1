//! Board representation for Hex

pub mod board;


use std::fmt;
use std::str::FromStr;

use crate::error::HexError;

// Re-exports
pub use board::Board;

/// Largest supported board (one column letter per column)
pub const MAX_BOARD_SIZE: usize = 26;
/// Board size used when none is specified
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// The six axial neighbour offsets of a cell, as `(d_row, d_col)`
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Cell contents and player colors.
///
/// Red moves first and connects the top row to the bottom row.
/// Blue connects the left column to the right column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Red,
    Blue,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Red => Stone::Blue,
            Stone::Blue => Stone::Red,
            Stone::Empty => Stone::Empty,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Stone::Empty
    }

    /// Split an offset into (progress along this player's goal axis, lateral drift).
    #[inline]
    pub fn axis_components(self, d_row: i32, d_col: i32) -> (i32, i32) {
        match self {
            Stone::Blue => (d_col, d_row),
            _ => (d_row, d_col),
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stone::Empty => "Empty",
            Stone::Red => "Red",
            Stone::Blue => "Blue",
        };
        f.write_str(name)
    }
}

/// Position on the board.
///
/// Ordering is row-major, which is also the order of `Board::legal_moves`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_BOARD_SIZE && (col as usize) < MAX_BOARD_SIZE);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && row < size as i32 && col >= 0 && col < size as i32
    }

    /// Cell at `(row + d_row, col + d_col)` if it lies on a `size` board
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32, size: usize) -> Option<Pos> {
        let r = self.row as i32 + d_row;
        let c = self.col as i32 + d_col;
        if Pos::is_valid(r, c, size) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Mirror across the main diagonal
    #[inline]
    pub fn transposed(self) -> Pos {
        Pos::new(self.col, self.row)
    }
}

/// Column letter followed by the 1-based row, e.g. `c3` is row 2, col 2.
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row as u32 + 1)
    }
}

impl FromStr for Pos {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let bad = || HexError::InvalidNotation(s.to_string());

        let mut chars = text.chars();
        let letter = chars.next().ok_or_else(bad)?.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(bad());
        }
        let row: usize = chars.as_str().parse().map_err(|_| bad())?;
        if row == 0 || row > MAX_BOARD_SIZE {
            return Err(bad());
        }

        Ok(Pos::new((row - 1) as u8, letter as u8 - b'a'))
    }
}
