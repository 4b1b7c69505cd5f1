//! Board structure with turn and winner tracking

use std::fmt;

use super::{Pos, Stone, HEX_DIRECTIONS, MAX_BOARD_SIZE};
use crate::error::{HexError, Result};
use crate::rules::group_connects;

/// Hex board: an N×N rhombus of cells plus the side to move.
///
/// The board is a plain value. Speculative moves go through [`Board::with_move`],
/// which returns a fresh copy and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    to_move: Stone,
    /// Set as soon as a placement completes a chain; never cleared
    winner: Option<Stone>,
}

impl Board {
    /// Create an empty board with Red to move.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(HexError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Stone::Empty; size * size],
            to_move: Stone::Red,
            winner: None,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    #[inline]
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Override the side to move (position setup).
    pub fn set_to_move(&mut self, player: Stone) -> Result<()> {
        if !player.is_player() {
            return Err(HexError::InvalidPlayer);
        }
        self.to_move = player;
        Ok(())
    }

    #[inline]
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// A board is terminal once someone has connected or no cell is left.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.stone_count() == self.cells.len()
    }

    /// Every empty cell, in row-major order
    pub fn legal_moves(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == Stone::Empty)
            .map(|(idx, _)| Pos::from_index(idx, self.size))
            .collect()
    }

    /// On-board neighbours of `pos`, in [`HEX_DIRECTIONS`] order
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        HEX_DIRECTIONS
            .iter()
            .filter_map(move |&(dr, dc)| pos.offset(dr, dc, self.size))
    }

    /// Copy of this board with the side to move playing `pos`.
    ///
    /// The cell must be empty; the turn passes to the opponent.
    #[must_use]
    pub fn with_move(&self, pos: Pos) -> Board {
        debug_assert!(self.is_empty(pos), "with_move on occupied cell {pos}");
        let mut next = self.clone();
        next.place_stone(pos, self.to_move);
        next.to_move = self.to_move.opponent();
        next
    }

    /// Validated game move for the side to move.
    pub fn play(&mut self, pos: Pos) -> Result<()> {
        if !self.contains(pos) {
            return Err(HexError::OutOfBounds(pos));
        }
        if self.winner.is_some() {
            return Err(HexError::GameOver);
        }
        if !self.is_empty(pos) {
            return Err(HexError::CellOccupied(pos));
        }
        self.place_stone(pos, self.to_move);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Place a stone without touching the turn (position setup).
    ///
    /// Placing `Stone::Empty` is a no-op.
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        if !stone.is_player() {
            return;
        }
        let idx = pos.to_index(self.size);
        self.cells[idx] = stone;
        if self.winner.is_none() && group_connects(self, pos) {
            self.winner = Some(stone);
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_player()).count()
    }

    /// Positions holding `color`, row-major
    pub fn stones(&self, color: Stone) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &s)| s == color)
            .map(move |(idx, _)| Pos::from_index(idx, size))
    }

    /// Fraction of occupied cells, in `[0, 1]`
    #[inline]
    pub fn progress(&self) -> f64 {
        self.stone_count() as f64 / self.cells.len() as f64
    }
}

/// ASCII rhombus: each row is shifted right by one half-cell.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{:>3}{}", row + 1, " ".repeat(row))?;
            for col in 0..self.size {
                let symbol = match self.get(Pos::new(row as u8, col as u8)) {
                    Stone::Empty => '.',
                    Stone::Red => 'R',
                    Stone::Blue => 'B',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
