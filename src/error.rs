//! Error type shared by the board, search configuration and front ends

use thiserror::Error;

use crate::board::Pos;

/// Errors raised when a request violates a precondition.
///
/// Cancellation and "no legal move" are normal outcomes of a search and
/// never surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("search depth must be at least 1 (got {0})")]
    InvalidDepth(u32),
    #[error("top-k branching cap must be at least 1 (got {0})")]
    InvalidTopK(usize),
    #[error("board size must be between 1 and 26 (got {0})")]
    InvalidBoardSize(usize),
    #[error("an empty cell cannot be a player")]
    InvalidPlayer,
    #[error("{0} is outside the board")]
    OutOfBounds(Pos),
    #[error("{0} is already occupied")]
    CellOccupied(Pos),
    #[error("the game is already over")]
    GameOver,
    #[error("cannot parse move notation {0:?}")]
    InvalidNotation(String),
}

pub type Result<T> = std::result::Result<T, HexError>;
