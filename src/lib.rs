//! Hex move-search engine
//!
//! A time-bounded alpha-beta engine for Hex, the connection game played on
//! an N×N rhombus of hexagonal cells:
//! - Red moves first and links the top row to the bottom row
//! - Blue links the left column to the right column
//! - Board sizes from 1×1 to 26×26
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, legal moves, copy-on-write moves
//! - [`rules`]: Connection (win) detection
//! - [`eval`]: Stage-weighted static evaluation
//! - [`search`]: Move ordering, alpha-beta, iterative deepening, cancellation
//! - [`engine`]: Player integrating search, timing and statistics
//! - [`ui`]: Desktop GUI
//!
//! # Quick Start
//!
//! ```
//! use hex::{Board, HexPlayer, SearchConfig};
//!
//! let mut board = Board::new(5).unwrap();
//! let config = SearchConfig::iterative(2).unwrap().with_top_k(8).unwrap();
//! let mut player = HexPlayer::new(config);
//!
//! if let Some(pos) = player.get_move(&board) {
//!     board.play(pos).unwrap();
//!     println!("Engine plays {}", pos);
//! }
//! ```
//!
//! # Cancellation
//!
//! A search can be stopped at any time through a [`CancelToken`]. It then
//! answers with the best move of the deepest depth it completed.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use engine::{HexPlayer, MoveResult};
pub use error::HexError;
pub use eval::evaluate;
pub use search::{CancelToken, SearchConfig, SearchMode, SearchResult, Searcher};
