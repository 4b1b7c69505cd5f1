//! Player that answers move requests for a Hex game
//!
//! The player wraps one [`Searcher`] and a [`SearchConfig`]. Each move
//! request resets the searcher's cancellation token, runs the configured
//! driver and reports the move together with the search statistics.
//!
//! # Example
//!
//! ```
//! use hex::{Board, HexPlayer, Pos, SearchConfig};
//!
//! let config = SearchConfig::fixed(2).unwrap().with_top_k(6).unwrap();
//! let mut player = HexPlayer::new(config);
//!
//! let mut board = Board::new(5).unwrap();
//! board.play(Pos::new(2, 2)).unwrap();
//!
//! let result = player.get_move_with_stats(&board);
//! println!("{} plays {:?} after {} nodes", player.name(), result.best_move, result.nodes);
//! ```

use std::time::{Duration, Instant};

use log::warn;

use crate::board::{Board, Pos};
use crate::error::Result;
use crate::search::{CancelToken, SearchConfig, SearchMode, SearchResult, Searcher};

/// Result of a move request with search statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen move, `None` on a full board
    pub best_move: Option<Pos>,
    /// Minimax score of the chosen move for the side to move
    pub score: i32,
    /// Driver that produced the move
    pub mode: SearchMode,
    /// Deepest completed depth
    pub depth: u32,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Stopped early by a timeout or budget
    pub cancelled: bool,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            mode: result.mode,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
            cancelled: result.cancelled,
        }
    }
}

/// Alpha-beta Hex player.
///
/// Holds the search configuration between requests. [`HexPlayer::timeout`]
/// may be called from another thread through a token obtained with
/// [`HexPlayer::cancel_token`].
pub struct HexPlayer {
    searcher: Searcher,
    config: SearchConfig,
    name: String,
}

impl HexPlayer {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let name = player_name(&config);
        Self {
            searcher: Searcher::new(),
            config,
            name,
        }
    }

    /// Create a player from plain settings.
    ///
    /// # Arguments
    ///
    /// * `max_depth` - Deepest search depth, at least 1
    /// * `iterative` - Use iterative deepening instead of one fixed-depth pass
    /// * `time_limit` - Optional wall-clock budget per move
    ///
    /// # Errors
    ///
    /// Returns [`crate::HexError::InvalidDepth`] when `max_depth` is 0.
    pub fn with_config(max_depth: u32, iterative: bool, time_limit: Option<Duration>) -> Result<Self> {
        let mut config = SearchConfig::new(max_depth, iterative)?;
        if let Some(limit) = time_limit {
            config = config.with_time_limit(limit);
        }
        Ok(Self::new(config))
    }

    /// Get the best move for the side to move.
    ///
    /// Use [`HexPlayer::get_move_with_stats`] for search statistics.
    #[must_use]
    pub fn get_move(&mut self, board: &Board) -> Option<Pos> {
        self.get_move_with_stats(board).best_move
    }

    /// Get the best move with detailed search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board) -> MoveResult {
        self.begin_request();
        self.run_request(board)
    }

    /// Clear any earlier timeout and return the handle for the next request.
    ///
    /// Call this before handing the player to a worker thread, then
    /// [`HexPlayer::run_request`] there, so an early timeout is not lost.
    pub fn begin_request(&self) -> CancelToken {
        self.searcher.begin_request()
    }

    /// Answer the request opened by [`HexPlayer::begin_request`].
    #[must_use]
    pub fn run_request(&mut self, board: &Board) -> MoveResult {
        let start = Instant::now();
        let result = self.searcher.search(board, &self.config);
        let time_ms = start.elapsed().as_millis() as u64;

        if result.cancelled && result.depth == 0 {
            warn!("{} ran out of time before finishing depth 1", self.name);
        }
        MoveResult::from_search(result, time_ms)
    }

    /// Stop the running search; it answers with its best completed result.
    pub fn timeout(&self) {
        self.searcher.cancel();
    }

    /// Handle for calling the timeout from another thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.searcher.cancel_token()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.name = player_name(&config);
        self.config = config;
    }
}

impl Default for HexPlayer {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn player_name(config: &SearchConfig) -> String {
    match config.mode() {
        SearchMode::FixedDepth => format!("AlphaBeta(d{})", config.max_depth()),
        SearchMode::IterativeDeepening => format!("AlphaBeta-ID(d{})", config.max_depth()),
    }
}
