//! Alpha-beta minimax with optional iterative deepening
//!
//! This module implements the move search for the Hex engine.
//! Both drivers share one node routine:
//!
//! - **Fixed depth**: every ordered root move is searched once at the
//!   configured depth.
//! - **Iterative deepening**: depths `1..=max` are searched in turn and only
//!   a depth that finishes without cancellation replaces the answer.
//!
//! Leaves are scored with the static evaluator from the point of view of the
//! player who asked for the move. Every node orders its children one ply
//! ahead and keeps only the top-K.
//!
//! # Example
//!
//! ```
//! use hex::board::Board;
//! use hex::search::{SearchConfig, Searcher};
//!
//! let board = Board::new(5).unwrap();
//! let config = SearchConfig::iterative(2).unwrap().with_top_k(8).unwrap();
//! let mut searcher = Searcher::new();
//!
//! let result = searcher.choose_move(&board, &config);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {} at depth {}", best_move, result.depth);
//! }
//! ```

use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::{Board, Pos, Stone};
use crate::error::{HexError, Result};
use crate::eval::{evaluate, WIN_SCORE};

use super::cancel::CancelToken;
use super::ordering::{order_moves_until, DEFAULT_TOP_K};

/// Infinity score for alpha-beta bounds
const INF: i32 = i32::MAX;

/// Which driver produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    FixedDepth,
    IterativeDeepening,
}

/// Parameters for one move request.
///
/// Built through the validating constructors; a depth or top-K of zero is
/// rejected up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    max_depth: u32,
    iterative: bool,
    top_k: usize,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl SearchConfig {
    /// # Errors
    /// [`HexError::InvalidDepth`] when `max_depth` is 0.
    pub fn new(max_depth: u32, iterative: bool) -> Result<Self> {
        if max_depth == 0 {
            return Err(HexError::InvalidDepth(max_depth));
        }
        Ok(Self {
            max_depth,
            iterative,
            top_k: DEFAULT_TOP_K,
            time_limit: None,
            node_limit: None,
        })
    }

    pub fn fixed(max_depth: u32) -> Result<Self> {
        Self::new(max_depth, false)
    }

    pub fn iterative(max_depth: u32) -> Result<Self> {
        Self::new(max_depth, true)
    }

    /// # Errors
    /// [`HexError::InvalidTopK`] when `top_k` is 0.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(HexError::InvalidTopK(top_k));
        }
        self.top_k = top_k;
        Ok(self)
    }

    /// Wall-clock budget; the search cancels itself once it is spent.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Node budget; the search cancels itself on the first node past it.
    #[must_use]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn is_iterative(&self) -> bool {
        self.iterative
    }

    #[inline]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn mode(&self) -> SearchMode {
        if self.iterative {
            SearchMode::IterativeDeepening
        } else {
            SearchMode::FixedDepth
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            iterative: true,
            top_k: DEFAULT_TOP_K,
            time_limit: None,
            node_limit: None,
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` only when the board had no empty cell
    pub best_move: Option<Pos>,
    /// Minimax value of the best move, from the mover's point of view
    pub score: i32,
    /// Deepest fully completed search depth
    pub depth: u32,
    /// Nodes visited by the alpha-beta routine
    pub nodes: u64,
    pub mode: SearchMode,
    /// Whether the search was stopped before finishing
    pub cancelled: bool,
}

impl SearchResult {
    fn no_move(mode: SearchMode) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            mode,
            cancelled: false,
        }
    }
}

/// Best root move of one pass and whether every root move was searched.
struct RootPass {
    best: Option<(Pos, i32)>,
    complete: bool,
}

// =============================================================================
// Worker: per-request search state
// =============================================================================

struct Worker {
    cancel: CancelToken,
    root_player: Stone,
    top_k: usize,
    nodes: u64,
    start_time: Instant,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl Worker {
    fn new(cancel: CancelToken, root_player: Stone, config: &SearchConfig, start_time: Instant) -> Self {
        Self {
            cancel,
            root_player,
            top_k: config.top_k(),
            nodes: 0,
            start_time,
            time_limit: config.time_limit(),
            node_limit: config.node_limit(),
        }
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Check the stop flag and both budgets, raising the flag if one is spent.
    #[inline]
    fn check_limits(&self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        let over_nodes = self.node_limit.is_some_and(|limit| self.nodes > limit);
        let over_time = self
            .time_limit
            .is_some_and(|limit| self.start_time.elapsed() >= limit);
        if over_nodes || over_time {
            self.cancel.cancel();
            return true;
        }
        false
    }

    /// Alpha-beta minimax value of `board` for the root player.
    ///
    /// Returns 0 once cancelled; callers must check `is_stopped` and drop it.
    fn best_value(&mut self, board: &Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        if self.check_limits() {
            return 0;
        }

        if depth == 0 || board.is_terminal() {
            return evaluate(board, self.root_player);
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return evaluate(board, self.root_player);
        }

        let top_k = self.top_k;
        let ordered = order_moves_until(board, &moves, top_k, || self.check_limits());
        let mut value = if maximizing { -INF } else { INF };

        for (mv, _) in ordered {
            let child = board.with_move(mv);
            let score = self.best_value(&child, depth - 1, alpha, beta, !maximizing);
            if self.is_stopped() {
                return 0;
            }

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        value
    }

    /// Search every ordered root move at `depth` plies in total.
    fn search_root(&mut self, board: &Board, ordered: &[(Pos, i32)], depth: u32) -> RootPass {
        let mut best: Option<(Pos, i32)> = None;

        for &(mv, _) in ordered {
            let alpha = best.map_or(-INF, |(_, score)| score);
            let child = board.with_move(mv);
            let score = self.best_value(&child, depth - 1, alpha, INF, false);
            if self.is_stopped() {
                return RootPass { best, complete: false };
            }

            trace!("depth {depth}: {mv} -> {score}");
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        RootPass { best, complete: true }
    }
}

// =============================================================================
// Searcher: public API
// =============================================================================

/// Alpha-beta move searcher.
///
/// Owns the cancellation token for its requests. Grab a handle with
/// [`Searcher::cancel_token`] before starting a search to stop it from
/// another thread.
#[derive(Debug, Default)]
pub struct Searcher {
    cancel: CancelToken,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stops the current or next search on this searcher.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Stop the running search at its next node. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Choose a move for the side to move on `board`.
    ///
    /// The flag is lowered on entry, so a cancel issued before this call has
    /// no effect. Never fails: cancellation yields the best completed result
    /// and a full board yields `best_move == None`.
    pub fn choose_move(&mut self, board: &Board, config: &SearchConfig) -> SearchResult {
        self.begin_request();
        self.search(board, config)
    }

    /// Lower the stop flag for a new request and hand out its handle.
    ///
    /// Pair with [`Searcher::search`] when the request starts on another
    /// thread: a cancel issued between the two calls is kept.
    pub fn begin_request(&self) -> CancelToken {
        self.cancel.reset();
        self.cancel.clone()
    }

    /// [`Searcher::choose_move`] without lowering the stop flag first.
    ///
    /// The time limit counts from this call, root move ordering included.
    pub fn search(&mut self, board: &Board, config: &SearchConfig) -> SearchResult {
        let start_time = Instant::now();
        let mode = config.mode();

        let moves = board.legal_moves();
        if moves.is_empty() {
            info!("no legal move on a full board");
            return SearchResult::no_move(mode);
        }

        let root_player = board.to_move();
        info!(
            "{root_player} to move: {:?} search, depth {}, top-{} of {} moves",
            mode,
            config.max_depth(),
            config.top_k(),
            moves.len()
        );

        let mut worker = Worker::new(self.cancel.clone(), root_player, config, start_time);
        let ordered = order_moves_until(board, &moves, config.top_k(), || worker.check_limits());

        // An immediate connection needs no lookahead
        if let Some(&(mv, score)) = ordered.first().filter(|&&(_, score)| score >= WIN_SCORE) {
            info!("{mv} wins on the spot");
            return SearchResult {
                best_move: Some(mv),
                score,
                depth: config.max_depth(),
                nodes: moves.len() as u64,
                mode,
                cancelled: false,
            };
        }

        let result = match mode {
            SearchMode::FixedDepth => Self::search_fixed(&mut worker, board, &ordered, config),
            SearchMode::IterativeDeepening => Self::search_iterative(&mut worker, board, &ordered, config),
        };

        info!(
            "best {} (score {}, depth {}, {} nodes, {:?}){}",
            result.best_move.map_or_else(|| "-".to_string(), |mv| mv.to_string()),
            result.score,
            result.depth,
            result.nodes,
            worker.start_time.elapsed(),
            if result.cancelled { " [cancelled]" } else { "" }
        );
        result
    }

    /// One pass at full depth. An interrupted root move is ignored; the moves
    /// finished before it still count.
    fn search_fixed(worker: &mut Worker, board: &Board, ordered: &[(Pos, i32)], config: &SearchConfig) -> SearchResult {
        let pass = worker.search_root(board, ordered, config.max_depth());
        let (best_move, score) = pass.best.unwrap_or(ordered[0]);

        SearchResult {
            best_move: Some(best_move),
            score,
            depth: if pass.complete { config.max_depth() } else { 0 },
            nodes: worker.nodes,
            mode: SearchMode::FixedDepth,
            cancelled: !pass.complete,
        }
    }

    /// Depths 1..=max; a depth only counts once all its root moves finish.
    fn search_iterative(
        worker: &mut Worker,
        board: &Board,
        ordered: &[(Pos, i32)],
        config: &SearchConfig,
    ) -> SearchResult {
        let (mut best_move, mut best_score) = ordered[0];
        let mut depth_reached = 0;

        for depth in 1..=config.max_depth() {
            let pass = worker.search_root(board, ordered, depth);
            if !pass.complete {
                debug!("depth {depth} interrupted after {} nodes, keeping depth {depth_reached}", worker.nodes);
                break;
            }
            if let Some((mv, score)) = pass.best {
                best_move = mv;
                best_score = score;
            }
            depth_reached = depth;
            debug!("depth {depth} done: {best_move} ({best_score}), {} nodes", worker.nodes);
        }

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth: depth_reached,
            nodes: worker.nodes,
            mode: SearchMode::IterativeDeepening,
            cancelled: worker.is_stopped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ordering::order_moves;

    fn board_with(size: usize, red: &[(u8, u8)], blue: &[(u8, u8)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c) in red {
            board.place_stone(Pos::new(r, c), Stone::Red);
        }
        for &(r, c) in blue {
            board.place_stone(Pos::new(r, c), Stone::Blue);
        }
        board
    }

    /// 3x3 with only (1,1) empty; whoever takes it connects
    fn last_cell_board() -> Board {
        board_with(
            3,
            &[(0, 0), (0, 2), (2, 0), (2, 1)],
            &[(0, 1), (1, 0), (1, 2), (2, 2)],
        )
    }

    /// Unpruned minimax over the same ordered, truncated move lists
    fn minimax(board: &Board, depth: u32, maximizing: bool, root: Stone, top_k: usize) -> i32 {
        if depth == 0 || board.is_terminal() || board.legal_moves().is_empty() {
            return evaluate(board, root);
        }
        let ordered = order_moves(board, &board.legal_moves(), top_k);
        let scores = ordered
            .iter()
            .map(|&(mv, _)| minimax(&board.with_move(mv), depth - 1, !maximizing, root, top_k));
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn minimax_root(board: &Board, depth: u32, top_k: usize) -> Pos {
        let root = board.to_move();
        let mut best: Option<(Pos, i32)> = None;
        for (mv, _) in order_moves(board, &board.legal_moves(), top_k) {
            let score = minimax(&board.with_move(mv), depth - 1, false, root, top_k);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        best.unwrap().0
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(SearchConfig::fixed(0), Err(HexError::InvalidDepth(0)));
        assert_eq!(
            SearchConfig::iterative(3).unwrap().with_top_k(0),
            Err(HexError::InvalidTopK(0))
        );

        let config = SearchConfig::fixed(2).unwrap();
        assert_eq!(config.top_k(), DEFAULT_TOP_K);
        assert_eq!(config.mode(), SearchMode::FixedDepth);
        assert_eq!(SearchConfig::default().mode(), SearchMode::IterativeDeepening);
    }

    #[test]
    fn test_full_board_returns_no_move() {
        let mut board = last_cell_board();
        board.place_stone(Pos::new(1, 1), Stone::Red);
        let result = Searcher::new().choose_move(&board, &SearchConfig::default());
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_single_legal_move_any_config() {
        let board = last_cell_board();
        let configs = [
            SearchConfig::fixed(1).unwrap(),
            SearchConfig::fixed(3).unwrap(),
            SearchConfig::iterative(5).unwrap().with_top_k(1).unwrap(),
        ];
        for config in &configs {
            let result = Searcher::new().choose_move(&board, config);
            assert_eq!(result.best_move, Some(Pos::new(1, 1)));
        }
    }

    #[test]
    fn test_last_cell_completes_chain_for_either_side() {
        let mut board = last_cell_board();
        let result = Searcher::new().choose_move(&board, &SearchConfig::fixed(1).unwrap());
        assert_eq!(result.best_move, Some(Pos::new(1, 1)));
        assert_eq!(board.with_move(Pos::new(1, 1)).winner(), Some(Stone::Red));

        board.set_to_move(Stone::Blue).unwrap();
        let result = Searcher::new().choose_move(&board, &SearchConfig::fixed(1).unwrap());
        assert_eq!(board.with_move(result.best_move.unwrap()).winner(), Some(Stone::Blue));
    }

    #[test]
    fn test_finds_immediate_win() {
        let board = board_with(
            5,
            &[(0, 2), (1, 2), (2, 2), (3, 2)],
            &[(0, 0), (1, 0), (2, 0), (4, 4)],
        );
        let mut searcher = Searcher::new();
        for config in [SearchConfig::fixed(2).unwrap(), SearchConfig::iterative(3).unwrap()] {
            let result = searcher.choose_move(&board, &config);
            let mv = result.best_move.unwrap();
            assert_eq!(board.with_move(mv).winner(), Some(Stone::Red));
            assert_eq!(result.score, WIN_SCORE);
            assert_eq!(result.depth, config.max_depth());
        }
    }

    #[test]
    fn test_empty_board_depth_one() {
        let board = Board::new(5).unwrap();
        let result = Searcher::new().choose_move(&board, &SearchConfig::fixed(1).unwrap());
        assert!(result.best_move.is_some());
        assert!(result.nodes >= 1);
        assert_eq!(result.depth, 1);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let boards = [
            board_with(4, &[(1, 1)], &[(2, 2)]),
            board_with(4, &[(0, 1), (2, 1)], &[(1, 2), (3, 0)]),
        ];
        for board in &boards {
            for depth in 1..=3 {
                let config = SearchConfig::fixed(depth).unwrap().with_top_k(6).unwrap();
                let result = Searcher::new().choose_move(board, &config);
                assert_eq!(
                    result.best_move,
                    Some(minimax_root(board, depth, 6)),
                    "Pruning must not change the chosen move at depth {depth}"
                );
            }
        }
    }

    #[test]
    fn test_iterative_reaches_max_depth() {
        let board = board_with(4, &[(1, 1)], &[(2, 1)]);
        let config = SearchConfig::iterative(3).unwrap().with_top_k(6).unwrap();
        let result = Searcher::new().choose_move(&board, &config);
        assert_eq!(result.depth, 3);
        assert_eq!(result.mode, SearchMode::IterativeDeepening);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_iterative_matches_fixed_at_each_depth() {
        let board = board_with(4, &[(0, 2)], &[(1, 1)]);
        for depth in 1..=3 {
            let fixed = SearchConfig::fixed(depth).unwrap().with_top_k(5).unwrap();
            let iterative = SearchConfig::iterative(depth).unwrap().with_top_k(5).unwrap();
            let a = Searcher::new().choose_move(&board, &fixed);
            let b = Searcher::new().choose_move(&board, &iterative);
            assert_eq!(a.best_move, b.best_move);
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_cancelled_deepening_falls_back_to_last_depth() {
        let board = board_with(5, &[(2, 2)], &[(1, 3)]);
        let top_k = 6;

        for d in 1..=2 {
            // Nodes needed to finish depths 1..=d
            let shallow = SearchConfig::iterative(d).unwrap().with_top_k(top_k).unwrap();
            let budget = Searcher::new().choose_move(&board, &shallow).nodes;

            let deeper = SearchConfig::iterative(d + 1)
                .unwrap()
                .with_top_k(top_k)
                .unwrap()
                .with_node_limit(budget);
            let interrupted = Searcher::new().choose_move(&board, &deeper);

            let fixed = SearchConfig::fixed(d).unwrap().with_top_k(top_k).unwrap();
            let reference = Searcher::new().choose_move(&board, &fixed);

            assert!(interrupted.cancelled);
            assert_eq!(interrupted.depth, d);
            assert_eq!(interrupted.best_move, reference.best_move);
            assert_eq!(interrupted.score, reference.score);
        }
    }

    #[test]
    fn test_zero_time_budget_still_answers() {
        let board = Board::new(5).unwrap();
        let config = SearchConfig::iterative(4).unwrap().with_time_limit(Duration::ZERO);
        let result = Searcher::new().choose_move(&board, &config);

        // The budget is gone before ordering gets past the first candidate
        assert_eq!(result.best_move, Some(board.legal_moves()[0]));
        assert_eq!(result.depth, 0);
        assert!(result.cancelled);
    }

    #[test]
    fn test_time_limit_covers_move_ordering() {
        // Ordering 675 replies on the largest board takes longer than the budget
        let mut board = Board::new(26).unwrap();
        board.play(Pos::new(13, 13)).unwrap();
        let budget = Duration::from_millis(5);
        let config = SearchConfig::iterative(4).unwrap().with_time_limit(budget);

        let start = Instant::now();
        let result = Searcher::new().choose_move(&board, &config);
        let took = start.elapsed();

        assert!(result.cancelled);
        assert!(result.best_move.is_some_and(|mv| board.is_empty(mv)));
        assert!(took < budget * 20, "took {took:?} on a {budget:?} budget");
    }

    #[test]
    fn test_cancel_between_begin_and_search_is_kept() {
        let board = Board::new(5).unwrap();
        let mut searcher = Searcher::new();
        let token = searcher.begin_request();
        token.cancel();

        let result = searcher.search(&board, &SearchConfig::iterative(3).unwrap());
        assert!(result.cancelled);
        assert_eq!(result.depth, 0);
        assert_eq!(result.best_move, Some(board.legal_moves()[0]));
    }

    #[test]
    fn test_interrupted_fixed_depth_reports_partial() {
        let board = Board::new(4).unwrap();
        let config = SearchConfig::fixed(2).unwrap().with_node_limit(3);
        let result = Searcher::new().choose_move(&board, &config);
        assert!(result.cancelled);
        assert_eq!(result.depth, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_stale_cancel_is_cleared() {
        let board = Board::new(4).unwrap();
        let mut searcher = Searcher::new();
        searcher.cancel();
        searcher.cancel();

        let result = searcher.choose_move(&board, &SearchConfig::iterative(2).unwrap());
        assert_eq!(result.depth, 2);
        assert!(!result.cancelled);
        assert!(!searcher.cancel_token().is_cancelled());
    }
}
