//! One-ply move ordering
//!
//! Each candidate is played on a copy of the board and scored by the
//! static evaluator from the mover's point of view. The best candidates
//! come first and the list is cut to the branching cap.

use crate::board::{Board, Pos};
use crate::eval::evaluate;

/// Branching cap used when none is configured
pub const DEFAULT_TOP_K: usize = 30;

/// Rank `moves` best-first for the side to move and keep the first `top_k`.
///
/// The sort is stable, so equally scored moves keep their order in `moves`.
/// Returns each move with its one-ply score.
#[must_use]
pub fn order_moves(board: &Board, moves: &[Pos], top_k: usize) -> Vec<(Pos, i32)> {
    order_moves_until(board, moves, top_k, || false)
}

/// [`order_moves`] that gives up scoring once `should_stop` returns true.
///
/// The first move is always scored, so a non-empty `moves` never yields an
/// empty list. Moves left unscored are dropped.
pub fn order_moves_until<F>(board: &Board, moves: &[Pos], top_k: usize, mut should_stop: F) -> Vec<(Pos, i32)>
where
    F: FnMut() -> bool,
{
    let mover = board.to_move();
    let mut scored: Vec<(Pos, i32)> = Vec::with_capacity(moves.len());
    for &mv in moves {
        if !scored.is_empty() && should_stop() {
            break;
        }
        scored.push((mv, evaluate(&board.with_move(mv), mover)));
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::eval::WIN_SCORE;

    #[test]
    fn test_ordering_is_descending() {
        let board = Board::new(4).unwrap();
        let ordered = order_moves(&board, &board.legal_moves(), 30);
        assert_eq!(ordered.len(), 16);
        for pair in ordered.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_truncates_to_top_k() {
        let board = Board::new(5).unwrap();
        let ordered = order_moves(&board, &board.legal_moves(), 3);
        assert_eq!(ordered.len(), 3);
    }

    #[test]
    fn test_winning_move_first() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 1), Stone::Red);
        board.place_stone(Pos::new(1, 1), Stone::Red);
        board.place_stone(Pos::new(0, 0), Stone::Blue);
        board.place_stone(Pos::new(1, 0), Stone::Blue);

        let ordered = order_moves(&board, &board.legal_moves(), 30);
        assert_eq!(ordered[0].1, WIN_SCORE);
        let winner = board.with_move(ordered[0].0).winner();
        assert_eq!(winner, Some(Stone::Red));
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Mirror-image cells score the same for Red on an empty board
        let board = Board::new(3).unwrap();
        let moves = [Pos::new(0, 0), Pos::new(2, 2)];
        let ordered = order_moves(&board, &moves, 30);
        assert_eq!(ordered[0].1, ordered[1].1);
        assert_eq!(ordered[0].0, Pos::new(0, 0));

        let reversed = [Pos::new(2, 2), Pos::new(0, 0)];
        let ordered = order_moves(&board, &reversed, 30);
        assert_eq!(ordered[0].0, Pos::new(2, 2));
    }

    #[test]
    fn test_stop_keeps_scored_prefix() {
        let board = Board::new(4).unwrap();
        let moves = board.legal_moves();
        let mut calls = 0;
        let ordered = order_moves_until(&board, &moves, 30, || {
            calls += 1;
            calls > 2
        });
        assert_eq!(ordered.len(), 3);
        assert!(ordered.iter().all(|(mv, _)| moves[..3].contains(mv)));
    }

    #[test]
    fn test_stop_still_scores_first_move() {
        let board = Board::new(4).unwrap();
        let moves = board.legal_moves();
        let ordered = order_moves_until(&board, &moves, 30, || true);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].0, moves[0]);
    }

    #[test]
    fn test_empty_candidates() {
        let board = Board::new(3).unwrap();
        assert!(order_moves(&board, &[], 30).is_empty());
    }
}
