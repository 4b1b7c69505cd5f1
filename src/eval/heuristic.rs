//! Heuristic evaluation function for Hex board positions
//!
//! This module provides the static evaluator for the minimax search.
//! It scores a position from one player's perspective as a sum of:
//! - Connection patterns (bridges, edge and interior templates)
//! - A penalty for empty neighbours that lead sideways
//! - Threats (double threats, ladders) minus opponent bridges
//! - A penalty for open principal diagonals
//! - Shortest remaining connection distance
//! - Central and corner influence

use crate::board::{Board, Pos, Stone, HEX_DIRECTIONS};

use super::distance::distance_to_connect;
use super::weights::{EvalWeights, Stage, WIN_SCORE};

type Offset = (i32, i32);

/// Bridge offset with the two carrier cells that link it to the anchor.
/// Each bridge offset is the sum of two adjacent hex directions.
const BRIDGES: [(Offset, Offset, Offset); 6] = [
    ((-2, 1), (-1, 0), (-1, 1)),
    ((-1, 2), (-1, 1), (0, 1)),
    ((1, 1), (0, 1), (1, 0)),
    ((2, -1), (1, 0), (1, -1)),
    ((1, -2), (1, -1), (0, -1)),
    ((-1, -1), (0, -1), (-1, 0)),
];

/// Two own stones around the anchor.
/// Listed with their point reflections and transposes.
const EDGE_TEMPLATES: [[Offset; 2]; 6] = [
    [(-1, 0), (0, 1)],
    [(0, -1), (1, 0)],
    [(1, -1), (1, 0)],
    [(-1, 1), (-1, 0)],
    [(-1, 1), (0, 1)],
    [(1, -1), (0, -1)],
];

/// Trapezoid, crescent and diamond, with their reflections and transposes.
const INTERIOR_TEMPLATES: [&[Offset]; 9] = [
    // trapezoid
    &[(0, -1), (1, 0), (0, 1)],
    &[(0, 1), (-1, 0), (0, -1)],
    &[(-1, 0), (0, 1), (1, 0)],
    &[(1, 0), (0, -1), (-1, 0)],
    // crescent
    &[(-1, 1), (1, -1), (0, -2)],
    &[(1, -1), (-1, 1), (0, 2)],
    &[(1, -1), (-1, 1), (-2, 0)],
    &[(-1, 1), (1, -1), (2, 0)],
    // diamond
    &[(0, -1), (-1, 0), (0, 1), (1, 0)],
];

/// Evaluate the board from the perspective of the given player.
///
/// Returns a score where:
/// - Positive values favour `player`
/// - `WIN_SCORE` / `-WIN_SCORE` for a board already won / lost
///
/// Deterministic and free of side effects. Swapping colours together with
/// transposing the board yields the same score for the other player.
///
/// # Panics
/// Panics if `player` is `Stone::Empty`.
#[must_use]
pub fn evaluate(board: &Board, player: Stone) -> i32 {
    assert!(player.is_player(), "evaluate needs Red or Blue, got {player}");

    if let Some(winner) = board.winner() {
        return if winner == player { WIN_SCORE } else { -WIN_SCORE };
    }

    let stage = Stage::from_progress(board.progress());
    let w = stage.weights();
    let opponent = player.opponent();
    let size = board.size();

    let mut score = 0;
    for pos in board.stones(player) {
        score += connection_score(board, pos, player, stage, w);
        score += misalignment_score(board, pos, player, w);
        score += threat_score(board, pos, player, w);
        score += influence_score(size, pos, w);
    }

    // Every opponent bridge left standing is a connection we failed to cut
    let opponent_bridges = board
        .stones(opponent)
        .filter(|&pos| bridge_offsets(board, pos, opponent).next().is_some())
        .count() as i32;
    score -= opponent_bridges * w.block_opponent;

    score -= open_diagonals(board, player) * w.diagonal_threat;
    score -= distance_to_connect(board, player) * w.free_spaces;

    score
}

/// Does an offset make more progress along `player`'s goal axis than across it?
#[inline]
fn advances(player: Stone, offset: Offset) -> bool {
    let (along, across) = player.axis_components(offset.0, offset.1);
    along.abs() > across.abs()
}

/// Stone on a side edge the player is not trying to connect
#[inline]
fn is_flush(pos: Pos, player: Stone, size: usize) -> bool {
    let last = (size - 1) as u8;
    match player {
        Stone::Blue => pos.row == 0 || pos.row == last,
        _ => pos.col == 0 || pos.col == last,
    }
}

#[inline]
fn is_aligned(pos: Pos, player: Stone, size: usize, direction: Offset) -> bool {
    advances(player, direction) && !is_flush(pos, player, size)
}

#[inline]
fn holds(board: &Board, pos: Pos, offset: Offset, stone: Stone) -> bool {
    pos.offset(offset.0, offset.1, board.size())
        .is_some_and(|p| board.get(p) == stone)
}

/// Offsets of every bridge anchored at `pos`
fn bridge_offsets(board: &Board, pos: Pos, color: Stone) -> impl Iterator<Item = Offset> + '_ {
    BRIDGES
        .iter()
        .filter(move |&&(far, c1, c2)| {
            holds(board, pos, far, color)
                && holds(board, pos, c1, Stone::Empty)
                && holds(board, pos, c2, Stone::Empty)
        })
        .map(|&(far, _, _)| far)
}

#[inline]
fn template_direction(template: &[Offset]) -> Offset {
    template
        .iter()
        .fold((0, 0), |(r, c), &(dr, dc)| (r + dr, c + dc))
}

/// Pattern weight for one stone: each kind counts once, boosted if any
/// matching instance points along the goal axis.
fn pattern_weight<I>(w: &EvalWeights, weight: i32, pos: Pos, player: Stone, size: usize, directions: I) -> i32
where
    I: Iterator<Item = Offset>,
{
    let mut found = false;
    let mut aligned = false;
    for dir in directions {
        found = true;
        aligned |= is_aligned(pos, player, size, dir);
    }
    if found {
        w.scaled(weight, aligned)
    } else {
        0
    }
}

fn connection_score(board: &Board, pos: Pos, player: Stone, stage: Stage, w: &EvalWeights) -> i32 {
    let size = board.size();
    let mut score = pattern_weight(w, w.bridge, pos, player, size, bridge_offsets(board, pos, player));

    if stage.uses_templates() {
        let edge = EDGE_TEMPLATES
            .iter()
            .filter(|t| t.iter().all(|&o| holds(board, pos, o, player)))
            .map(|t| template_direction(t));
        score += pattern_weight(w, w.edge_template, pos, player, size, edge);

        let interior = INTERIOR_TEMPLATES
            .iter()
            .filter(|t| t.iter().all(|&o| holds(board, pos, o, player)))
            .map(|t| template_direction(t));
        score += pattern_weight(w, w.interior_template, pos, player, size, interior);
    }

    score
}

fn misalignment_score(board: &Board, pos: Pos, player: Stone, w: &EvalWeights) -> i32 {
    HEX_DIRECTIONS
        .iter()
        .filter(|&&dir| !advances(player, dir) && holds(board, pos, dir, Stone::Empty))
        .count() as i32
        * w.misalignment_penalty
}

fn threat_score(board: &Board, pos: Pos, player: Stone, w: &EvalWeights) -> i32 {
    let size = board.size();
    let mut score = 0;

    let forward_spaces = HEX_DIRECTIONS
        .iter()
        .filter(|&&dir| advances(player, dir) && holds(board, pos, dir, Stone::Empty))
        .count();
    if forward_spaces >= 2 {
        score += w.scaled(w.double_threat, !is_flush(pos, player, size));
    }

    // Ladder: an adjacent own stone that can still step on in another direction
    let ladders = HEX_DIRECTIONS
        .iter()
        .filter(|&&first| holds(board, pos, first, player))
        .flat_map(|&first| {
            HEX_DIRECTIONS
                .iter()
                .filter(move |&&second| second != first)
                .filter(move |&&second| holds(board, pos, (first.0 + second.0, first.1 + second.1), Stone::Empty))
                .map(move |&second| (first.0 + second.0, first.1 + second.1))
        });
    score += pattern_weight(w, w.ladder, pos, player, size, ladders);

    score
}

/// Number of principal diagonals (main and anti) holding no stone of `player`
fn open_diagonals(board: &Board, player: Stone) -> i32 {
    let size = board.size();
    let main = (0..size).all(|i| board.get(Pos::new(i as u8, i as u8)) != player);
    let anti = (0..size).all(|i| board.get(Pos::new(i as u8, (size - 1 - i) as u8)) != player);
    main as i32 + anti as i32
}

fn influence_score(size: usize, pos: Pos, w: &EvalWeights) -> i32 {
    let (row, col) = (pos.row as usize, pos.col as usize);
    let mut score = 0;

    let (lo, hi) = (size / 3, 2 * size / 3);
    if (lo..=hi).contains(&row) && (lo..=hi).contains(&col) {
        score += w.central_area;
    }

    let margin = size / 4;
    let near = |x: usize| x < margin || x >= size - margin;
    if near(row) && near(col) {
        score += w.corner_area;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

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

    /// Transpose the board and swap the colours
    fn mirrored(board: &Board) -> Board {
        let mut out = Board::new(board.size()).unwrap();
        for pos in board.stones(Stone::Red) {
            out.place_stone(pos.transposed(), Stone::Blue);
        }
        for pos in board.stones(Stone::Blue) {
            out.place_stone(pos.transposed(), Stone::Red);
        }
        out
    }

    #[test]
    fn test_evaluate_empty_board() {
        let board = Board::new(5).unwrap();
        // Two open diagonals (2 * 20) and a five-cell distance (5 * 40)
        assert_eq!(evaluate(&board, Stone::Red), -240);
        assert_eq!(evaluate(&board, Stone::Blue), -240);
    }

    #[test]
    fn test_evaluate_won_position() {
        let board = board_with(3, &[(0, 1), (1, 1), (2, 1)], &[(0, 0)]);
        assert_eq!(evaluate(&board, Stone::Red), WIN_SCORE);
        assert_eq!(evaluate(&board, Stone::Blue), -WIN_SCORE);
    }

    #[test]
    #[should_panic]
    fn test_evaluate_rejects_empty_player() {
        let board = Board::new(3).unwrap();
        let _ = evaluate(&board, Stone::Empty);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let board = board_with(5, &[(1, 1), (2, 3)], &[(2, 2)]);
        assert_eq!(evaluate(&board, Stone::Red), evaluate(&board, Stone::Red));
    }

    #[test]
    fn test_symmetric_layout_equal_for_both_colors() {
        // Invariant under transposition and 180° rotation
        let board = board_with(5, &[(1, 1), (3, 3)], &[(1, 3), (3, 1)]);
        let swapped = board_with(5, &[(1, 3), (3, 1)], &[(1, 1), (3, 3)]);
        assert_eq!(evaluate(&board, Stone::Red), evaluate(&swapped, Stone::Blue));
    }

    #[test]
    fn test_mirror_equivariance_all_stages() {
        let layouts: [(&[(u8, u8)], &[(u8, u8)]); 3] = [
            (&[(0, 2), (2, 1)], &[(1, 3)]),
            (
                &[(0, 2), (1, 1), (1, 2), (2, 2), (3, 0), (2, 0)],
                &[(1, 3), (2, 3), (3, 3), (0, 4), (4, 1), (3, 2), (0, 0)],
            ),
            (
                &[(0, 1), (1, 1), (1, 2), (2, 2), (2, 1), (3, 0), (4, 4), (0, 3), (3, 3)],
                &[(0, 0), (1, 0), (2, 3), (3, 2), (4, 0), (4, 2), (1, 4), (2, 4), (0, 4)],
            ),
        ];

        for (red, blue) in layouts {
            let board = board_with(5, red, blue);
            let mirror = mirrored(&board);
            assert_eq!(
                evaluate(&board, Stone::Red),
                evaluate(&mirror, Stone::Blue),
                "Red view should match mirrored Blue view"
            );
            assert_eq!(evaluate(&board, Stone::Blue), evaluate(&mirror, Stone::Red));
        }
    }

    #[test]
    fn test_bridge_worth_more_than_broken_bridge() {
        // (1,1) and (2,2) are bridged through carriers (1,2) and (2,1)
        let intact = board_with(5, &[(1, 1), (2, 2)], &[]);
        let broken = board_with(5, &[(1, 1), (2, 2)], &[(2, 1)]);
        assert!(
            evaluate(&intact, Stone::Red) > evaluate(&broken, Stone::Red),
            "Occupying a carrier should break the bridge"
        );
    }

    #[test]
    fn test_bridge_detection() {
        let board = board_with(5, &[(1, 1), (2, 2)], &[]);
        let offsets: Vec<_> = bridge_offsets(&board, Pos::new(1, 1), Stone::Red).collect();
        assert_eq!(offsets, vec![(1, 1)]);

        let blocked = board_with(5, &[(1, 1), (2, 2)], &[(1, 2)]);
        assert_eq!(bridge_offsets(&blocked, Pos::new(1, 1), Stone::Red).count(), 0);
    }

    #[test]
    fn test_opponent_bridge_penalised() {
        let quiet = board_with(7, &[(6, 6)], &[(3, 0), (3, 2)]);
        let bridged = board_with(7, &[(6, 6)], &[(3, 0), (2, 2)]);
        // Same Red stone, same Blue stone count; only the bridge differs.
        // Both Blue stones anchor the bridge, so it is charged twice.
        assert!(bridge_offsets(&bridged, Pos::new(3, 0), Stone::Blue).next().is_some());
        assert!(bridge_offsets(&quiet, Pos::new(3, 0), Stone::Blue).next().is_none());
        assert_eq!(
            evaluate(&bridged, Stone::Red),
            evaluate(&quiet, Stone::Red) - 2 * Stage::Early.weights().block_opponent
        );
    }

    #[test]
    fn test_advancing_directions() {
        assert!(advances(Stone::Red, (1, 0)));
        assert!(advances(Stone::Red, (2, -1)));
        assert!(!advances(Stone::Red, (1, -1)));
        assert!(!advances(Stone::Red, (0, 1)));
        assert!(advances(Stone::Blue, (0, 1)));
        assert!(advances(Stone::Blue, (-1, 2)));
        assert!(!advances(Stone::Blue, (1, 0)));
    }

    #[test]
    fn test_flush_edges() {
        assert!(is_flush(Pos::new(2, 0), Stone::Red, 5));
        assert!(!is_flush(Pos::new(0, 2), Stone::Red, 5));
        assert!(is_flush(Pos::new(0, 2), Stone::Blue, 5));
        assert!(!is_aligned(Pos::new(2, 4), Stone::Red, 5, (1, 0)));
        assert!(is_aligned(Pos::new(2, 3), Stone::Red, 5, (1, 0)));
    }

    #[test]
    fn test_misalignment_counts_sideways_gaps() {
        let board = board_with(5, &[(2, 2)], &[]);
        let w = Stage::Early.weights();
        // Four of six neighbours lead sideways for Red
        assert_eq!(misalignment_score(&board, Pos::new(2, 2), Stone::Red, w), -40);
    }

    #[test]
    fn test_templates_only_after_opening() {
        // Trapezoid around (2,2), 4/25 occupied: early stage
        let early = board_with(5, &[(2, 2), (2, 1), (3, 2), (2, 3)], &[]);
        let w = Stage::Early.weights();
        let no_templates = connection_score(&early, Pos::new(2, 2), Stone::Red, Stage::Early, w);
        let with_templates = connection_score(&early, Pos::new(2, 2), Stone::Red, Stage::Mid, w);
        assert!(with_templates > no_templates);
    }

    #[test]
    fn test_ladder_detected() {
        let board = board_with(5, &[(2, 2), (2, 3)], &[]);
        let w = Stage::Early.weights();
        let alone = board_with(5, &[(2, 2)], &[]);
        let with = threat_score(&board, Pos::new(2, 2), Stone::Red, w);
        let without = threat_score(&alone, Pos::new(2, 2), Stone::Red, w);
        assert!(with > without, "Adjacent stone should form a ladder");
    }

    #[test]
    fn test_double_threat_scaled_in_interior() {
        // Lone Red stone: both cells along its axis are free, no ladder
        let board = board_with(5, &[(2, 2)], &[]);
        for stage in [Stage::Early, Stage::Mid, Stage::Late] {
            let w = stage.weights();
            assert_eq!(threat_score(&board, Pos::new(2, 2), Stone::Red, w), w.scaled(w.double_threat, true));
        }
    }

    #[test]
    fn test_double_threat_unscaled_when_flush() {
        // Column 0 is a side edge for Red
        let board = board_with(5, &[(2, 0)], &[]);
        let w = Stage::Mid.weights();
        assert_eq!(threat_score(&board, Pos::new(2, 0), Stone::Red, w), w.double_threat);
    }

    #[test]
    fn test_double_threat_needs_two_forward_spaces() {
        let board = board_with(5, &[(2, 2)], &[(1, 2)]);
        let w = Stage::Early.weights();
        assert_eq!(threat_score(&board, Pos::new(2, 2), Stone::Red, w), 0);
    }

    #[test]
    fn test_open_diagonals() {
        let board = board_with(5, &[(2, 2)], &[(0, 0)]);
        assert_eq!(open_diagonals(&board, Stone::Red), 0);
        assert_eq!(open_diagonals(&board, Stone::Blue), 1);
    }

    #[test]
    fn test_influence_regions() {
        let w = Stage::Early.weights();
        assert_eq!(influence_score(9, Pos::new(4, 4), w), w.central_area);
        assert_eq!(influence_score(9, Pos::new(0, 0), w), w.corner_area);
        assert_eq!(influence_score(9, Pos::new(0, 4), w), 0);
        assert_eq!(influence_score(9, Pos::new(8, 8), w), w.corner_area);
    }
}
