//! Win condition checking for Hex
//!
//! Red wins by linking row 0 to row N-1, Blue by linking column 0 to
//! column N-1. Chains follow the six hexagonal neighbour directions.

use std::collections::VecDeque;

use crate::board::{Board, Pos, Stone};

/// Is `pos` on the edge this color starts from (Red: top row, Blue: left column)?
#[inline]
pub fn is_start_edge(pos: Pos, color: Stone) -> bool {
    match color {
        Stone::Red => pos.row == 0,
        Stone::Blue => pos.col == 0,
        Stone::Empty => false,
    }
}

/// Is `pos` on the edge this color must reach (Red: bottom row, Blue: right column)?
#[inline]
pub fn is_goal_edge(pos: Pos, color: Stone, size: usize) -> bool {
    let last = (size - 1) as u8;
    match color {
        Stone::Red => pos.row == last,
        Stone::Blue => pos.col == last,
        Stone::Empty => false,
    }
}

/// Does the chain containing `pos` touch both of its owner's edges?
///
/// A newly completed connection always runs through the stone just placed,
/// so checking only that stone's group is enough to detect a win.
pub fn group_connects(board: &Board, pos: Pos) -> bool {
    let color = board.get(pos);
    if !color.is_player() {
        return false;
    }

    let size = board.size();
    let mut seen = vec![false; size * size];
    let mut stack = vec![pos];
    seen[pos.to_index(size)] = true;
    let (mut start, mut goal) = (false, false);

    while let Some(cur) = stack.pop() {
        start |= is_start_edge(cur, color);
        goal |= is_goal_edge(cur, color, size);
        if start && goal {
            return true;
        }
        for next in board.neighbors(cur) {
            let idx = next.to_index(size);
            if !seen[idx] && board.get(next) == color {
                seen[idx] = true;
                stack.push(next);
            }
        }
    }
    false
}

/// Full scan: does `color` have any chain linking its two edges?
pub fn has_connection(board: &Board, color: Stone) -> bool {
    winning_chain(board, color).is_some()
}

/// Shortest chain of `color` stones linking its two edges, start edge first.
///
/// Breadth-first over own stones, so the returned chain is minimal in length.
/// Used to highlight the winning path.
pub fn winning_chain(board: &Board, color: Stone) -> Option<Vec<Pos>> {
    if !color.is_player() {
        return None;
    }

    let size = board.size();
    let mut parent: Vec<Option<Pos>> = vec![None; size * size];
    let mut seen = vec![false; size * size];
    let mut queue = VecDeque::new();

    for pos in board.stones(color).filter(|&p| is_start_edge(p, color)) {
        seen[pos.to_index(size)] = true;
        queue.push_back(pos);
    }

    while let Some(cur) = queue.pop_front() {
        if is_goal_edge(cur, color, size) {
            let mut chain = vec![cur];
            let mut at = cur;
            while let Some(prev) = parent[at.to_index(size)] {
                chain.push(prev);
                at = prev;
            }
            chain.reverse();
            return Some(chain);
        }
        for next in board.neighbors(cur) {
            let idx = next.to_index(size);
            if !seen[idx] && board.get(next) == color {
                seen[idx] = true;
                parent[idx] = Some(cur);
                queue.push_back(next);
            }
        }
    }
    None
}
