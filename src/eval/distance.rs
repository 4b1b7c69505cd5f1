//! Shortest-connection distance
//!
//! Number of empty cells a player still has to fill to link their two
//! edges, assuming the opponent never answers. Own stones are free to cross,
//! opponent stones are walls.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::board::{Board, Pos, Stone};
use crate::rules::{is_goal_edge, is_start_edge};

/// Returned when the opponent has already cut every path
pub const UNREACHABLE_DISTANCE: i32 = 100_000;

#[inline]
fn step_cost(stone: Stone, player: Stone) -> Option<i32> {
    if stone == player {
        Some(0)
    } else if stone == Stone::Empty {
        Some(1)
    } else {
        None
    }
}

/// Dijkstra from the player's start edge to the opposite edge.
#[must_use]
pub fn distance_to_connect(board: &Board, player: Stone) -> i32 {
    let size = board.size();
    let mut dist = vec![i32::MAX; size * size];
    let mut heap = BinaryHeap::new();

    for idx in 0..size * size {
        let pos = Pos::from_index(idx, size);
        if !is_start_edge(pos, player) {
            continue;
        }
        if let Some(cost) = step_cost(board.get(pos), player) {
            dist[idx] = cost;
            heap.push(Reverse((cost, pos)));
        }
    }

    while let Some(Reverse((d, pos))) = heap.pop() {
        if d > dist[pos.to_index(size)] {
            continue;
        }
        if is_goal_edge(pos, player, size) {
            return d;
        }
        for next in board.neighbors(pos) {
            let Some(cost) = step_cost(board.get(next), player) else {
                continue;
            };
            let idx = next.to_index(size);
            if d + cost < dist[idx] {
                dist[idx] = d + cost;
                heap.push(Reverse((d + cost, next)));
            }
        }
    }

    UNREACHABLE_DISTANCE
}
