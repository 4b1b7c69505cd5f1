//! Game rules for Hex
//!
//! Hex has a single rule beyond "place a stone on an empty cell": a player
//! wins by linking their two goal edges with an unbroken chain of stones.

pub mod win;

// Re-exports for convenient access
pub use win::{group_connects, has_connection, is_goal_edge, is_start_edge, winning_chain};
