//! Position evaluation for Hex
//!
//! - [`weights`]: stage-dependent weight tables
//! - [`distance`]: shortest remaining connection (Dijkstra)
//! - [`heuristic`]: the static evaluator used at search leaves

pub mod distance;
pub mod heuristic;
pub mod weights;

pub use distance::{distance_to_connect, UNREACHABLE_DISTANCE};
pub use heuristic::evaluate;
pub use weights::{EvalWeights, Stage, WIN_SCORE};
