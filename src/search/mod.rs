//! Search module for the Hex engine
//!
//! Contains:
//! - Cancellation token shared with the caller
//! - One-ply move ordering with a branching cap
//! - Alpha-beta search, fixed depth or iterative deepening

pub mod alphabeta;
pub mod cancel;
pub mod ordering;

pub use alphabeta::{SearchConfig, SearchMode, SearchResult, Searcher};
pub use cancel::CancelToken;
pub use ordering::{order_moves, order_moves_until, DEFAULT_TOP_K};
