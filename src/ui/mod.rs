//! GUI module for the Hex game
//!
//! Native desktop front end built on egui/eframe: human vs engine, hotseat
//! with engine hints, and engine vs engine.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::HexApp;
pub use game_state::{AiSettings, GameMode, GameState};
