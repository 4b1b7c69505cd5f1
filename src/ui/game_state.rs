//! Game state management for the Hex GUI

use crate::rules::winning_chain;
use crate::{Board, CancelToken, HexError, HexPlayer, MoveResult, Pos, SearchConfig, Stone};
use log::{debug, warn};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human: Stone },
    /// Player vs Player (hotseat)
    PvP { show_hints: bool },
    /// AI plays both sides
    AiVsAi,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Stone::Red }
    }
}

/// Engine settings editable from the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiSettings {
    pub max_depth: u32,
    pub iterative: bool,
    /// Thinking budget per move in milliseconds
    pub time_budget_ms: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            max_depth: 4,
            iterative: true,
            time_budget_ms: 2000,
        }
    }
}

impl AiSettings {
    fn player(&self) -> crate::error::Result<HexPlayer> {
        HexPlayer::with_config(
            self.max_depth,
            self.iterative,
            Some(Duration::from_millis(self.time_budget_ms)),
        )
    }

    fn budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
        cancel: CancelToken,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Stone,
    /// Stones linking the winner's two edges
    pub chain: Vec<Pos>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    pub settings: AiSettings,
    /// AI vs AI games wait for this before each engine move
    pub paused: bool,
}

impl GameState {
    pub fn new(mode: GameMode, size: usize) -> Result<Self, HexError> {
        Ok(Self {
            board: Board::new(size)?,
            mode,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            settings: AiSettings::default(),
            paused: false,
        })
    }

    /// Start a fresh game on a board of the given size
    pub fn reset(&mut self, size: usize) -> Result<(), HexError> {
        let board = Board::new(size)?;
        self.stop_ai();
        self.board = board;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        self.paused = false;
        Ok(())
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.board.to_move()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn() == human,
            GameMode::PvP { .. } => true,
            GameMode::AiVsAi => false,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) -> Result<(), HexError> {
        let color = self.current_turn();
        self.board.play(pos)?;

        self.move_history.push(pos);
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;
        self.move_timer.stop();

        if self.board.winner() == Some(color) {
            let chain = winning_chain(&self.board, color).unwrap_or_default();
            self.game_over = Some(GameResult { winner: color, chain });
            return Ok(());
        }

        self.move_timer.start();
        Ok(())
    }

    /// Start AI thinking on a background thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() || self.paused {
            return;
        }

        let mut player = match self.settings.player() {
            Ok(player) => player,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        let cancel = player.begin_request();
        let board = self.board.clone();
        let (tx, rx) = channel();

        debug!("{} thinking for {}", player.name(), board.to_move());
        thread::spawn(move || {
            let result = player.run_request(&board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            cancel,
        };
    }

    /// Stop the running search; it still answers with its best completed move
    pub fn timeout(&self) {
        if let AiState::Thinking { cancel, .. } = &self.ai_state {
            cancel.cancel();
        }
    }

    /// Abandon the running search without playing its move
    fn stop_ai(&mut self) {
        self.timeout();
        self.ai_state = AiState::Idle;
    }

    /// Check if AI has finished thinking; enforce the time budget
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                cancel,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => {
                    if start_time.elapsed() >= self.settings.budget() {
                        cancel.cancel();
                    }
                    None
                }
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => {
                    if let Err(e) = self.execute_move(pos) {
                        warn!("engine move {pos} rejected: {e}");
                        self.message = Some(e.to_string());
                    }
                }
                None => self.message = Some("AI could not find a move".to_string()),
            }
            self.last_ai_result = Some(move_result);
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }

        // Quick shallow search
        let config = SearchConfig::iterative(2)
            .map(|config| config.with_time_limit(Duration::from_millis(200)));
        let mut player = match config {
            Ok(config) => HexPlayer::new(config),
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };
        let result = player.get_move_with_stats(&self.board);

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo back to the human's turn
        let undo_count = match self.mode {
            GameMode::PvE { human } if self.current_turn() == human && self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        // Reset and replay
        let moves_to_keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<Pos> = self.move_history.drain(..moves_to_keep).collect();
        self.move_history.clear();

        let size = self.board.size();
        if let Err(e) = self.reset(size) {
            self.message = Some(e.to_string());
            return;
        }
        for pos in moves {
            if let Err(e) = self.execute_move(pos) {
                warn!("replay of {pos} failed: {e}");
                break;
            }
        }
        self.paused = self.mode == GameMode::AiVsAi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotseat(size: usize) -> GameState {
        GameState::new(GameMode::PvP { show_hints: false }, size).unwrap()
    }

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
    }

    #[test]
    fn test_hotseat_alternates() {
        let mut state = hotseat(5);
        state.try_place_stone(Pos::new(2, 2)).unwrap();
        assert_eq!(state.board.get(Pos::new(2, 2)), Stone::Red);
        assert_eq!(state.current_turn(), Stone::Blue);
        assert_eq!(state.last_move, Some(Pos::new(2, 2)));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut state = hotseat(5);
        state.try_place_stone(Pos::new(1, 1)).unwrap();
        let err = state.try_place_stone(Pos::new(1, 1)).unwrap_err();
        assert!(err.contains("occupied"), "{err}");
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn test_win_records_chain() {
        let mut state = hotseat(2);
        // Red (0,0), Blue (0,1), Red (1,0) links top to bottom
        state.try_place_stone(Pos::new(0, 0)).unwrap();
        state.try_place_stone(Pos::new(0, 1)).unwrap();
        state.try_place_stone(Pos::new(1, 0)).unwrap();

        let result = state.game_over.clone().unwrap();
        assert_eq!(result.winner, Stone::Red);
        assert_eq!(result.chain, vec![Pos::new(0, 0), Pos::new(1, 0)]);
        assert!(state.try_place_stone(Pos::new(1, 1)).is_err());
    }

    #[test]
    fn test_undo_replays_history() {
        let mut state = hotseat(5);
        state.try_place_stone(Pos::new(0, 0)).unwrap();
        state.try_place_stone(Pos::new(1, 1)).unwrap();
        state.undo();

        assert_eq!(state.move_history, vec![Pos::new(0, 0)]);
        assert!(state.board.is_empty(Pos::new(1, 1)));
        assert_eq!(state.current_turn(), Stone::Blue);
        assert_eq!(state.last_move, Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_undo_clears_game_over() {
        let mut state = hotseat(2);
        for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)] {
            state.try_place_stone(pos).unwrap();
        }
        state.undo();
        assert!(state.game_over.is_none());
        assert_eq!(state.current_turn(), Stone::Red);
    }

    #[test]
    fn test_pve_blocks_human_on_ai_turn() {
        let mut state = GameState::new(GameMode::PvE { human: Stone::Blue }, 5).unwrap();
        assert!(state.is_ai_turn());
        assert_eq!(state.try_place_stone(Pos::new(2, 2)), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_ai_replies_in_pve() {
        let mut state = GameState::new(GameMode::PvE { human: Stone::Red }, 4).unwrap();
        state.settings = AiSettings {
            max_depth: 1,
            iterative: false,
            time_budget_ms: 5000,
        };
        state.try_place_stone(Pos::new(1, 1)).unwrap();
        state.start_ai_thinking();
        assert!(state.is_ai_thinking());

        wait_for_ai(&mut state);
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.current_turn(), Stone::Red);
        assert!(state.last_ai_result.is_some());
    }

    #[test]
    fn test_pve_undo_takes_back_both_moves() {
        let mut state = GameState::new(GameMode::PvE { human: Stone::Red }, 4).unwrap();
        state.settings.max_depth = 1;
        state.try_place_stone(Pos::new(1, 1)).unwrap();
        state.start_ai_thinking();
        wait_for_ai(&mut state);

        state.undo();
        assert!(state.move_history.is_empty());
        assert_eq!(state.current_turn(), Stone::Red);
    }

    #[test]
    fn test_zero_budget_still_moves() {
        let mut state = GameState::new(GameMode::AiVsAi, 6).unwrap();
        state.settings = AiSettings {
            max_depth: 8,
            iterative: true,
            time_budget_ms: 0,
        };
        state.start_ai_thinking();
        wait_for_ai(&mut state);

        assert_eq!(state.move_history.len(), 1);
        assert!(state.last_ai_result.as_ref().unwrap().cancelled);
    }

    #[test]
    fn test_stop_right_after_start_is_not_lost() {
        let mut state = GameState::new(GameMode::AiVsAi, 7).unwrap();
        state.settings = AiSettings {
            max_depth: 8,
            iterative: true,
            time_budget_ms: 60_000,
        };
        state.start_ai_thinking();
        state.timeout();
        wait_for_ai(&mut state);

        let result = state.last_ai_result.as_ref().unwrap();
        assert!(result.cancelled);
        assert_eq!(result.depth, 0);
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn test_last_move_duration_recorded() {
        let mut state = hotseat(5);
        assert!(state.move_timer.last_move_duration.is_none());
        state.try_place_stone(Pos::new(2, 2)).unwrap();
        assert!(state.move_timer.last_move_duration.is_some());
    }

    #[test]
    fn test_reset_rejects_bad_size() {
        let mut state = hotseat(5);
        assert!(state.reset(0).is_err());
        assert_eq!(state.board.size(), 5);
    }
}
