//! Main application for the Hex GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;
use crate::{HexError, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};

/// Main Hex application
pub struct HexApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    /// Board size used by the next new game
    next_size: usize,
}

impl HexApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, HexError> {
        Ok(Self {
            state: GameState::new(GameMode::default(), DEFAULT_BOARD_SIZE)?,
            board_view: BoardView::default(),
            show_debug: true,
            next_size: DEFAULT_BOARD_SIZE,
        })
    }

    /// Start a new game in the given mode, keeping the engine settings
    fn new_game(&mut self, mode: GameMode) {
        self.state.mode = mode;
        if let Err(e) = self.state.reset(self.next_size) {
            self.state.message = Some(e.to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - Red)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::Red });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - Blue)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::Blue });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP { show_hints: false });
                        ui.close_menu();
                    }
                    if ui.button("New Game (AI vs AI)").clicked() {
                        self.new_game(GameMode::AiVsAi);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    if let GameMode::PvP { show_hints } = &mut self.state.mode {
                        ui.checkbox(show_hints, "Hints after each move");
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("PvE - You: {human}"),
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                        GameMode::AiVsAi => "AI vs AI".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_title_card(ui);
                    ui.add_space(12.0);

                    self.render_turn_card(ui);
                    ui.add_space(10.0);

                    self.render_timer_card(ui);
                    ui.add_space(10.0);

                    self.render_settings_card(ui);
                    ui.add_space(10.0);

                    self.render_actions_card(ui);

                    if self.show_debug {
                        ui.add_space(10.0);
                        self.render_debug_card(ui);
                    }

                    if let Some(result) = self.state.game_over.clone() {
                        ui.add_space(10.0);
                        self.render_game_over_card(ui, &result);
                    }

                    if let Some(msg) = &self.state.message {
                        ui.add_space(10.0);
                        Self::render_message_card(ui, msg);
                    }
                });
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn button_frame() -> Frame {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
    }

    /// Clickable label inside a button frame
    fn action_button(ui: &mut egui::Ui, text: &str) -> bool {
        Self::button_frame()
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                    .clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("⬢").size(20.0).color(RED_STONE));
            ui.label(RichText::new("⬢").size(20.0).color(BLUE_STONE));
            ui.add_space(4.0);
            ui.label(RichText::new("HEX").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            let size = self.state.board.size();
            ui.label(RichText::new(format!("{size}×{size} board")).size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();
            let goal = match turn {
                Stone::Red => "top ↔ bottom",
                _ => "left ↔ right",
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, stone_color(turn));

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(turn.to_string().to_uppercase()).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if self.state.paused {
                        ("Paused", TEXT_SECONDARY)
                    } else if self.state.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("Waiting for AI", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                    ui.label(RichText::new(goal).size(10.0).color(TEXT_MUTED));
                });
            });
        });
    }

    /// Render timer card; colors follow the share of the budget used
    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let budget = (self.state.settings.time_budget_ms as f32 / 1000.0).max(f32::EPSILON);
                let color = if secs < budget * 0.5 {
                    TIMER_NORMAL
                } else if secs < budget * 0.9 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s / {budget:.1}s")).size(24.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(last) = self.state.move_timer.last_move_duration {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last move: {:.1}s", last.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Engine and board settings
    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SETTINGS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let settings = &mut self.state.settings;
            ui.add(egui::Slider::new(&mut settings.max_depth, 1..=8).text("depth"));
            ui.checkbox(&mut settings.iterative, "Iterative deepening");
            ui.add(
                egui::Slider::new(&mut settings.time_budget_ms, 100..=20_000)
                    .logarithmic(true)
                    .suffix(" ms")
                    .text("budget"),
            );

            ui.add_space(6.0);
            ui.add(egui::Slider::new(&mut self.next_size, 2..=MAX_BOARD_SIZE).text("next board"));
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::action_button(ui, "↩ Undo") {
                    self.state.undo();
                }
                ui.add_space(4.0);

                if Self::action_button(ui, "New") {
                    self.new_game(self.state.mode);
                }
                ui.add_space(4.0);

                if self.state.is_ai_thinking() {
                    if Self::action_button(ui, "⏹ Stop") {
                        self.state.timeout();
                    }
                } else if let GameMode::PvP { .. } = self.state.mode {
                    if Self::action_button(ui, "Hint") {
                        self.state.request_suggestion();
                    }
                } else if self.state.mode == GameMode::AiVsAi {
                    let label = if self.state.paused { "▶ Resume" } else { "⏸ Pause" };
                    if Self::action_button(ui, label) {
                        self.state.paused = !self.state.paused;
                    }
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render debug card with the last search statistics
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{:?} d{}", result.mode, result.depth))
                            .size(11.0)
                            .strong()
                            .color(TIMER_NORMAL),
                    );
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                    });
                });
            });

            if result.cancelled {
                ui.label(RichText::new("cut short by budget").size(10.0).color(TIMER_WARNING));
            }
            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("→ {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
            }
        });
    }

    /// Render game over card
    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);

                    ui.label(
                        RichText::new(format!("{} WINS!", result.winner.to_string().to_uppercase()))
                            .size(18.0)
                            .strong()
                            .color(stone_color(result.winner)),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("{}-stone chain", result.chain.len()))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );

                    ui.add_space(12.0);
                    if Self::action_button(ui, "New Game") {
                        self.new_game(self.state.mode);
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_BG))
            .show(ctx, |ui| {
                let chain = self.state.game_over.as_ref().map(|r| r.chain.as_slice());
                let accepts_input =
                    self.state.game_over.is_none() && self.state.is_human_turn() && !self.state.is_ai_thinking();

                let clicked = self.board_view.show(
                    ui,
                    &self.state.board,
                    self.state.last_move,
                    self.state.suggested_move,
                    chain,
                    accepts_input,
                );

                if let Some(pos) = clicked {
                    match self.state.try_place_stone(pos) {
                        Ok(()) => {
                            if matches!(self.state.mode, GameMode::PvP { show_hints: true }) {
                                self.state.request_suggestion();
                            }
                        }
                        Err(msg) => self.state.message = Some(msg),
                    }
                }
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, hint, undo, new, stop) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::S),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if hint {
            if let GameMode::PvP { .. } = self.state.mode {
                self.state.request_suggestion();
            }
        }
        if undo {
            self.state.undo();
        }
        if new {
            self.new_game(self.state.mode);
        }
        if stop {
            self.state.timeout();
        }
    }
}

impl eframe::App for HexApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Collect a finished search and enforce the budget of a running one
        self.state.check_ai_result();
        self.state.start_ai_thinking();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep the timer ticking
        if self.state.is_ai_thinking() || self.state.game_over.is_none() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
