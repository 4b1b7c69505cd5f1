//! Board rendering for the Hex GUI

use crate::{Board, Pos, Stone};
use egui::{Color32, CornerRadius, Painter, Pos2, Sense, Shape, Stroke, Vec2};

use super::theme::*;

const SQRT_3: f32 = 1.732_050_8;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Hexagon radius (center to corner)
    radius: f32,
    /// Center of cell (0, 0)
    origin: Pos2,
    /// Board size of the last frame
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            radius: 20.0,
            origin: Pos2::ZERO,
            size: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        last_move: Option<Pos>,
        suggested_move: Option<Pos>,
        winning_chain: Option<&[Pos]>,
        accepts_input: bool,
    ) -> Option<Pos> {
        let available = ui.available_size();
        let n = board.size() as f32;
        self.size = board.size();

        // Rhombus extent: width (1.5n - 0.5) cells, height 1.5(n - 1) + 2 radii
        let radius_w = (available.x - 2.0 * BOARD_MARGIN) / ((1.5 * n - 0.5) * SQRT_3);
        let radius_h = (available.y - 2.0 * BOARD_MARGIN) / (1.5 * (n - 1.0) + 2.0);
        self.radius = radius_w.min(radius_h).max(4.0);

        let (response, painter) = ui.allocate_painter(available, Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, CornerRadius::same(4), BOARD_BG);

        let width = self.cell_width() * (1.5 * n - 0.5);
        let height = self.radius * (1.5 * (n - 1.0) + 2.0);
        self.origin = Pos2::new(
            rect.center().x - width / 2.0 + self.cell_width() / 2.0,
            rect.center().y - height / 2.0 + self.radius,
        );

        self.draw_edges(&painter);
        self.draw_cells(&painter, board);
        self.draw_coordinates(&painter);

        if let Some(pos) = last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if let Some(chain) = winning_chain {
            self.draw_winning_chain(&painter, chain);
        }
        if let Some(pos) = suggested_move {
            self.draw_suggestion(&painter, pos, board.to_move());
        }

        // Hover preview and click
        let mut clicked_pos = None;
        if accepts_input {
            if let Some(pointer) = response.hover_pos() {
                if let Some(pos) = self.screen_to_board(pointer) {
                    let is_valid = board.is_empty(pos);
                    let color = if is_valid {
                        preview(stone_color(board.to_move()))
                    } else {
                        hover_invalid()
                    };
                    painter.add(self.hexagon(pos, self.radius * 0.8, color, Stroke::NONE));

                    if response.clicked() && is_valid {
                        clicked_pos = Some(pos);
                    }
                }
            }
        }

        clicked_pos
    }

    #[inline]
    fn cell_width(&self) -> f32 {
        SQRT_3 * self.radius
    }

    fn hexagon(&self, pos: Pos, radius: f32, fill: Color32, stroke: Stroke) -> Shape {
        let center = self.board_to_screen(pos);
        let points = (0..6)
            .map(|i| {
                let angle = (60.0 * i as f32 - 30.0).to_radians();
                center + Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Shape::convex_polygon(points, fill, stroke)
    }

    /// Red bars on the top and bottom rows, blue bars on the side columns
    fn draw_edges(&self, painter: &Painter) {
        let last = (self.size - 1) as u8;
        let half = self.cell_width() / 2.0;
        let r = self.radius;

        let top = [
            self.board_to_screen(Pos::new(0, 0)) + Vec2::new(-half, -r),
            self.board_to_screen(Pos::new(0, last)) + Vec2::new(half, -r),
        ];
        let bottom = [
            self.board_to_screen(Pos::new(last, 0)) + Vec2::new(-half, r),
            self.board_to_screen(Pos::new(last, last)) + Vec2::new(half, r),
        ];
        let left = [
            self.board_to_screen(Pos::new(0, 0)) + Vec2::new(-half - 2.0, 0.0),
            self.board_to_screen(Pos::new(last, 0)) + Vec2::new(-half - 2.0, 0.0),
        ];
        let right = [
            self.board_to_screen(Pos::new(0, last)) + Vec2::new(half + 2.0, 0.0),
            self.board_to_screen(Pos::new(last, last)) + Vec2::new(half + 2.0, 0.0),
        ];

        painter.line_segment(top, Stroke::new(EDGE_WIDTH, RED_EDGE));
        painter.line_segment(bottom, Stroke::new(EDGE_WIDTH, RED_EDGE));
        painter.line_segment(left, Stroke::new(EDGE_WIDTH, BLUE_EDGE));
        painter.line_segment(right, Stroke::new(EDGE_WIDTH, BLUE_EDGE));
    }

    /// Draw every cell, empty or occupied
    fn draw_cells(&self, painter: &Painter, board: &Board) {
        let outline = Stroke::new(CELL_OUTLINE_WIDTH, CELL_OUTLINE);
        for idx in 0..self.size * self.size {
            let pos = Pos::from_index(idx, self.size);
            painter.add(self.hexagon(pos, self.radius, CELL_EMPTY, outline));

            let stone = board.get(pos);
            if stone.is_player() {
                self.draw_stone(painter, pos, stone);
            }
        }
    }

    /// Draw a single stone with a small highlight
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.radius * STONE_RADIUS_RATIO;
        let highlight = match stone {
            Stone::Red => RED_STONE_HIGHLIGHT,
            Stone::Blue => BLUE_STONE_HIGHLIGHT,
            Stone::Empty => return,
        };

        painter.circle_filled(center + Vec2::new(1.5, 1.5), radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
        painter.circle_filled(center, radius, stone_color(stone));
        painter.circle_filled(center + Vec2::new(-radius * 0.3, -radius * 0.3), radius * 0.22, highlight);
    }

    /// Column letters above the board, row numbers on the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional((self.radius * 0.6).clamp(9.0, 14.0));

        for col in 0..self.size {
            let letter = (b'a' + col as u8) as char;
            let pos = self.board_to_screen(Pos::new(0, col as u8)) + Vec2::new(0.0, -self.radius * 1.6);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), TEXT_SECONDARY);
        }

        for row in 0..self.size {
            let pos = self.board_to_screen(Pos::new(row as u8, 0)) + Vec2::new(-self.cell_width() * 1.1, 0.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, format!("{}", row + 1), font.clone(), TEXT_SECONDARY);
        }
    }

    /// Draw winning chain highlight
    fn draw_winning_chain(&self, painter: &Painter, chain: &[Pos]) {
        let stroke = Stroke::new(3.0, WIN_HIGHLIGHT);

        for pair in chain.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        for &pos in chain {
            painter.circle_stroke(self.board_to_screen(pos), self.radius * STONE_RADIUS_RATIO + 2.0, stroke);
        }
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, self.radius * STONE_RADIUS_RATIO, preview(stone_color(turn)));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            TEXT_PRIMARY,
        );
    }

    /// Convert screen coordinates to board position (nearest cell center)
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        (0..self.size * self.size)
            .map(|idx| Pos::from_index(idx, self.size))
            .map(|pos| (pos, self.board_to_screen(pos).distance(screen_pos)))
            .filter(|&(_, dist)| dist <= self.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos)
    }

    /// Convert board position to screen coordinates; rows shift right by half a cell
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.origin.x + (pos.col as f32 + pos.row as f32 * 0.5) * self.cell_width();
        let y = self.origin.y + pos.row as f32 * 1.5 * self.radius;
        Pos2::new(x, y)
    }
}
