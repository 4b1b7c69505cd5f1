//! Theme constants for the Hex GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const CELL_EMPTY: Color32 = Color32::from_rgb(222, 204, 170);
pub const CELL_OUTLINE: Color32 = Color32::from_rgb(90, 75, 55);

// Stone colors
pub const RED_STONE: Color32 = Color32::from_rgb(210, 55, 50);
pub const RED_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(240, 120, 110);
pub const BLUE_STONE: Color32 = Color32::from_rgb(45, 95, 200);
pub const BLUE_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(120, 160, 240);

// Goal edges
pub const RED_EDGE: Color32 = Color32::from_rgb(190, 50, 45);
pub const BLUE_EDGE: Color32 = Color32::from_rgb(40, 85, 185);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 250, 250);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

pub fn preview(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 110)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 36.0;
pub const STONE_RADIUS_RATIO: f32 = 0.62;
pub const CELL_OUTLINE_WIDTH: f32 = 1.0;
pub const EDGE_WIDTH: f32 = 5.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;

/// Fill color for a player's stones
pub fn stone_color(stone: crate::Stone) -> Color32 {
    match stone {
        crate::Stone::Red => RED_STONE,
        crate::Stone::Blue => BLUE_STONE,
        crate::Stone::Empty => CELL_EMPTY,
    }
}
