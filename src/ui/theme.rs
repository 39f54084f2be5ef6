//! Theme constants for the tic-tac-toe GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 228, 212);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 56, 52);

// Marks
pub const X_MARK: Color32 = Color32::from_rgb(200, 70, 60);
pub const O_MARK: Color32 = Color32::from_rgb(50, 100, 180);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 180, 40);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 200, 80);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

// Panel colors - dark theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_OK: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_BUSY: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const MARK_RATIO: f32 = 0.32;
pub const MARK_STROKE: f32 = 6.0;
pub const GRID_LINE_WIDTH: f32 = 3.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
