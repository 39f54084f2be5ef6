//! Board rendering for the tic-tac-toe GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Cell, Pos};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked empty cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        last_move: Option<Pos>,
        winning_line: Option<&[Pos]>,
        accept_input: bool,
    ) -> Option<Pos> {
        let size = board.size();
        let available = ui.available_size();
        let board_px = (available.x.min(available.y) - 20.0).max(60.0);
        self.cell_size = (board_px - 2.0 * BOARD_MARGIN) / size as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_px), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);
        self.draw_grid(&painter, size);
        self.draw_marks(&painter, board);

        if let Some(pos) = last_move {
            let center = self.cell_center(pos);
            let offset = Vec2::splat(self.cell_size * 0.4);
            painter.circle_filled(center - offset, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, line);
        }

        if !accept_input {
            return None;
        }

        let pointer = response.hover_pos()?;
        let pos = self.screen_to_board(pointer, size)?;
        if board.get(pos) != Cell::Empty {
            return None;
        }

        let cell = Rect::from_center_size(self.cell_center(pos), Vec2::splat(self.cell_size * 0.9));
        painter.rect_filled(cell, CornerRadius::same(4), hover_valid());

        response.clicked().then_some(pos)
    }

    /// Draw the inner grid lines
    fn draw_grid(&self, painter: &Painter, size: usize) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let origin = self.board_rect.min + Vec2::splat(BOARD_MARGIN);
        let span = self.cell_size * size as f32;

        for i in 1..size {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, span)],
                stroke,
            );
            painter.line_segment(
                [origin + Vec2::new(0.0, offset), origin + Vec2::new(span, offset)],
                stroke,
            );
        }
    }

    fn draw_marks(&self, painter: &Painter, board: &Board) {
        let size = board.size();
        for row in 0..size {
            for col in 0..size {
                let pos = Pos::new(row as u8, col as u8);
                match board.get(pos) {
                    Cell::X => self.draw_x(painter, pos),
                    Cell::O => self.draw_o(painter, pos),
                    Cell::Empty => {}
                }
            }
        }
    }

    fn draw_x(&self, painter: &Painter, pos: Pos) {
        let center = self.cell_center(pos);
        let r = self.cell_size * MARK_RATIO;
        let stroke = Stroke::new(MARK_STROKE, X_MARK);
        painter.line_segment([center + Vec2::new(-r, -r), center + Vec2::new(r, r)], stroke);
        painter.line_segment([center + Vec2::new(-r, r), center + Vec2::new(r, -r)], stroke);
    }

    fn draw_o(&self, painter: &Painter, pos: Pos) {
        let center = self.cell_center(pos);
        painter.circle_stroke(
            center,
            self.cell_size * MARK_RATIO,
            Stroke::new(MARK_STROKE, O_MARK),
        );
    }

    /// Strike through the winning cells
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let (Some(first), Some(last)) = (line.first(), line.last()) else {
            return;
        };
        painter.line_segment(
            [self.cell_center(*first), self.cell_center(*last)],
            Stroke::new(MARK_STROKE, WIN_HIGHLIGHT),
        );
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2, size: usize) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        if Pos::is_valid(row, col, size) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Center of a cell in screen coordinates
    pub fn cell_center(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
