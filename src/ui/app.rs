//! Main application for the tic-tac-toe GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use crate::config::EngineConfig;
use crate::{Cell, Outcome};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameState};
use super::theme::*;

/// Main tic-tac-toe application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    config: EngineConfig,
}

impl TicTacToeApp {
    /// Create the app for a configured game against the engine
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Self {
        Self {
            state: GameState::new(config, GameMode::PvE { human: config.human() }),
            board_view: BoardView::default(),
            config,
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        let config = match mode {
            GameMode::PvE { human } => self.config.with_human(human),
            GameMode::PvP => Ok(self.config),
        };
        match config {
            Ok(config) => self.state = GameState::new(config, mode),
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play X)").clicked() {
                        self.new_game(GameMode::PvE { human: Cell::X });
                        ui.close_menu();
                    }
                    if ui.button("New Game (play O)").clicked() {
                        self.new_game(GameMode::PvE { human: Cell::O });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("PvE - You: {}", human),
                        GameMode::PvP => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
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

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_engine_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if let Some(outcome) = self.state.outcome() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::card_frame().show(ui, |ui| {
                        ui.label(RichText::new(msg).size(11.0).color(STATUS_BUSY));
                    });
                }
            });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();
            let color = if turn == Cell::X { X_MARK } else { O_MARK };
            ui.horizontal(|ui| {
                ui.label(RichText::new(turn.symbol()).size(32.0).strong().color(color));
                ui.add_space(12.0);

                let status = if self.state.is_ai_thinking() {
                    ("AI thinking...", STATUS_BUSY)
                } else if self.state.is_game_over() {
                    ("Game over", WIN_HIGHLIGHT)
                } else {
                    ("Your turn", STATUS_OK)
                };
                ui.label(RichText::new(status.0).size(14.0).color(status.1));
            });
        });
    }

    /// Render the last search summary
    fn render_engine_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
            ui.label(
                RichText::new(format!("memo: {}", self.state.policy()))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label(
                    RichText::new(format!("{:.2}s", elapsed.as_secs_f32()))
                        .size(20.0)
                        .color(STATUS_BUSY),
                );
            }

            match &self.state.last_ai_result {
                Some(result) => {
                    let verdict = match result.value {
                        v if v > 0 => "X wins with best play",
                        v if v < 0 => "O wins with best play",
                        _ => "Draw with best play",
                    };
                    ui.label(RichText::new(verdict).size(12.0).strong().color(TEXT_PRIMARY));
                    ui.label(
                        RichText::new(format!("Move {}  value {}", result.best_move, result.value))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );
                    ui.label(
                        RichText::new(format!(
                            "{} nodes, {} memo hits, {}ms",
                            result.stats.nodes, result.stats.memo_hits, result.time_ms
                        ))
                        .size(10.0)
                        .color(TEXT_MUTED),
                    );
                }
                None => {
                    ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Undo (U)").clicked() {
                    self.state.undo();
                }
                if ui.button("New (N)").clicked() {
                    self.state.reset();
                }
                if self.state.mode == GameMode::PvP && ui.button("Hint (H)").clicked() {
                    self.state.request_suggestion();
                }
            });
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render game over card
    fn render_game_over_card(&self, ui: &mut egui::Ui, outcome: Outcome) {
        let text = match outcome {
            Outcome::Win(winner) => format!("{} WINS!", winner),
            Outcome::Draw => "DRAW".to_string(),
        };
        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(TEXT_SECONDARY));
                    ui.label(RichText::new(text).size(20.0).strong().color(TEXT_PRIMARY));
                });
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let winning_line = self.state.winning_line();
            let accept_input = !self.state.is_game_over()
                && !self.state.is_ai_thinking()
                && self.state.is_human_turn();

            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.suggested_move.or(self.state.last_move),
                winning_line.as_deref(),
                accept_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (undo, new_game, hint) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::H),
            )
        });

        if undo {
            self.state.undo();
        }
        if new_game {
            self.state.reset();
        }
        if hint && self.state.mode == GameMode::PvP {
            self.state.request_suggestion();
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
