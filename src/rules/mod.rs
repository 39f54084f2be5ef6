//! Game rules for N×N tic-tac-toe
//!
//! Only the win condition lives here; move legality is a property of the
//! board itself (an empty cell, filled by the side to move).

pub mod win;

// Re-exports for convenient access
pub use win::{check_winner, evaluate, find_winning_line, line_masks, DRAW_SCORE, WIN_SCORE};
