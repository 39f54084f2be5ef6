//! Engine error types.

use derive_more::{Display, Error};

use crate::board::Pos;

/// Contract violations raised by the board and the search.
///
/// None of these are recoverable inside the engine: they mean the caller
/// handed over a board that cannot occur in play, or asked for a move
/// when the game is already decided.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Mark counts break the alternating-move rule.
    #[display("invalid board state: {x_count} X against {o_count} O")]
    InvalidState { x_count: usize, o_count: usize },
    /// Search was asked for a move on a terminal board.
    #[display("no legal move: the game is already decided")]
    NoLegalMove,
    /// Target cell is out of range or already taken.
    #[display("illegal move at {pos}")]
    IllegalMove { pos: Pos },
    /// Board size outside the supported range.
    #[display("unsupported board size {size}")]
    InvalidSize { size: usize },
    /// Board diagram could not be read.
    #[display("invalid board layout: {reason}")]
    InvalidLayout { reason: String },
}
