//! Game configuration shared by the front ends

use crate::board::{Board, Cell, DEFAULT_BOARD_SIZE};
use crate::error::EngineError;
use crate::search::MemoPolicy;

/// Validated settings for one game session.
///
/// Built only through [`EngineConfig::new`], so the size and sides are
/// always consistent with the board it hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Empty board of the configured size
    board: Board,
    /// Mark played by the human; the engine plays the other one
    human: Cell,
    policy: MemoPolicy,
}

impl EngineConfig {
    /// Check the settings and build the configuration.
    pub fn new(size: usize, human: Cell, policy: MemoPolicy) -> Result<Self, EngineError> {
        let board = Board::with_size(size)?;
        Self::check_human(human)?;
        Ok(Self {
            board,
            human,
            policy,
        })
    }

    /// Same settings with the human playing `human`.
    pub fn with_human(self, human: Cell) -> Result<Self, EngineError> {
        Self::check_human(human)?;
        Ok(Self { human, ..self })
    }

    fn check_human(human: Cell) -> Result<(), EngineError> {
        if human == Cell::Empty {
            return Err(EngineError::InvalidLayout {
                reason: "the human must play X or O".to_string(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline]
    pub fn human(&self) -> Cell {
        self.human
    }

    /// Mark played by the engine
    #[inline]
    pub fn machine(&self) -> Cell {
        self.human.opponent()
    }

    #[inline]
    pub fn policy(&self) -> MemoPolicy {
        self.policy
    }

    /// Empty board of the configured size
    #[inline]
    pub fn empty_board(&self) -> Board {
        self.board
    }
}

/// Classic 3x3 game, engine moves first as X
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board: Board::new(),
            human: Cell::O,
            policy: MemoPolicy::default(),
        }
    }
}
