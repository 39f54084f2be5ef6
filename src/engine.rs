//! Engine facade used by the front ends
//!
//! Wraps a [`Searcher`], times every search and logs a summary of the
//! work done. The searcher's memo table lives as long as the engine, so
//! later moves of the same game mostly hit positions already solved.
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Board, Cell, Pos};
//!
//! let mut engine = AIEngine::new();
//! let board = Board::from_rows(&["XX.", "OO.", "..."]).unwrap();
//!
//! let result = engine.get_move(&board).unwrap();
//! assert_eq!(result.value, 10);
//! assert_eq!(result.best_move, Pos::new(0, 2));
//! assert_eq!(result.board.get(Pos::new(0, 2)), Cell::X);
//! ```

use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::board::{Board, Cell, Pos};
use crate::error::EngineError;
use crate::search::{MemoPolicy, SearchStats, Searcher};

/// Result of a move search with timing and statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Chosen move
    pub best_move: Pos,
    /// Game-theoretic value of the searched position
    pub value: i32,
    /// Board after the move
    pub board: Board,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Search diagnostics
    pub stats: SearchStats,
    /// Memo table size after the search
    pub memo_entries: usize,
}

/// Main engine.
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default memo policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: Searcher::new(),
        }
    }

    #[must_use]
    pub fn with_policy(policy: MemoPolicy) -> Self {
        Self {
            searcher: Searcher::with_policy(policy),
        }
    }

    /// Get the best move for the side to move.
    ///
    /// # Errors
    ///
    /// Same contract as [`Searcher::search`]: the board must be undecided
    /// and obey the alternating-move rule.
    #[instrument(skip(self, board), fields(size = board.size(), open = board.count(Cell::Empty)))]
    pub fn get_move(&mut self, board: &Board) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let result = self.searcher.search(board)?;
        let time_ms = start.elapsed().as_millis() as u64;
        let memo_entries = self.searcher.memo_stats().entries;

        debug!(
            policy = %self.policy(),
            nodes = result.stats.nodes,
            cutoffs = result.stats.cutoffs,
            memo_hits = result.stats.memo_hits,
            memo_hit_rate = result.stats.memo_hit_rate(),
            memo_entries,
            "search finished"
        );
        info!(
            value = result.value,
            best_move = %result.best_move,
            time_ms,
            "engine move"
        );

        Ok(MoveResult {
            best_move: result.best_move,
            value: result.value,
            board: result.board,
            time_ms,
            stats: result.stats,
            memo_entries,
        })
    }

    /// Forget all memoized positions (new game on a different board).
    pub fn clear(&mut self) {
        self.searcher.clear_memo();
    }

    #[inline]
    pub fn policy(&self) -> MemoPolicy {
        self.searcher.policy()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
