//! Exhaustive minimax with alpha-beta pruning and memoization
//!
//! X maximizes, O minimizes. The search runs to the end of the game on
//! every branch, so the value it reports is the game-theoretic value of
//! the position: 10 when X can force a win, -10 when O can, 0 for a draw.
//!
//! # Features
//!
//! - Alpha-beta pruning with fail-soft cutoffs
//! - Memo table shared by every search made through one [`Searcher`]
//! - Deterministic move choice: the first successor in row-major order
//!   reaching the best value wins ties
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Cell, Pos};
//! use tictactoe::search::Searcher;
//!
//! let mut searcher = Searcher::new();
//! let board = Board::from_rows(&["XX.", "OO.", "..."]).unwrap();
//!
//! let result = searcher.search(&board).unwrap();
//! assert_eq!(result.value, 10);
//! assert_eq!(result.best_move, Pos::new(0, 2));
//! assert_eq!(result.board.get(Pos::new(0, 2)), Cell::X);
//! ```

use tracing::trace;

use crate::board::{Board, Cell, Pos};
use crate::error::EngineError;
use crate::rules::WIN_SCORE;

use super::{EntryType, MemoEntry, MemoPolicy, MemoStats, MemoTable};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = WIN_SCORE + 1;

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes expanded (memo hits included)
    pub nodes: u64,
    /// Alpha and beta cutoffs
    pub cutoffs: u64,
    /// Memo lookups
    pub memo_probes: u64,
    /// Memo lookups that returned a usable result
    pub memo_hits: u64,
}

impl SearchStats {
    /// Memo hit rate in percent
    pub fn memo_hit_rate(&self) -> f64 {
        if self.memo_probes == 0 {
            0.0
        } else {
            self.memo_hits as f64 / self.memo_probes as f64 * 100.0
        }
    }
}

/// Search result: the position's value and the successor that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Minimax value, one of -10, 0, 10
    pub value: i32,
    /// Board after the chosen move
    pub board: Board,
    /// The chosen move
    pub best_move: Pos,
    /// Diagnostics for this call only
    pub stats: SearchStats,
}

/// Outcome of one recursive step
#[derive(Debug, Clone, Copy)]
struct Node {
    value: i32,
    board: Board,
    best_move: Pos,
}

impl From<MemoEntry> for Node {
    fn from(entry: MemoEntry) -> Self {
        Self {
            value: entry.value,
            board: entry.board,
            best_move: entry.best_move,
        }
    }
}

/// Alpha-beta searcher with a memo table.
pub struct Searcher {
    memo: MemoTable,
    stats: SearchStats,
}

impl Searcher {
    /// Searcher with the default [`MemoPolicy::ExactWindow`] policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(MemoPolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: MemoPolicy) -> Self {
        Self {
            memo: MemoTable::new(policy),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn policy(&self) -> MemoPolicy {
        self.memo.policy()
    }

    /// Memo table statistics
    pub fn memo_stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Forget every memoized result.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Find the optimal move for the side to move.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidState`] if the mark counts break the
    ///   alternating-move rule, checked first
    /// * [`EngineError::NoLegalMove`] if the board is already decided or full
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, EngineError> {
        board.side_to_move()?;
        if board.is_terminal() {
            return Err(EngineError::NoLegalMove);
        }

        self.stats = SearchStats::default();
        let memo_before = self.memo.len();

        let node = self.alphabeta(board, -INF, INF)?;

        trace!(
            new_entries = self.memo.len() - memo_before,
            total_entries = self.memo.len(),
            "memo table grown"
        );

        Ok(SearchResult {
            value: node.value,
            board: node.board,
            best_move: node.best_move,
            stats: self.stats,
        })
    }

    /// One minimax step over a non-terminal board with window (alpha, beta).
    fn alphabeta(&mut self, board: &Board, alpha: i32, beta: i32) -> Result<Node, EngineError> {
        let side = board.side_to_move()?;
        self.stats.nodes += 1;

        self.stats.memo_probes += 1;
        if let Some(entry) = self.memo.probe(board, side, alpha, beta) {
            self.stats.memo_hits += 1;
            return Ok(entry.into());
        }

        let maximizing = side == Cell::X;
        let (mut lo, mut hi) = (alpha, beta);
        let mut best: Option<Node> = None;

        for (pos, child) in board.children()? {
            let value = if child.is_terminal() {
                child.evaluate()
            } else {
                self.alphabeta(&child, lo, hi)?.value
            };
            let node = Node {
                value,
                board: child,
                best_move: pos,
            };

            if maximizing {
                if value >= hi {
                    self.stats.cutoffs += 1;
                    self.remember(board, side, alpha, beta, node, EntryType::LowerBound);
                    return Ok(node);
                }
                lo = lo.max(value);
                if best.map_or(true, |b| value > b.value) {
                    best = Some(node);
                }
            } else {
                if value <= lo {
                    self.stats.cutoffs += 1;
                    self.remember(board, side, alpha, beta, node, EntryType::UpperBound);
                    return Ok(node);
                }
                hi = hi.min(value);
                if best.map_or(true, |b| value < b.value) {
                    best = Some(node);
                }
            }
        }

        let best = best.ok_or(EngineError::NoLegalMove)?;
        let entry_type = if best.value <= alpha {
            EntryType::UpperBound
        } else if best.value >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.remember(board, side, alpha, beta, best, entry_type);
        Ok(best)
    }

    #[inline]
    fn remember(
        &mut self,
        board: &Board,
        side: Cell,
        alpha: i32,
        beta: i32,
        node: Node,
        entry_type: EntryType,
    ) {
        self.memo.store(
            board,
            side,
            alpha,
            beta,
            MemoEntry {
                value: node.value,
                board: node.board,
                best_move: node.best_move,
                entry_type,
            },
        );
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_empty_board_is_draw() {
        let mut searcher = Searcher::new();
        let result = searcher.search(&Board::new()).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.board.count(Cell::X), 1);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut searcher = Searcher::new();
        let result = searcher.search(&board(&["XX.", "OO.", "..."])).unwrap();

        assert_eq!(result.value, 10);
        assert_eq!(result.best_move, Pos::new(0, 2));
        assert_eq!(result.board, board(&["XXX", "OO.", "..."]));
    }

    #[test]
    fn test_o_takes_its_win() {
        let mut searcher = Searcher::new();
        // O to move (X leads by one) and can complete the middle row
        let result = searcher.search(&board(&["XX.", "OO.", "X.."])).unwrap();

        assert_eq!(result.value, -10);
        assert_eq!(result.best_move, Pos::new(1, 2));
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let mut searcher = Searcher::new();
        // O threatens the left column; every move but (2,0) loses
        let result = searcher.search(&board(&["OX.", "O..", "..X"])).unwrap();

        assert_eq!(result.best_move, Pos::new(2, 0));
        assert!(result.value > -10);
    }

    #[test]
    fn test_one_open_cell_draw() {
        let mut searcher = Searcher::new();
        let result = searcher.search(&board(&["XOX", "XOO", "OX."])).unwrap();

        assert_eq!(result.value, 0);
        assert_eq!(result.best_move, Pos::new(2, 2));
        assert_eq!(result.board.get(Pos::new(2, 2)), Cell::X);
        assert!(result.board.is_full());
    }

    #[test]
    fn test_one_open_cell_completes_diagonal() {
        let mut searcher = Searcher::new();
        let result = searcher.search(&board(&["XOX", "OXO", "OX."])).unwrap();

        assert_eq!(result.value, 10);
        assert_eq!(result.board.get(Pos::new(2, 2)), Cell::X);
    }

    #[test]
    fn test_terminal_board_is_rejected() {
        let mut searcher = Searcher::new();
        assert_eq!(
            searcher.search(&board(&["XXX", "OO.", "..."])),
            Err(EngineError::NoLegalMove)
        );
        assert_eq!(
            searcher.search(&board(&["XOX", "XOO", "OXX"])),
            Err(EngineError::NoLegalMove)
        );
    }

    #[test]
    fn test_invalid_state_is_rejected() {
        let mut searcher = Searcher::new();
        assert_eq!(
            searcher.search(&board(&["XX.", "...", "..."])),
            Err(EngineError::InvalidState { x_count: 2, o_count: 0 })
        );
        // Decided but unreachable: the count check comes first
        assert_eq!(
            searcher.search(&board(&["XXX", "X..", "..."])),
            Err(EngineError::InvalidState { x_count: 4, o_count: 0 })
        );
    }

    #[test]
    fn test_repeat_search_is_deterministic() {
        let mut searcher = Searcher::new();
        let first = searcher.search(&board(&["X..", ".O.", "..."])).unwrap();
        let again = searcher.search(&board(&["X..", ".O.", "..."])).unwrap();

        assert_eq!(first.value, again.value);
        assert_eq!(first.board, again.board);
        // Second call is answered from the memo at the root
        assert_eq!(again.stats.nodes, 1);
        assert_eq!(again.stats.memo_hits, 1);
    }

    #[test]
    fn test_memo_persists_across_searches() {
        let mut searcher = Searcher::new();
        searcher.search(&Board::new()).unwrap();
        let entries = searcher.memo_stats().entries;
        assert!(entries > 0);

        searcher.search(&Board::new()).unwrap();
        assert_eq!(searcher.memo_stats().entries, entries);

        searcher.clear_memo();
        assert_eq!(searcher.memo_stats().entries, 0);
    }

    #[test]
    fn test_bound_aware_matches_exact_window() {
        let mut exact = Searcher::with_policy(MemoPolicy::ExactWindow);
        let mut bound = Searcher::with_policy(MemoPolicy::BoundAware);

        for rows in [
            ["...", "...", "..."],
            ["X..", "...", "..."],
            ["X..", ".O.", "..."],
            ["XO.", "...", "..."],
            ["X.O", ".X.", "..."],
        ] {
            let b = board(&rows);
            let a = exact.search(&b).unwrap();
            let c = bound.search(&b).unwrap();
            assert_eq!(a.value, c.value, "value differs for {:?}", rows);
            assert_eq!(a.best_move, c.best_move, "move differs for {:?}", rows);
        }
    }

    #[test]
    fn test_small_boards() {
        let mut searcher = Searcher::new();

        // 1x1: X fills the only cell and owns every line
        let result = searcher.search(&Board::with_size(1).unwrap()).unwrap();
        assert_eq!(result.value, 10);

        // 2x2: any second X mark completes a line
        let result = searcher.search(&Board::with_size(2).unwrap()).unwrap();
        assert_eq!(result.value, 10);
    }
}
