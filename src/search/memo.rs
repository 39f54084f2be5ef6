//! Memoization store for search results
//!
//! The table remembers the outcome of every interior search step so that
//! identical subtrees are never searched twice. It is append-only: entries
//! live as long as the owning [`Searcher`](super::Searcher) unless the
//! table is cleared explicitly.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Cell, Pos};
//! use tictactoe::search::{EntryType, MemoEntry, MemoPolicy, MemoTable};
//!
//! let mut memo = MemoTable::new(MemoPolicy::ExactWindow);
//! let board = Board::new();
//! let best = board.with_cell_set(Pos::new(0, 0), Cell::X).unwrap();
//!
//! memo.store(&board, Cell::X, -11, 11, MemoEntry {
//!     value: 0,
//!     board: best,
//!     best_move: Pos::new(0, 0),
//!     entry_type: EntryType::Exact,
//! });
//!
//! assert!(memo.probe(&board, Cell::X, -11, 11).is_some());
//! // Different window, different entry
//! assert!(memo.probe(&board, Cell::X, 0, 11).is_none());
//! ```

use std::collections::HashMap;

use derive_more::Display;

use crate::board::{Board, Cell, Pos};

/// How entries are keyed and when a stored result may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum MemoPolicy {
    /// Key on (board, side, alpha, beta). A hit is always usable, but
    /// only calls made with the very same window share an entry.
    #[default]
    #[display("exact window")]
    ExactWindow,
    /// Key on (board, side) and tag each entry with the kind of bound it
    /// represents. A hit is used only when the bound settles the caller's
    /// window.
    #[display("bound aware")]
    BoundAware,
}

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact minimax value
    Exact,
    /// True value >= stored value (beta cutoff)
    LowerBound,
    /// True value <= stored value (alpha cutoff or fail-low)
    UpperBound,
}

/// Cache key. `window` is None under [`MemoPolicy::BoundAware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey {
    pub board: Board,
    pub side: Cell,
    pub window: Option<(i32, i32)>,
}

/// Stored result of one search step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoEntry {
    pub value: i32,
    /// Successor chosen at this step
    pub board: Board,
    /// Move leading to `board`
    pub best_move: Pos,
    pub entry_type: EntryType,
}

/// Memoization table owned by a searcher.
pub struct MemoTable {
    policy: MemoPolicy,
    entries: HashMap<MemoKey, MemoEntry>,
}

impl MemoTable {
    #[must_use]
    pub fn new(policy: MemoPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    #[inline]
    pub fn policy(&self) -> MemoPolicy {
        self.policy
    }

    fn key(&self, board: &Board, side: Cell, alpha: i32, beta: i32) -> MemoKey {
        let window = match self.policy {
            MemoPolicy::ExactWindow => Some((alpha, beta)),
            MemoPolicy::BoundAware => None,
        };
        MemoKey {
            board: *board,
            side,
            window,
        }
    }

    /// Look up a reusable result for a search step with window (alpha, beta).
    #[must_use]
    pub fn probe(&self, board: &Board, side: Cell, alpha: i32, beta: i32) -> Option<MemoEntry> {
        let entry = *self.entries.get(&self.key(board, side, alpha, beta))?;

        match self.policy {
            MemoPolicy::ExactWindow => Some(entry),
            MemoPolicy::BoundAware => match entry.entry_type {
                EntryType::Exact => Some(entry),
                EntryType::LowerBound if entry.value >= beta => Some(entry),
                EntryType::UpperBound if entry.value <= alpha => Some(entry),
                _ => None,
            },
        }
    }

    /// Record the result of a search step run with window (alpha, beta).
    ///
    /// Under `BoundAware` an exact entry is never replaced by a bound.
    pub fn store(&mut self, board: &Board, side: Cell, alpha: i32, beta: i32, entry: MemoEntry) {
        let key = self.key(board, side, alpha, beta);

        let keep_existing = matches!(
            self.entries.get(&key),
            Some(e) if e.entry_type == EntryType::Exact && entry.entry_type != EntryType::Exact
        );
        if !keep_existing {
            self.entries.insert(key, entry);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        let exact = self
            .entries
            .values()
            .filter(|e| e.entry_type == EntryType::Exact)
            .count();
        MemoStats {
            entries: self.entries.len(),
            exact,
            bounds: self.entries.len() - exact,
        }
    }
}

impl Default for MemoTable {
    fn default() -> Self {
        Self::new(MemoPolicy::default())
    }
}

/// Statistics about memo table contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub entries: usize,
    /// Entries holding exact values
    pub exact: usize,
    /// Entries holding lower or upper bounds
    pub bounds: usize,
}
