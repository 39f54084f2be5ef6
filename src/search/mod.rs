//! Search module
//!
//! Contains:
//! - Memo table for caching search results
//! - Alpha-Beta minimax searching every line of play to the end

pub mod alphabeta;
pub mod memo;

pub use alphabeta::{SearchResult, SearchStats, Searcher, INF};
pub use memo::{EntryType, MemoEntry, MemoKey, MemoPolicy, MemoStats, MemoTable};
