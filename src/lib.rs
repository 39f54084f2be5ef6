//! Tic-tac-toe solver on N×N boards
//!
//! The engine plays perfectly by searching every line of play to the end:
//! - Board of 1x1 up to 4x4 cells, X moves first
//! - A complete row, column or full diagonal wins
//! - X maximizes (+10 for a win), O minimizes (-10), a draw is 0
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Immutable board values with bitboard storage
//! - [`rules`]: Win detection and static evaluation
//! - [`search`]: Alpha-beta minimax and its memo table
//! - [`engine`]: Timed engine facade used by the front ends
//! - [`cli`]: Terminal game loop
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{AIEngine, Board, Cell, Pos};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new();
//!
//! // Engine opens as X
//! let reply = engine.get_move(&board).unwrap();
//! assert_eq!(reply.value, 0); // tic-tac-toe is a draw
//! board = reply.board;
//!
//! // Human answers as O in the center
//! board = board.with_cell_set(Pos::new(1, 1), Cell::O).unwrap();
//! assert!(!board.is_terminal());
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Outcome, Pos, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult};
pub use error::EngineError;
pub use search::{MemoPolicy, SearchResult, Searcher};
