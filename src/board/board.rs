//! Immutable board value and its pure queries

use std::fmt;

use super::bitboard::Bitboard;
use super::{Cell, Pos, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::error::EngineError;
use crate::rules;

/// Game board.
///
/// A board is never mutated once handed out: every move produces a new
/// value. Equality and hashing cover the size and every cell, so boards
/// are usable directly as memo keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    /// X marks
    x: Bitboard,
    /// O marks
    o: Bitboard,
}

/// Final result of a decided board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Cell),
    Draw,
}

impl Board {
    /// Empty 3x3 board
    pub fn new() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE as u8,
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Empty board with `size` rows and columns
    pub fn with_size(size: usize) -> Result<Self, EngineError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidSize { size });
        }
        Ok(Self {
            size: size as u8,
            x: Bitboard::new(),
            o: Bitboard::new(),
        })
    }

    /// Build a board from one string per row.
    ///
    /// `X`/`x` and `O`/`o` are marks; `.`, `_` and `-` are empty cells.
    /// Whitespace inside a row is ignored. The result is not checked
    /// against the move-count rule, so invalid states can be constructed
    /// on purpose.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, EngineError> {
        let mut board = Self::with_size(rows.len())?;
        let size = rows.len();

        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if cells.len() != size {
                return Err(EngineError::InvalidLayout {
                    reason: format!("row {} has {} cells, expected {}", row, cells.len(), size),
                });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let idx = row * size + col;
                match ch {
                    'X' | 'x' => board.x.set(idx),
                    'O' | 'o' => board.o.set(idx),
                    '.' | '_' | '-' => {}
                    other => {
                        return Err(EngineError::InvalidLayout {
                            reason: format!("unexpected character {:?}", other),
                        });
                    }
                }
            }
        }

        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Total number of cells (N²)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        Pos::is_valid(i32::from(pos.row), i32::from(pos.col), self.size())
    }

    /// Get cell at position (Empty when out of range)
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        if !self.contains(pos) {
            return Cell::Empty;
        }
        let idx = pos.to_index(self.size());
        if self.x.get(idx) {
            Cell::X
        } else if self.o.get(idx) {
            Cell::O
        } else {
            Cell::Empty
        }
    }

    /// Bitboard for a mark (None for Empty)
    #[inline]
    pub fn marks(&self, cell: Cell) -> Option<Bitboard> {
        match cell {
            Cell::X => Some(self.x),
            Cell::O => Some(self.o),
            Cell::Empty => None,
        }
    }

    #[inline]
    fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    /// All empty positions in row-major order
    pub fn open_cells(&self) -> Vec<Pos> {
        let occupied = self.occupied();
        let size = self.size();
        (0..self.cell_count())
            .filter(|&idx| !occupied.get(idx))
            .map(|idx| Pos::from_index(idx, size))
            .collect()
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        match cell {
            Cell::X => self.x.count() as usize,
            Cell::O => self.o.count() as usize,
            Cell::Empty => self.cell_count() - self.occupied().count() as usize,
        }
    }

    /// Side whose turn it is, derived from the mark counts.
    ///
    /// X moves when counts are equal, O when X leads by one.
    pub fn side_to_move(&self) -> Result<Cell, EngineError> {
        let x_count = self.count(Cell::X);
        let o_count = self.count(Cell::O);
        if x_count == o_count {
            Ok(Cell::X)
        } else if x_count == o_count + 1 {
            Ok(Cell::O)
        } else {
            Err(EngineError::InvalidState { x_count, o_count })
        }
    }

    /// New board with one empty cell set to `cell`
    pub fn with_cell_set(&self, pos: Pos, cell: Cell) -> Result<Board, EngineError> {
        if cell == Cell::Empty || !self.contains(pos) || self.get(pos) != Cell::Empty {
            return Err(EngineError::IllegalMove { pos });
        }
        Ok(self.place(pos.to_index(self.size()), cell))
    }

    /// Unchecked placement on an index known to be empty
    #[inline]
    fn place(&self, idx: usize, cell: Cell) -> Board {
        let mut next = *self;
        match cell {
            Cell::X => next.x = self.x.with(idx),
            Cell::O => next.o = self.o.with(idx),
            Cell::Empty => {}
        }
        next
    }

    /// Every legal move for the side to move with the board it produces,
    /// in `open_cells()` order.
    pub fn children(&self) -> Result<Vec<(Pos, Board)>, EngineError> {
        let side = self.side_to_move()?;
        let size = self.size();
        Ok(self
            .open_cells()
            .into_iter()
            .map(|pos| (pos, self.place(pos.to_index(size), side)))
            .collect())
    }

    /// Successor boards, one per open cell. Empty iff the board is full.
    pub fn successors(&self) -> Result<Vec<Board>, EngineError> {
        Ok(self.children()?.into_iter().map(|(_, b)| b).collect())
    }

    /// 10 if X owns a complete line, -10 if O does, else 0
    #[inline]
    pub fn evaluate(&self) -> i32 {
        rules::evaluate(self)
    }

    /// The first complete line found, with its owner
    pub fn winning_line(&self) -> Option<(Cell, Vec<Pos>)> {
        rules::find_winning_line(self)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied().count() as usize == self.cell_count()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.evaluate() != 0 || self.is_full()
    }

    /// Result of a decided board, None while play continues
    pub fn outcome(&self) -> Option<Outcome> {
        match rules::check_winner(self) {
            Some(winner) => Some(Outcome::Win(winner)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per row, cells separated by tabs
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..size {
                if col > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{}", self.get(Pos::new(row as u8, col as u8)))?;
            }
        }
        Ok(())
    }
}
