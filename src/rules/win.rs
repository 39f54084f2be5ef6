//! Win condition checking
//!
//! A side wins by owning a complete line: any of the N rows, N columns
//! or the two full diagonals, 2N+2 lines in total.

use crate::board::{Bitboard, Board, Cell, Pos};

/// Value of a board won by X; a board won by O scores the negation
pub const WIN_SCORE: i32 = 10;

/// Value of an undecided or drawn board
pub const DRAW_SCORE: i32 = 0;

/// Direction vectors for line walking: (start, step)
fn line_starts(size: usize) -> impl Iterator<Item = ((i32, i32), (i32, i32))> {
    let n = size as i32;
    // Row i and column i are visited together, diagonals last
    (0..n)
        .flat_map(|i| [((i, 0), (0, 1)), ((0, i), (1, 0))])
        .chain([((0, 0), (1, 1)), ((0, n - 1), (1, -1))])
}

/// Every line of the board as a bitboard mask, rows and columns interleaved
pub fn line_masks(size: usize) -> impl Iterator<Item = Bitboard> {
    line_starts(size).map(move |((r, c), (dr, dc))| {
        let mut mask = Bitboard::new();
        for k in 0..size as i32 {
            mask.set(((r + dr * k) * size as i32 + (c + dc * k)) as usize);
        }
        mask
    })
}

/// Owner of the first complete line, if any
pub fn check_winner(board: &Board) -> Option<Cell> {
    let x = board.marks(Cell::X)?;
    let o = board.marks(Cell::O)?;

    for mask in line_masks(board.size()) {
        if x.contains(mask) {
            return Some(Cell::X);
        }
        if o.contains(mask) {
            return Some(Cell::O);
        }
    }
    None
}

/// Static value of a board: +10 X line, -10 O line, 0 otherwise
#[inline]
pub fn evaluate(board: &Board) -> i32 {
    match check_winner(board) {
        Some(Cell::X) => WIN_SCORE,
        Some(Cell::O) => -WIN_SCORE,
        _ => DRAW_SCORE,
    }
}

/// Find the positions of the first complete line
pub fn find_winning_line(board: &Board) -> Option<(Cell, Vec<Pos>)> {
    let size = board.size();
    let x = board.marks(Cell::X)?;
    let o = board.marks(Cell::O)?;

    for mask in line_masks(size) {
        let owner = if x.contains(mask) {
            Cell::X
        } else if o.contains(mask) {
            Cell::O
        } else {
            continue;
        };
        let line = mask
            .iter_ones()
            .map(|idx| Pos::from_index(idx, size))
            .collect();
        return Some((owner, line));
    }
    None
}
