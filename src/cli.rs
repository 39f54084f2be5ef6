//! Terminal front end: text renderer, move reader and game loop
//!
//! The loop is generic over its input and output so a whole game can be
//! scripted from an in-memory buffer.

use std::io::{BufRead, Write};

use derive_more::{Display, Error};
use tracing::{info, warn};

use crate::board::{Board, Cell, Outcome, Pos};
use crate::config::EngineConfig;
use crate::engine::AIEngine;

/// Reasons a line of input is not a legal move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    #[display("{input:?} is not a number")]
    Parse { input: String },
    #[display("{value} is outside 1...{max}")]
    OutOfRange { value: i64, max: usize },
    #[display("cell {value} is already taken")]
    Occupied { value: i64 },
}

/// Board as printed between moves.
pub fn render(board: &Board) -> String {
    format!("Game\n{}\n", board)
}

/// Status line for a decided board.
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win(Cell::X) => "Game over! X won!",
        Outcome::Win(_) => "Game over! O won!",
        Outcome::Draw => "Draw!",
    }
}

/// Parse a 1-based cell number, row-major, and check it against the board.
pub fn parse_move(line: &str, board: &Board) -> Result<Pos, InputError> {
    let trimmed = line.trim();
    let value: i64 = trimmed.parse().map_err(|_| InputError::Parse {
        input: trimmed.to_string(),
    })?;

    let max = board.cell_count();
    if value < 1 || value > max as i64 {
        return Err(InputError::OutOfRange { value, max });
    }

    let pos = Pos::from_index((value - 1) as usize, board.size());
    if board.get(pos) != Cell::Empty {
        return Err(InputError::Occupied { value });
    }
    Ok(pos)
}

/// Prompt until a legal move is read. None at end of input.
pub fn read_move<R: BufRead, W: Write>(
    board: &Board,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<Pos>> {
    loop {
        write!(output, "Enter your move (1...{}): ", board.cell_count())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_move(&line, board) {
            Ok(pos) => return Ok(Some(pos)),
            Err(err) => {
                warn!(%err, "rejected move");
                writeln!(output, "Position not allowed! Choose another one! ({})", err)?;
            }
        }
    }
}

/// A text game between the engine and a human.
pub struct TextGame<R, W> {
    engine: AIEngine,
    config: EngineConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextGame<R, W> {
    pub fn new(config: EngineConfig, input: R, output: W) -> Self {
        Self {
            engine: AIEngine::with_policy(config.policy()),
            config,
            input,
            output,
        }
    }

    /// Play until the game is decided or input runs out.
    ///
    /// Returns the outcome, or None when the human stopped answering.
    pub fn run(&mut self) -> anyhow::Result<Option<Outcome>> {
        let mut board = self.config.empty_board();
        info!(size = board.size(), human = %self.config.human(), "text game started");
        write!(self.output, "{}", render(&board))?;

        loop {
            if let Some(outcome) = board.outcome() {
                writeln!(self.output, "{}", outcome_message(outcome))?;
                info!(?outcome, "game over");
                return Ok(Some(outcome));
            }

            let side = board.side_to_move()?;
            if side == self.config.machine() {
                let result = self.engine.get_move(&board)?;
                board = result.board;
            } else {
                let Some(pos) = read_move(&board, &mut self.input, &mut self.output)? else {
                    info!("input closed, leaving game");
                    return Ok(None);
                };
                board = board.with_cell_set(pos, side)?;
            }
            write!(self.output, "{}", render(&board))?;
        }
    }

    /// Consume the game and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MemoPolicy;
    use std::io::Cursor;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_parse_move() {
        let b = board(&["X..", "...", "..."]);
        assert_eq!(parse_move("2\n", &b), Ok(Pos::new(0, 1)));
        assert_eq!(parse_move(" 9 ", &b), Ok(Pos::new(2, 2)));
        assert_eq!(
            parse_move("1", &b),
            Err(InputError::Occupied { value: 1 })
        );
        assert_eq!(
            parse_move("10", &b),
            Err(InputError::OutOfRange { value: 10, max: 9 })
        );
        assert_eq!(
            parse_move("0", &b),
            Err(InputError::OutOfRange { value: 0, max: 9 })
        );
        assert!(matches!(
            parse_move("__import__('os')", &b),
            Err(InputError::Parse { .. })
        ));
        assert!(matches!(parse_move("", &b), Err(InputError::Parse { .. })));
    }

    #[test]
    fn test_read_move_retries_until_legal() {
        let b = board(&["X..", "...", "..."]);
        let mut input = Cursor::new("abc\n1\n42\n5\n");
        let mut output = Vec::new();

        let pos = read_move(&b, &mut input, &mut output).unwrap();
        assert_eq!(pos, Some(Pos::new(1, 1)));

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Position not allowed!").count(), 3);
        assert_eq!(text.matches("Enter your move (1...9): ").count(), 4);
    }

    #[test]
    fn test_read_move_end_of_input() {
        let b = Board::new();
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(read_move(&b, &mut input, &mut output).unwrap(), None);
    }

    #[test]
    fn test_render() {
        let b = board(&["X.O", "...", "..."]);
        assert_eq!(render(&b), "Game\nX\t__\tO\n__\t__\t__\n__\t__\t__\n");
    }

    #[test]
    fn test_engine_beats_careless_human() {
        // Engine is X and opens at (0,0); the human never blocks the
        // middle row, so X completes it.
        let config = EngineConfig::default();
        let input = Cursor::new("2\n3\n8\n9\n6\n");
        let mut game = TextGame::new(config, input, Vec::new());

        let outcome = game.run().unwrap();
        assert_eq!(outcome, Some(Outcome::Win(Cell::X)));

        let text = String::from_utf8(game.into_output()).unwrap();
        assert!(text.ends_with("Game over! X won!\n"));
    }

    #[test]
    fn test_human_first_loses_to_engine() {
        let config = EngineConfig::new(3, Cell::X, MemoPolicy::BoundAware).unwrap();
        // Human takes the lowest free cell; taken cells are rejected by the reader
        let script: String = (1..=9).map(|n| format!("{}\n", n)).collect();
        let mut game = TextGame::new(config, Cursor::new(script), Vec::new());

        let outcome = game.run().unwrap();
        assert_eq!(outcome, Some(Outcome::Win(Cell::O)));
    }

    #[test]
    fn test_input_closed_mid_game() {
        let mut game = TextGame::new(EngineConfig::default(), Cursor::new(""), Vec::new());
        assert_eq!(game.run().unwrap(), None);
    }
}
