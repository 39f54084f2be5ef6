//! Game state management for the tic-tac-toe GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::search::MemoPolicy;
use crate::{AIEngine, Board, Cell, EngineError, MoveResult, Outcome, Pos};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE { human: Cell },
    /// Player vs Player (hotseat) with engine hints
    PvP,
}

/// Engine handed to a worker thread, returned with its answer
type AiReply = (AIEngine, Result<MoveResult, EngineError>);

/// What the worker's answer will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTask {
    /// Play the engine's move
    Move,
    /// Only highlight the best move for the player
    Hint,
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        task: AiTask,
        receiver: Receiver<AiReply>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    /// Boards before each move, oldest first
    pub history: Vec<Board>,
    pub last_move: Option<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    /// None while the engine is away on a worker thread
    engine: Option<AIEngine>,
    config: EngineConfig,
}

impl GameState {
    pub fn new(config: EngineConfig, mode: GameMode) -> Self {
        let board = config.empty_board();
        info!(size = board.size(), ?mode, "new game");
        Self {
            board,
            mode,
            history: Vec::new(),
            last_move: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            suggested_move: None,
            message: None,
            engine: Some(AIEngine::with_policy(config.policy())),
            config,
        }
    }

    /// Start over with the same mode; solved positions stay memoized
    pub fn reset(&mut self) {
        self.board = self.config.empty_board();
        self.history.clear();
        self.last_move = None;
        self.last_ai_result = None;
        self.suggested_move = None;
        self.message = None;
    }

    /// Mark whose turn it is (Empty once the board is inconsistent)
    pub fn current_turn(&self) -> Cell {
        self.board.side_to_move().unwrap_or(Cell::Empty)
    }

    /// Memo policy of the engine, read back from the engine when it is home
    pub fn policy(&self) -> MemoPolicy {
        self.engine
            .as_ref()
            .map_or(self.config.policy(), AIEngine::policy)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.board.outcome()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_terminal()
    }

    /// Cells of the completed line, if any
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        self.board.winning_line().map(|(_, line)| line)
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn() == human,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => !self.is_game_over() && self.current_turn() == human.opponent(),
            GameMode::PvP => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to play the human's move at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let next = self
            .board
            .with_cell_set(pos, self.current_turn())
            .map_err(|e| e.to_string())?;
        self.apply(pos, next);
        Ok(())
    }

    /// Record a move (for both human and AI)
    fn apply(&mut self, pos: Pos, next: Board) {
        self.history.push(self.board);
        self.board = next;
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;

        if let Some(outcome) = self.board.outcome() {
            info!(?outcome, moves = self.history.len(), "game over");
        }
    }

    /// Start AI thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        self.spawn_search(AiTask::Move);
    }

    /// Search the current board on a worker thread; the UI keeps running
    fn spawn_search(&mut self, task: AiTask) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        let board = self.board;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move(&board);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            task,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let (task, reply) = match &self.ai_state {
            AiState::Thinking { task, receiver, .. } => match receiver.try_recv() {
                Ok(reply) => (*task, reply),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    error!("engine thread exited without a reply");
                    self.ai_state = AiState::Idle;
                    self.engine = Some(AIEngine::with_policy(self.config.policy()));
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        let (engine, result) = reply;
        self.engine = Some(engine);
        self.ai_state = AiState::Idle;

        match result {
            // The board may have been reset or undone while the engine thought
            Ok(result) if self.history_matches(&result) => {
                self.last_ai_result = Some(result);
                match task {
                    AiTask::Move => self.apply(result.best_move, result.board),
                    AiTask::Hint => self.suggested_move = Some(result.best_move),
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(%e, "engine rejected the position");
                self.message = Some(e.to_string());
            }
        }
    }

    fn history_matches(&self, result: &MoveResult) -> bool {
        self.board.with_cell_set(result.best_move, self.current_turn()) == Ok(result.board)
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Ask the engine for the best move in the current position.
    /// The answer arrives through [`GameState::check_ai_result`].
    pub fn request_suggestion(&mut self) {
        if self.is_game_over() || self.is_ai_thinking() {
            return;
        }
        self.spawn_search(AiTask::Hint);
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo the engine's reply together with the human move
        let undo_count = match self.mode {
            GameMode::PvE { human } => {
                let mut count = 1;
                while count < self.history.len()
                    && self.history[self.history.len() - count].side_to_move() != Ok(human)
                {
                    count += 1;
                }
                count
            }
            GameMode::PvP => 1,
        };

        let keep = self.history.len() - undo_count;
        self.board = self.history[keep];
        self.history.truncate(keep);
        self.last_move = None;
        self.suggested_move = None;
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pve(human: Cell) -> GameState {
        let config = EngineConfig::new(3, human, MemoPolicy::ExactWindow).unwrap();
        GameState::new(config, GameMode::PvE { human })
    }

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
        assert!(!state.is_ai_thinking(), "engine did not answer in time");
    }

    #[test]
    fn test_human_move_then_engine_reply() {
        let mut state = pve(Cell::X);
        assert!(state.is_human_turn());
        state.try_place(Pos::new(1, 1)).unwrap();

        assert!(state.is_ai_turn());
        assert_eq!(state.try_place(Pos::new(0, 0)), Err("Not your turn".to_string()));

        state.start_ai_thinking();
        wait_for_ai(&mut state);

        assert_eq!(state.board.count(Cell::O), 1);
        assert_eq!(state.history.len(), 2);
        assert!(state.last_ai_result.is_some());
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_policy_follows_config() {
        let config = EngineConfig::new(3, Cell::O, MemoPolicy::BoundAware).unwrap();
        let state = GameState::new(config, GameMode::PvP);
        assert_eq!(state.policy(), MemoPolicy::BoundAware);
        assert_eq!(state.policy().to_string(), "bound aware");
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let config = EngineConfig::default();
        let mut state = GameState::new(config, GameMode::PvP);
        state.try_place(Pos::new(0, 0)).unwrap();
        assert!(state.try_place(Pos::new(0, 0)).is_err());
        assert_eq!(state.current_turn(), Cell::O);
    }

    #[test]
    fn test_undo_pve_reverts_full_turn() {
        let mut state = pve(Cell::X);
        state.try_place(Pos::new(0, 0)).unwrap();
        state.start_ai_thinking();
        wait_for_ai(&mut state);
        assert_eq!(state.history.len(), 2);

        state.undo();
        assert_eq!(state.board, Board::new());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_undo_pvp_single_move() {
        let mut state = GameState::new(EngineConfig::default(), GameMode::PvP);
        state.try_place(Pos::new(0, 0)).unwrap();
        state.try_place(Pos::new(1, 1)).unwrap();
        state.undo();
        assert_eq!(state.board.count(Cell::O), 0);
        assert_eq!(state.board.count(Cell::X), 1);
    }

    #[test]
    fn test_suggestion_points_at_win() {
        let mut state = GameState::new(EngineConfig::default(), GameMode::PvP);
        for pos in [Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)] {
            state.try_place(pos).unwrap();
        }
        state.request_suggestion();
        assert!(state.is_ai_thinking());
        assert!(state.try_place(Pos::new(2, 2)).is_err());

        wait_for_ai(&mut state);
        assert_eq!(state.suggested_move, Some(Pos::new(0, 2)));
        // A hint never plays the move
        assert_eq!(state.history.len(), 4);
        assert_eq!(state.board.get(Pos::new(0, 2)), Cell::Empty);
    }

    #[test]
    fn test_game_over_blocks_moves() {
        let mut state = GameState::new(EngineConfig::default(), GameMode::PvP);
        for pos in [
            Pos::new(0, 0),
            Pos::new(1, 0),
            Pos::new(0, 1),
            Pos::new(1, 1),
            Pos::new(0, 2),
        ] {
            state.try_place(pos).unwrap();
        }
        assert_eq!(state.outcome(), Some(Outcome::Win(Cell::X)));
        assert_eq!(state.winning_line().map(|l| l.len()), Some(3));
        assert!(state.try_place(Pos::new(2, 2)).is_err());
    }
}
