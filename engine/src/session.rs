use crate::bot_controller::{BotInput, calculate_move};
use crate::game_state::GameState;
use crate::types::{GameStatus, Mark, MoveError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    SingleBot,
    TwoHuman,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    ModeUnselected,
    InProgress,
    Terminal,
}

/// The human plays X in single-bot mode; the bot answers as O.
pub const BOT_MARK: Mark = Mark::O;

/// Owns the live game and the mode state machine. All moves, human or bot,
/// go through the same `place_mark` validation path.
#[derive(Clone, Debug)]
pub struct GameSession {
    mode: Option<GameMode>,
    game: GameState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            mode: None,
            game: GameState::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.mode {
            None => SessionPhase::ModeUnselected,
            Some(_) if self.game.status == GameStatus::InProgress => SessionPhase::InProgress,
            Some(_) => SessionPhase::Terminal,
        }
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn status(&self) -> GameStatus {
        self.game.status
    }

    /// Starts a fresh game in the given mode.
    pub fn select_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.game = GameState::new();
    }

    /// Fresh game, same mode.
    pub fn new_game(&mut self) {
        self.game = GameState::new();
    }

    /// Discards everything and returns to mode selection.
    pub fn change_mode(&mut self) {
        self.mode = None;
        self.game = GameState::new();
    }

    pub fn is_bot_turn(&self) -> bool {
        self.mode == Some(GameMode::SingleBot)
            && self.game.status == GameStatus::InProgress
            && self.game.current_mark == BOT_MARK
    }

    /// Applies a move for whichever human is to act. Rejected with
    /// `WrongTurn` when no mode is selected or when the bot is to move.
    pub fn apply_human_move(&mut self, index: usize) -> Result<(), MoveError> {
        if self.mode.is_none() || self.is_bot_turn() {
            return Err(MoveError::WrongTurn);
        }
        let mark = self.game.current_mark;
        self.game.place_mark(mark, index)
    }

    /// Applies the bot's chosen move through the same validation path as a
    /// human move.
    pub fn apply_bot_move(&mut self, index: usize) -> Result<(), MoveError> {
        if !self.is_bot_turn() {
            return Err(MoveError::WrongTurn);
        }
        self.game.place_mark(BOT_MARK, index)
    }

    /// Pure computation of the bot's move; the caller decides when to apply
    /// it. Must only be called on an in-progress game with the bot to move.
    pub fn request_bot_move(&self) -> Option<usize> {
        debug_assert!(self.is_bot_turn(), "bot move requested out of turn");
        calculate_move(&BotInput::from_game_state(&self.game))
    }
}
