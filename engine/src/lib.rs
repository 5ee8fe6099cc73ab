pub mod board;
pub mod bot_controller;
pub mod evaluator;
pub mod game_state;
pub mod logger;
pub mod session;
pub mod types;
pub mod win_detector;

pub use board::{Board, BOARD_CELLS, CENTER, CORNERS, EDGES, empty_board, empty_cells, pieces_of};
pub use bot_controller::{BotInput, FALLBACK_ORDER, SEARCH_DEPTH, calculate_move};
pub use evaluator::{cell_strategic_value, evaluate};
pub use game_state::{GameState, MAX_PIECES};
pub use session::{GameMode, GameSession, SessionPhase};
pub use types::{GameStatus, Mark, MoveError, MoveHistory, MoveRecord};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
