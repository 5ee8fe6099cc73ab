use crate::board::{BOARD_CELLS, Board, empty_board, pieces_of};
use crate::types::{GameStatus, Mark, MoveError, MoveHistory, MoveRecord};
use crate::win_detector::check_win;

/// A player may hold at most this many live pieces; placing another evicts
/// their oldest piece unless the placement wins outright.
pub const MAX_PIECES: usize = 4;

#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub history: MoveHistory,
    pub last_move: Option<usize>,
    pub last_evicted: Option<usize>,
    next_seq: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: empty_board(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            history: MoveHistory::default(),
            last_move: None,
            last_evicted: None,
            next_seq: 0,
        }
    }

    /// Places `mark` at `index` and advances the turn. Winner detection runs
    /// before eviction, so a winning 5th piece is never undone. On error the
    /// state is left untouched.
    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameAlreadyOver);
        }
        if mark != self.current_mark {
            return Err(MoveError::WrongTurn);
        }
        if index >= BOARD_CELLS {
            return Err(MoveError::InvalidIndex);
        }
        if self.board[index] != Mark::Empty {
            return Err(MoveError::CellOccupied);
        }

        self.board[index] = mark;
        self.history.push(
            mark,
            MoveRecord {
                cell: index,
                seq: self.next_seq,
            },
        );
        self.next_seq += 1;
        self.last_move = Some(index);

        let winner = check_win(&self.board);

        self.last_evicted = None;
        if winner.is_none() && self.history.live_count(mark) > MAX_PIECES {
            let oldest = self.history.of_mut(mark).remove(0);
            self.board[oldest.cell] = Mark::Empty;
            self.last_evicted = Some(oldest.cell);
        }

        self.status = match winner {
            Some(Mark::X) => GameStatus::XWon,
            Some(Mark::O) => GameStatus::OWon,
            _ => GameStatus::InProgress,
        };

        // The turn holder alternates even on a winning move; the status is
        // what makes the state terminal.
        self.switch_turn();

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => unreachable!(),
        };
    }

    pub fn winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    /// Live piece count on the board; always equal to the history length.
    pub fn live_pieces(&self, mark: Mark) -> usize {
        pieces_of(&self.board, mark).len()
    }
}
