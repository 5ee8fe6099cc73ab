use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }
}

/// Reasons a move can be rejected. The move leaves the game untouched in
/// every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell index is outside the board")]
    InvalidIndex,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("not this player's turn")]
    WrongTurn,
}

/// One live piece: where it sits and when it was placed. `seq` is a per-game
/// counter, only its relative order matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub cell: usize,
    pub seq: u64,
}

/// Per-player piece ledger, oldest first. Its length always equals the live
/// piece count of that player on the board.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    x: Vec<MoveRecord>,
    o: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn of(&self, mark: Mark) -> &[MoveRecord] {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
            Mark::Empty => panic!("no move history for the empty mark"),
        }
    }

    pub(crate) fn of_mut(&mut self, mark: Mark) -> &mut Vec<MoveRecord> {
        match mark {
            Mark::X => &mut self.x,
            Mark::O => &mut self.o,
            Mark::Empty => panic!("no move history for the empty mark"),
        }
    }

    pub fn push(&mut self, mark: Mark, record: MoveRecord) {
        self.of_mut(mark).push(record);
    }

    pub fn live_count(&self, mark: Mark) -> usize {
        self.of(mark).len()
    }

    pub fn oldest(&self, mark: Mark) -> Option<&MoveRecord> {
        self.of(mark).first()
    }

    pub fn newest(&self, mark: Mark) -> Option<&MoveRecord> {
        self.of(mark).last()
    }
}
