use crate::board::{Board, CENTER, CORNERS, empty_cells};
use crate::evaluator::{cell_strategic_value, evaluate};
use crate::game_state::{GameState, MAX_PIECES};
use crate::types::{Mark, MoveHistory, MoveRecord};
use crate::win_detector::check_win;

/// Ply bound for the minimax search.
pub const SEARCH_DEPTH: usize = 7;

/// Cell preference when the search produces no candidate (not normally
/// reachable): center, corners, edges.
pub const FALLBACK_ORDER: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// Snapshot of everything the bot needs; the caller's state is never
/// retained or mutated.
pub struct BotInput {
    pub board: Board,
    pub history: MoveHistory,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &GameState) -> Self {
        Self {
            board: state.board,
            history: state.history.clone(),
            bot_mark: state.current_mark,
        }
    }
}

/// Picks the bot's cell. Returns None only when the board has no empty cell;
/// calling this on a finished game is a caller bug.
pub fn calculate_move(input: &BotInput) -> Option<usize> {
    let bot = input.bot_mark;
    let opponent = bot.opponent()?;

    let empties = empty_cells(&input.board);
    if empties.is_empty() {
        return None;
    }
    debug_assert!(
        check_win(&input.board).is_none(),
        "bot asked to move in a finished game"
    );

    let mut board = input.board;

    // Take an immediate win before anything else.
    for &index in &empties {
        board[index] = bot;
        let wins = check_win(&board) == Some(bot);
        board[index] = Mark::Empty;
        if wins {
            return Some(index);
        }
    }

    // Then deny the opponent theirs.
    for &index in &empties {
        board[index] = opponent;
        let wins = check_win(&board) == Some(opponent);
        board[index] = Mark::Empty;
        if wins {
            return Some(index);
        }
    }

    // Opening heuristics, root only.
    if input.board[CENTER] == Mark::Empty {
        return Some(CENTER);
    }
    if input.board[CENTER] == opponent {
        if let Some(&corner) = CORNERS.iter().find(|&&c| input.board[c] == Mark::Empty) {
            return Some(corner);
        }
    }

    let mut search = SearchState::new(input);
    let mut best_index = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;
    let beta = i32::MAX;

    for candidate in search.candidates(bot, true) {
        let undo = search.apply(candidate, bot);
        let score = search.minimax(1, false, alpha, beta);
        search.undo(undo);

        if score > best_score {
            best_score = score;
            best_index = Some(candidate.destination());
            alpha = alpha.max(score);
        }
    }

    best_index.or_else(|| {
        FALLBACK_ORDER
            .iter()
            .copied()
            .find(|&index| input.board[index] == Mark::Empty)
    })
}

#[derive(Clone, Copy, Debug)]
enum Candidate {
    Place { to: usize },
    /// Lift the piece at history position `slot` and put it on `to`. Only
    /// enumerated once the mover already holds the full piece cap; an
    /// over-cap placement branch never exists.
    Relocate { slot: usize, to: usize },
}

impl Candidate {
    fn destination(&self) -> usize {
        match *self {
            Candidate::Place { to } | Candidate::Relocate { to, .. } => to,
        }
    }
}

enum Undo {
    Place { mover: Mark },
    Relocate { mover: Mark, slot: usize, lifted: MoveRecord },
}

/// Scratch board and projected history for the recursion. Every apply is
/// reverted by the matching undo before the call returns, so the evaluator
/// sees consistent piece ages at every node and callers never observe
/// partial mutation.
struct SearchState {
    board: Board,
    history: MoveHistory,
    next_seq: u64,
    bot: Mark,
}

impl SearchState {
    fn new(input: &BotInput) -> Self {
        let next_seq = input
            .history
            .of(Mark::X)
            .iter()
            .chain(input.history.of(Mark::O))
            .map(|record| record.seq)
            .max()
            .map_or(0, |seq| seq + 1);

        Self {
            board: input.board,
            history: input.history.clone(),
            next_seq,
            bot: input.bot_mark,
        }
    }

    fn minimax(&mut self, depth: usize, is_maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        if check_win(&self.board).is_some() || depth >= SEARCH_DEPTH {
            return evaluate(&self.board, &self.history, depth, self.bot);
        }

        let mover = if is_maximizing {
            self.bot
        } else {
            self.bot.opponent().unwrap()
        };

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for candidate in self.candidates(mover, true) {
                let undo = self.apply(candidate, mover);
                let eval = self.minimax(depth + 1, false, alpha, beta);
                self.undo(undo);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            if max_eval == i32::MIN { 0 } else { max_eval }
        } else {
            let mut min_eval = i32::MAX;
            for candidate in self.candidates(mover, false) {
                let undo = self.apply(candidate, mover);
                let eval = self.minimax(depth + 1, true, alpha, beta);
                self.undo(undo);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            if min_eval == i32::MAX { 0 } else { min_eval }
        }
    }

    /// Legal moves for `mover`: placements while under the piece cap,
    /// otherwise relocations of each live piece (oldest first) to each empty
    /// cell. Stably ordered by the destination's value to the bot, best
    /// first at maximizing nodes; ties keep enumeration order, which fixes
    /// which of several equal-scoring moves the root reports.
    fn candidates(&self, mover: Mark, is_maximizing: bool) -> Vec<Candidate> {
        let empties = empty_cells(&self.board);

        let mut candidates: Vec<Candidate> = if self.history.live_count(mover) < MAX_PIECES {
            empties.iter().map(|&to| Candidate::Place { to }).collect()
        } else {
            let mut moves = Vec::with_capacity(MAX_PIECES * empties.len());
            for slot in 0..self.history.of(mover).len() {
                for &to in &empties {
                    moves.push(Candidate::Relocate { slot, to });
                }
            }
            moves
        };

        if is_maximizing {
            candidates.sort_by(|a, b| {
                cell_strategic_value(&self.board, b.destination(), self.bot)
                    .cmp(&cell_strategic_value(&self.board, a.destination(), self.bot))
            });
        } else {
            candidates.sort_by(|a, b| {
                cell_strategic_value(&self.board, a.destination(), self.bot)
                    .cmp(&cell_strategic_value(&self.board, b.destination(), self.bot))
            });
        }

        candidates
    }

    fn apply(&mut self, candidate: Candidate, mover: Mark) -> Undo {
        match candidate {
            Candidate::Place { to } => {
                self.board[to] = mover;
                self.history.push(
                    mover,
                    MoveRecord {
                        cell: to,
                        seq: self.next_seq,
                    },
                );
                self.next_seq += 1;
                Undo::Place { mover }
            }
            Candidate::Relocate { slot, to } => {
                let lifted = self.history.of_mut(mover).remove(slot);
                self.board[lifted.cell] = Mark::Empty;
                self.board[to] = mover;
                self.history.push(
                    mover,
                    MoveRecord {
                        cell: to,
                        seq: self.next_seq,
                    },
                );
                self.next_seq += 1;
                Undo::Relocate { mover, slot, lifted }
            }
        }
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Place { mover } => {
                let placed = self.history.of_mut(mover).pop().unwrap();
                self.board[placed.cell] = Mark::Empty;
                self.next_seq -= 1;
            }
            Undo::Relocate { mover, slot, lifted } => {
                let placed = self.history.of_mut(mover).pop().unwrap();
                self.board[placed.cell] = Mark::Empty;
                self.board[lifted.cell] = mover;
                self.history.of_mut(mover).insert(slot, lifted);
                self.next_seq -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::empty_board;

    fn input_of(moves: &[(Mark, usize)], bot_mark: Mark) -> BotInput {
        let mut board = empty_board();
        let mut history = MoveHistory::default();
        for (seq, &(mark, cell)) in moves.iter().enumerate() {
            board[cell] = mark;
            history.push(mark, MoveRecord { cell, seq: seq as u64 });
        }
        BotInput {
            board,
            history,
            bot_mark,
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let input = input_of(
            &[
                (Mark::O, 0),
                (Mark::X, 3),
                (Mark::O, 1),
                (Mark::X, 4),
            ],
            Mark::O,
        );
        assert_eq!(calculate_move(&input), Some(2));
    }

    #[test]
    fn test_win_takes_precedence_over_block() {
        // O completes the top row at 2; X would complete the middle row at
        // 5. The win wins.
        let input = input_of(
            &[
                (Mark::O, 0),
                (Mark::X, 3),
                (Mark::O, 1),
                (Mark::X, 4),
            ],
            Mark::O,
        );
        assert_eq!(calculate_move(&input), Some(2));
        assert_ne!(calculate_move(&input), Some(5));
    }

    #[test]
    fn test_blocks_opponent_win() {
        let input = input_of(&[(Mark::X, 0), (Mark::O, 8), (Mark::X, 1)], Mark::O);
        assert_eq!(calculate_move(&input), Some(2));
    }

    #[test]
    fn test_block_beats_opening_heuristic() {
        // Center is free, but X threatens the top row; the block comes
        // first.
        let input = input_of(&[(Mark::X, 0), (Mark::O, 8), (Mark::X, 1)], Mark::O);
        assert_eq!(calculate_move(&input), Some(2));
    }

    #[test]
    fn test_takes_center_when_free() {
        let input = input_of(&[(Mark::X, 0)], Mark::O);
        assert_eq!(calculate_move(&input), Some(CENTER));
    }

    #[test]
    fn test_takes_first_free_corner_when_opponent_holds_center() {
        // X's only pair sits on the blocked 0-4-8 diagonal, so no block
        // fires; corner 0 is taken, corner 2 is the first free one.
        let input = input_of(&[(Mark::X, 4), (Mark::O, 0), (Mark::X, 8)], Mark::O);
        assert_eq!(calculate_move(&input), Some(2));
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut input = input_of(&[], Mark::O);
        let pattern = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::X,
        ];
        input.board.copy_from_slice(&pattern);
        assert_eq!(calculate_move(&input), None);
    }

    #[test]
    fn test_relocation_phase_returns_the_only_empty_cell() {
        // Both sides hold the full cap, one cell free, nobody one move from
        // a win: every candidate is a relocation into cell 8.
        let input = input_of(
            &[
                (Mark::X, 0),
                (Mark::O, 1),
                (Mark::X, 2),
                (Mark::O, 4),
                (Mark::X, 3),
                (Mark::O, 5),
                (Mark::X, 7),
                (Mark::O, 6),
            ],
            Mark::O,
        );
        assert_eq!(calculate_move(&input), Some(8));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        // No short-circuit applies here (the bot holds the center and no
        // side threatens a line), so this exercises the full search.
        let moves = [(Mark::X, 0), (Mark::O, 4), (Mark::X, 8)];
        let first = calculate_move(&input_of(&moves, Mark::O));
        let second = calculate_move(&input_of(&moves, Mark::O));
        assert_eq!(first, second);
        let index = first.unwrap();
        assert_eq!(input_of(&moves, Mark::O).board[index], Mark::Empty);
    }

    #[test]
    fn test_apply_undo_roundtrip_for_place() {
        let input = input_of(&[(Mark::X, 0), (Mark::O, 4)], Mark::O);
        let mut search = SearchState::new(&input);
        let board_before = search.board;
        let seq_before = search.next_seq;

        let undo = search.apply(Candidate::Place { to: 8 }, Mark::O);
        assert_eq!(search.board[8], Mark::O);
        assert_eq!(search.history.live_count(Mark::O), 2);

        search.undo(undo);
        assert_eq!(search.board, board_before);
        assert_eq!(search.next_seq, seq_before);
        assert_eq!(search.history.live_count(Mark::O), 1);
    }

    #[test]
    fn test_apply_undo_roundtrip_for_relocate() {
        let input = input_of(
            &[
                (Mark::O, 0),
                (Mark::X, 1),
                (Mark::O, 2),
                (Mark::X, 3),
                (Mark::O, 5),
                (Mark::X, 7),
                (Mark::O, 6),
                (Mark::X, 8),
            ],
            Mark::O,
        );
        let mut search = SearchState::new(&input);
        let board_before = search.board;
        let history_before: Vec<_> = search.history.of(Mark::O).to_vec();

        let undo = search.apply(Candidate::Relocate { slot: 0, to: 4 }, Mark::O);
        assert_eq!(search.board[0], Mark::Empty);
        assert_eq!(search.board[4], Mark::O);
        assert_eq!(search.history.oldest(Mark::O).unwrap().cell, 2);
        assert_eq!(search.history.newest(Mark::O).unwrap().cell, 4);

        search.undo(undo);
        assert_eq!(search.board, board_before);
        assert_eq!(search.history.of(Mark::O), history_before.as_slice());
    }
}
