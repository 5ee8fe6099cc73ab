//! Hand-tuned position scoring for the bot. Every weight here is part of the
//! engine's behavioral contract; the search's move choice depends on them.

use crate::board::{Board, CENTER, CORNERS, EDGES};
use crate::types::{Mark, MoveHistory};
use crate::win_detector::{WINNING_LINES, check_win};

pub const WIN_SCORE: i32 = 1000;

pub const OWN_THREAT_BONUS: i32 = 15;
pub const OPPONENT_THREAT_PENALTY: i32 = 20;

pub const MUST_BLOCK_VALUE: i32 = 5;

pub const CENTER_FRESH_BONUS: i32 = 8;
pub const CORNER_FRESH_BONUS: i32 = 5;
pub const WEAK_OLDEST_PENALTY: i32 = 3;
pub const OPPONENT_TEMPO_PENALTY: i32 = 10;

/// Strategic value at or below which a piece counts as weak.
pub const WEAK_PIECE_THRESHOLD: i32 = 2;
/// Strategic value above which an opponent piece demands counter-play.
pub const TEMPO_THRESHOLD: i32 = 3;

pub const OWN_TWO_IN_LINE_BONUS: i32 = 20;
pub const OWN_THREE_IN_LINE_BONUS: i32 = 40;
pub const OPPONENT_TWO_IN_LINE_PENALTY: i32 = 25;
pub const OPPONENT_THREE_IN_LINE_PENALTY: i32 = 50;

/// How much a single cell contributes to `mark`'s position: for each winning
/// line through it, `own count + 1` when the line is free of opponent marks,
/// plus a must-block credit when the opponent is one move from completing
/// that line through this cell. Works for occupied and empty cells alike (the
/// search uses it to order candidate destinations).
pub fn cell_strategic_value(board: &Board, index: usize, mark: Mark) -> i32 {
    let opponent = mark.opponent().expect("strategic value needs a player mark");
    let mut value = 0;

    for line in WINNING_LINES {
        if !line.contains(&index) {
            continue;
        }
        let own = line.iter().filter(|&&i| board[i] == mark).count() as i32;
        let theirs = line.iter().filter(|&&i| board[i] == opponent).count() as i32;

        if theirs == 0 {
            value += own + 1;
        } else if theirs == 2 && own == 0 {
            value += MUST_BLOCK_VALUE;
        }
    }

    value
}

/// Scores `board` from the bot's perspective; higher is better for the bot.
/// `depth` is the search ply at which the position was reached, used to
/// prefer faster wins and slower losses.
pub fn evaluate(board: &Board, history: &MoveHistory, depth: usize, bot: Mark) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == bot {
            WIN_SCORE - depth as i32
        } else {
            -WIN_SCORE + depth as i32
        };
    }

    let opponent = bot.opponent().expect("bot must be a player mark");
    let mut score = 0;

    // Open threats: two own marks and a gap, or the opponent's same shape.
    // Blocking is weighted above attacking.
    for line in WINNING_LINES {
        let own = line.iter().filter(|&&i| board[i] == bot).count();
        let theirs = line.iter().filter(|&&i| board[i] == opponent).count();
        let empty = line.iter().filter(|&&i| board[i] == Mark::Empty).count();

        if own == 2 && empty == 1 {
            score += OWN_THREAT_BONUS;
        }
        if theirs == 2 && empty == 1 {
            score -= OPPONENT_THREAT_PENALTY;
        }
    }

    // Per-piece strategic value, each side valued from its own perspective.
    for index in 0..board.len() {
        if board[index] == bot {
            score += cell_strategic_value(board, index, bot);
        } else if board[index] == opponent {
            score -= cell_strategic_value(board, index, opponent);
        }
    }

    // Age and placement of the live pieces.
    if let Some(newest) = history.newest(bot) {
        if newest.cell == CENTER && board[CENTER] == bot {
            score += CENTER_FRESH_BONUS;
        }
        if CORNERS.contains(&newest.cell) {
            score += CORNER_FRESH_BONUS;
        }
    }
    if let Some(oldest) = history.oldest(bot) {
        if EDGES.contains(&oldest.cell)
            && cell_strategic_value(board, oldest.cell, bot) <= WEAK_PIECE_THRESHOLD
        {
            score -= WEAK_OLDEST_PENALTY;
        }
    }
    if let Some(newest) = history.newest(opponent) {
        if cell_strategic_value(board, newest.cell, opponent) > TEMPO_THRESHOLD {
            score -= OPPONENT_TEMPO_PENALTY;
        }
    }

    // Line formations, counted on top of the threat scan above.
    for line in WINNING_LINES {
        let own = line.iter().filter(|&&i| board[i] == bot).count();
        let theirs = line.iter().filter(|&&i| board[i] == opponent).count();
        let empty = line.iter().filter(|&&i| board[i] == Mark::Empty).count();

        if theirs == 2 && empty == 1 {
            score -= OPPONENT_TWO_IN_LINE_PENALTY;
        }
        if theirs == 3 {
            score -= OPPONENT_THREE_IN_LINE_PENALTY;
        }
        if own == 2 && empty == 1 {
            score += OWN_TWO_IN_LINE_BONUS;
        }
        if own == 3 {
            score += OWN_THREE_IN_LINE_BONUS;
        }
    }

    score
}
