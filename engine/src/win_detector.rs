use crate::board::Board;
use crate::types::Mark;

/// The 8 winning lines in fixed enumeration order: rows, columns, diagonals.
/// Win detection reports the first complete line in this order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|(mark, _)| mark)
}

pub fn check_win_with_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        if board[a] != Mark::Empty && board[a] == board[b] && board[a] == board[c] {
            return Some((board[a], line));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::empty_board;

    fn board_with(marks: &[(usize, Mark)]) -> Board {
        let mut board = empty_board();
        for &(index, mark) in marks {
            board[index] = mark;
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_win(&empty_board()), None);
    }

    #[test]
    fn test_detects_every_line() {
        for line in WINNING_LINES {
            let board = board_with(&line.map(|i| (i, Mark::X)));
            assert_eq!(check_win(&board), Some(Mark::X), "line {:?}", line);

            let board = board_with(&line.map(|i| (i, Mark::O)));
            assert_eq!(check_win(&board), Some(Mark::O), "line {:?}", line);
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X), (2, Mark::O)]);
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
        assert_eq!(check_win(&board), None);
    }

    #[test]
    fn test_first_line_in_enumeration_order_wins_ties() {
        // X owns both the top row and the left column; rows are enumerated
        // before columns.
        let board = board_with(&[
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
        ]);
        let (mark, line) = check_win_with_line(&board).unwrap();
        assert_eq!(mark, Mark::X);
        assert_eq!(line, [0, 1, 2]);
    }

    #[test]
    fn test_reports_winning_line() {
        let board = board_with(&[(2, Mark::O), (4, Mark::O), (6, Mark::O)]);
        assert_eq!(check_win_with_line(&board), Some((Mark::O, [2, 4, 6])));
    }
}
