use crate::types::Mark;

pub const BOARD_CELLS: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

/// 3x3 grid in row-major order: 0,1,2 / 3,4,5 / 6,7,8.
pub type Board = [Mark; BOARD_CELLS];

pub fn empty_board() -> Board {
    [Mark::Empty; BOARD_CELLS]
}

/// Indices of empty cells, ascending.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

/// Indices of cells holding `mark`, ascending.
pub fn pieces_of(board: &Board, mark: Mark) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == mark)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_nine_empty_cells() {
        let board = empty_board();
        assert_eq!(empty_cells(&board), (0..BOARD_CELLS).collect::<Vec<_>>());
        assert!(pieces_of(&board, Mark::X).is_empty());
        assert!(pieces_of(&board, Mark::O).is_empty());
    }

    #[test]
    fn test_empty_cells_ascending() {
        let mut board = empty_board();
        board[0] = Mark::X;
        board[1] = Mark::X;
        board[4] = Mark::O;
        assert_eq!(empty_cells(&board), vec![2, 3, 5, 6, 7, 8]);
        assert_eq!(pieces_of(&board, Mark::X), vec![0, 1]);
        assert_eq!(pieces_of(&board, Mark::O), vec![4]);
    }
}
