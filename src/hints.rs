//! Move hints: empty cells next to a tile the active value can resolve with.
use crate::board::{can_merge_cell, Board};
use crate::tiles::TileValue;
use std::collections::BTreeSet;

/// Computes the empty cells worth highlighting for `active`.
///
/// A cell qualifies when it is empty and at least one orthogonal neighbour
/// holds a value that `active` can merge or divide with. Returns an empty
/// set when there is no active value. Hints are advisory only.
///
/// # Examples
/// ```
/// use just_divide::hints::compute_hint_cells;
/// use just_divide::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["4 . . ."]).unwrap();
/// let hints = compute_hint_cells(&board, Some(8));
/// assert_eq!(hints.into_iter().collect::<Vec<_>>(), vec![1, 4]);
/// ```
pub fn compute_hint_cells(board: &Board, active: Option<TileValue>) -> BTreeSet<usize> {
    let Some(active) = active else {
        return BTreeSet::new();
    };

    board
        .empty_cells()
        .filter(|&cell| Board::neighbors(cell).any(|n| can_merge_cell(active, board.get(n))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_no_active_value_no_hints() {
        let board = board_from_str_array(&["4 . . ."]).unwrap();
        assert!(compute_hint_cells(&board, None).is_empty());
    }

    #[test]
    fn test_empty_board_no_hints() {
        assert!(compute_hint_cells(&Board::new_empty(), Some(6)).is_empty());
    }

    #[test]
    fn test_hints_only_next_to_compatible_tiles() {
        let board = board_from_str_array(&[
            ". . . .",
            ". 6 . .",
            ". . . 7",
            ". . . .",
        ])
        .unwrap();
        // 3 divides 6, nothing divides 7.
        let hints = compute_hint_cells(&board, Some(3));
        assert_eq!(hints.into_iter().collect::<Vec<_>>(), vec![1, 4, 6, 9]);

        let hints = compute_hint_cells(&board, Some(7));
        assert_eq!(hints.into_iter().collect::<Vec<_>>(), vec![7, 10, 15]);
    }

    #[test]
    fn test_occupied_cells_never_hinted() {
        let board = board_from_str_array(&["2 2 . .", "2 . . ."]).unwrap();
        let hints = compute_hint_cells(&board, Some(2));
        assert!(!hints.contains(&0));
        assert!(!hints.contains(&1));
        assert!(!hints.contains(&4));
        assert_eq!(hints.into_iter().collect::<Vec<_>>(), vec![2, 5, 8]);
    }

    #[test]
    fn test_no_diagonal_hints() {
        let board = board_from_str_array(&[". . . .", ". 4 . ."]).unwrap();
        let hints = compute_hint_cells(&board, Some(4));
        assert!(!hints.contains(&0));
        assert!(!hints.contains(&2));
        assert_eq!(hints.len(), 4);
    }
}
