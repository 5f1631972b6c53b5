use crate::board::{Board, CELL_COUNT, GRID_SIDE};
use crate::error::GridParseError;
use crate::tiles::TileValue;

/// Parses an array of row strings into a `Board`.
///
/// Each string is one row, starting from row 0, with cells separated by
/// whitespace. A cell is either `.` (empty) or a positive integer.
/// Missing rows and missing trailing cells are left empty.
///
/// # Returns
/// * `Ok(Board)` on success.
/// * `Err(GridParseError)` if there are more than `GRID_SIDE` rows, a row
///   has more than `GRID_SIDE` cells, or a cell is neither `.` nor a positive
///   integer.
///
/// # Examples
/// ```
/// use just_divide::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["4 . 12", ". 9"]).unwrap();
/// assert_eq!(board.get(0), Some(4));
/// assert_eq!(board.get(1), None);
/// assert_eq!(board.get(2), Some(12));
/// assert_eq!(board.get(3), None);
/// assert_eq!(board.get(5), Some(9));
///
/// assert!(board_from_str_array(&["4 x"]).is_err());
/// assert!(board_from_str_array(&["0"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, GridParseError> {
    if s.len() > GRID_SIDE {
        return Err(GridParseError::TooManyRows {
            expected: GRID_SIDE,
            found: s.len(),
        });
    }

    let mut cells: [Option<TileValue>; CELL_COUNT] = [None; CELL_COUNT];

    for (r, row_str) in s.iter().enumerate() {
        let tokens: Vec<&str> = row_str.split_whitespace().collect();
        if tokens.len() > GRID_SIDE {
            return Err(GridParseError::RowTooLong {
                row: r,
                expected: GRID_SIDE,
                found: tokens.len(),
            });
        }

        for (c, token) in tokens.into_iter().enumerate() {
            cells[r * GRID_SIDE + c] = match token {
                "." => None,
                _ => match token.parse::<TileValue>() {
                    Ok(v) if v > 0 => Some(v),
                    _ => {
                        return Err(GridParseError::BadCell {
                            token: token.to_string(),
                            row: r,
                            col: c,
                        })
                    }
                },
            };
        }
    }
    Ok(Board::from_cells(cells))
}

/// Parses a whitespace separated list of tile values, e.g. `"4 8 2"`.
pub fn values_from_str(s: &str) -> Result<Vec<TileValue>, GridParseError> {
    s.split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.parse::<TileValue>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(GridParseError::BadCell {
                token: token.to_string(),
                row: 0,
                col: i,
            }),
        })
        .collect()
}
