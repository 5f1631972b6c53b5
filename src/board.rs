//! The 4×4 playing grid and the merge/divide rules.
//!
//! - `Board`: sixteen cells, each empty or holding a tile value.
//! - `PlacementOutcome`: what happened when a tile was dropped on a cell.
//! - `can_merge`: the divisibility rule shared by placement, hints and
//!   game-over detection.
use crate::tiles::{TileTier, TileValue};
use std::collections::BTreeSet;
use std::fmt;

/// Number of rows and columns on the board.
pub const GRID_SIDE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// Returns `true` if a tile `a` dropped on a tile `b` resolves.
///
/// Two values resolve when they are equal or when the larger is an exact
/// multiple of the smaller. The relation is symmetric and reflexive.
///
/// # Examples
/// ```
/// use just_divide::board::can_merge;
/// assert!(can_merge(4, 4));
/// assert!(can_merge(3, 12));
/// assert!(!can_merge(4, 6));
/// ```
pub fn can_merge(a: TileValue, b: TileValue) -> bool {
    assert!(a > 0 && b > 0, "tile values must be positive");
    if a == b {
        return true;
    }
    let (larger, smaller) = if a > b { (a, b) } else { (b, a) };
    larger % smaller == 0
}

/// Like `can_merge`, but against a cell that may be empty.
/// An empty cell never merges.
pub fn can_merge_cell(value: TileValue, cell: Option<TileValue>) -> bool {
    cell.is_some_and(|other| can_merge(value, other))
}

/// Result of dropping a tile on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The cell was empty and now holds the tile.
    Placed,
    /// The tile matched the cell's value and both were cleared.
    Matched { score_delta: u32 },
    /// The larger value was divided by the smaller; the cell holds the quotient.
    Divided { quotient: TileValue, score_delta: u32 },
    /// The values do not resolve; the board is unchanged.
    Rejected,
}

impl PlacementOutcome {
    /// Points earned by this placement.
    pub fn score_delta(&self) -> u32 {
        match self {
            PlacementOutcome::Matched { score_delta }
            | PlacementOutcome::Divided { score_delta, .. } => *score_delta,
            PlacementOutcome::Placed | PlacementOutcome::Rejected => 0,
        }
    }

    /// `true` unless the placement was rejected.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, PlacementOutcome::Rejected)
    }
}

/// The game board: `CELL_COUNT` cells in row-major order.
///
/// Cell `i` sits at row `i / GRID_SIDE`, column `i % GRID_SIDE`. The board
/// only owns the grid; the queue and keep slot live in `Game`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<TileValue>; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Examples
    /// ```
    /// use just_divide::board::Board;
    /// let board = Board::new_empty();
    /// assert_eq!(board.get(0), None);
    /// assert_eq!(board.empty_cells().count(), 16);
    /// ```
    pub fn new_empty() -> Self {
        Board {
            cells: [None; CELL_COUNT],
        }
    }

    /// Creates a board from explicit cell contents.
    ///
    /// # Panics
    /// Panics if any occupied cell holds 0.
    pub fn from_cells(cells: [Option<TileValue>; CELL_COUNT]) -> Self {
        assert!(
            cells.iter().flatten().all(|&v| v > 0),
            "tile values must be positive"
        );
        Board { cells }
    }

    /// Returns the contents of `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= CELL_COUNT`.
    pub fn get(&self, cell: usize) -> Option<TileValue> {
        self.cells[cell]
    }

    /// Overwrites the contents of `cell`.
    ///
    /// # Panics
    /// Panics if `cell >= CELL_COUNT` or the value is 0.
    pub fn set(&mut self, cell: usize, value: Option<TileValue>) {
        assert!(value != Some(0), "tile values must be positive");
        self.cells[cell] = value;
    }

    /// Read-only view of every cell.
    pub fn cells(&self) -> &[Option<TileValue>; CELL_COUNT] {
        &self.cells
    }

    /// Indices of empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }

    /// Values of occupied cells in row-major order.
    pub fn occupied_values(&self) -> impl Iterator<Item = TileValue> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// `true` when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Converts a cell index to `(row, col)`.
    pub fn row_col(cell: usize) -> (usize, usize) {
        (cell / GRID_SIDE, cell % GRID_SIDE)
    }

    /// Orthogonal neighbours of `cell` that lie on the board, in the order
    /// up, down, left, right.
    pub fn neighbors(cell: usize) -> impl Iterator<Item = usize> {
        let (r, c) = Self::row_col(cell);
        let dr = [-1isize, 1, 0, 0];
        let dc = [0isize, 0, -1, 1];
        (0..4).filter_map(move |i| {
            let nr = r as isize + dr[i];
            let nc = c as isize + dc[i];
            if nr >= 0 && nr < GRID_SIDE as isize && nc >= 0 && nc < GRID_SIDE as isize {
                Some(nr as usize * GRID_SIDE + nc as usize)
            } else {
                None
            }
        })
    }

    /// Drops a tile with `value` on `cell` and resolves it.
    ///
    /// - Empty cell: the tile is placed, no points.
    /// - Equal value: the cell is cleared, `2 * value` points (saturating).
    /// - One divides the other: the cell holds `larger / smaller`,
    ///   `larger` points.
    /// - Otherwise the placement is rejected and nothing changes.
    ///
    /// # Panics
    /// Panics if `cell >= CELL_COUNT` or `value` is 0.
    pub fn place(&mut self, cell: usize, value: TileValue) -> PlacementOutcome {
        assert!(value > 0, "tile values must be positive");
        let current = match self.cells[cell] {
            None => {
                self.cells[cell] = Some(value);
                return PlacementOutcome::Placed;
            }
            Some(current) => current,
        };

        if value == current {
            self.cells[cell] = None;
            return PlacementOutcome::Matched {
                score_delta: value.saturating_mul(2),
            };
        }

        let larger = value.max(current);
        let smaller = value.min(current);
        if larger % smaller != 0 {
            return PlacementOutcome::Rejected;
        }

        let quotient = larger / smaller;
        // Equal values never reach this point.
        debug_assert_ne!(quotient, 1, "divide branch reached with equal values");
        self.cells[cell] = Some(quotient);
        PlacementOutcome::Divided {
            quotient,
            score_delta: larger,
        }
    }

    /// Renders the board for a terminal, marking `highlight` cells.
    ///
    /// Occupied cells are coloured by `TileTier`. Highlighted empty cells
    /// show `*` instead of `.`.
    pub fn to_string_with_highlight(&self, highlight: &BTreeSet<usize>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c_idx in 0..GRID_SIDE {
            output.push_str(&format!("{:^5}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..GRID_SIDE {
            output.push_str(&format!("{:<3}", r_idx * GRID_SIDE));
            for c_idx in 0..GRID_SIDE {
                let cell = r_idx * GRID_SIDE + c_idx;
                match self.cells[cell] {
                    Some(v) => {
                        let code = TileTier::of(v).to_ansi_color_code();
                        output.push_str(&format!("\x1b[1;{}m{:^4}\x1b[m ", code, v));
                    }
                    None if highlight.contains(&cell) => output.push_str("  *  "),
                    None => output.push_str("  .  "),
                }
            }
            if r_idx < GRID_SIDE - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    /// Formats the board using `to_string_with_highlight` with no highlights.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(&BTreeSet::new()))
    }
}
