use crate::board::{Board, CELL_COUNT};
use crate::game::{ActionResult, Game, TileOrigin};
use crate::tiles::TileValue;

/// A single player action a strategy can choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Place { origin: TileOrigin, cell: usize },
    Swap,
    Trash,
}

impl Move {
    /// Performs the move on `game`.
    pub fn apply(self, game: &mut Game) -> ActionResult {
        match self {
            Move::Place { origin, cell } => game.place(origin, cell),
            Move::Swap => game.swap_active_with_keep(),
            Move::Trash => game.trash_active(),
        }
    }
}

/// Weight of each empty cell left after a placement, relative to one point.
const EMPTY_CELL_WEIGHT: i64 = 2;

/// How a single placement would play out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementEval {
    /// Points the placement earns.
    pub gained: u32,
    /// Immediate points plus room left on the board.
    pub rating: i64,
}

/// Rates dropping `value` on `cell` without touching `board`.
///
/// # Arguments
/// * `board`: the current grid.
/// * `value`: the tile to place.
/// * `cell`: target cell index.
///
/// # Returns
/// `None` for placements the rules reject, otherwise the points earned
/// and a rating of those points plus `EMPTY_CELL_WEIGHT` per empty cell
/// left afterwards.
pub fn evaluate_placement(board: &Board, value: TileValue, cell: usize) -> Option<PlacementEval> {
    // PERFORMANCE: clones the board per candidate; 32 candidates at most.
    let mut sim = board.clone();
    let outcome = sim.place(cell, value);
    if !outcome.is_accepted() {
        return None;
    }
    let gained = outcome.score_delta();
    let empty_after = sim.empty_cells().count() as i64;
    Some(PlacementEval {
        gained,
        rating: gained as i64 + empty_after * EMPTY_CELL_WEIGHT,
    })
}

/// Greedy choice: the placement with the best `evaluate_placement` value
/// over both the queue front and the kept tile.
///
/// When the best placement scores nothing and the keep slot is free, the
/// front is parked instead. When the best placement would fill the board
/// without scoring, a trash use is spent if one remains.
/// Ties go to the lowest cell, queue before keep.
///
/// Returns `None` once the game is over.
pub fn choose_move(game: &Game) -> Option<Move> {
    if game.is_game_over() {
        return None;
    }
    let board = game.board();

    let mut best: Option<(i64, u32, Move)> = None;
    let sources = [
        (TileOrigin::Queue, game.queue().front().copied()),
        (TileOrigin::Keep, game.keep()),
    ];
    for (origin, value) in sources {
        let Some(value) = value else { continue };
        for cell in 0..CELL_COUNT {
            let Some(eval) = evaluate_placement(board, value, cell) else {
                continue;
            };
            if best.map_or(true, |(b, _, _)| eval.rating > b) {
                best = Some((eval.rating, eval.gained, Move::Place { origin, cell }));
            }
        }
    }

    let (_, gained, mv) = best?;
    if gained > 0 {
        return Some(mv);
    }
    if game.keep().is_none() {
        return Some(Move::Swap);
    }
    let fills_board = board.empty_cells().count() == 1;
    if fills_board && game.trash_uses() > 0 {
        return Some(Move::Trash);
    }
    Some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::utils::board_from_str_array;

    fn game_with(board: Board, queue: &[TileValue], keep: Option<TileValue>) -> Game {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        Game::new_with_state(config, board, queue, keep)
    }

    #[test]
    fn test_evaluate_placement() {
        let board = board_from_str_array(&["4 . . ."]).unwrap();
        // A match empties the board, a divide leaves the quotient behind.
        let rating = |value, cell| evaluate_placement(&board, value, cell).map(|e| e.rating);
        assert_eq!(rating(4, 0), Some(8 + 16 * 2));
        assert_eq!(rating(8, 0), Some(8 + 15 * 2));
        assert_eq!(rating(6, 0), None);
        assert_eq!(rating(6, 1), Some(14 * 2));
        assert_eq!(
            evaluate_placement(&board, 8, 0),
            Some(PlacementEval {
                gained: 8,
                rating: 38
            })
        );
    }

    #[test]
    fn test_prefers_scoring_move() {
        let board = board_from_str_array(&[". . . .", ". . 9 ."]).unwrap();
        let game = game_with(board, &[3, 5, 5], None);
        assert_eq!(
            choose_move(&game),
            Some(Move::Place {
                origin: TileOrigin::Queue,
                cell: 6
            })
        );
    }

    #[test]
    fn test_uses_keep_when_it_scores() {
        let board = board_from_str_array(&["10 . . ."]).unwrap();
        let game = game_with(board, &[3, 3, 3], Some(10));
        assert_eq!(
            choose_move(&game),
            Some(Move::Place {
                origin: TileOrigin::Keep,
                cell: 0
            })
        );
    }

    #[test]
    fn test_parks_non_scoring_tile() {
        let game = game_with(Board::new_empty(), &[7, 7, 7], None);
        assert_eq!(choose_move(&game), Some(Move::Swap));
    }

    #[test]
    fn test_trashes_instead_of_filling_board() {
        let board = board_from_str_array(&[
            "7 11 13 17",
            "19 23 29 31",
            "37 41 43 47",
            "53 59 61 .",
        ])
        .unwrap();
        let game = game_with(board, &[71, 71, 71], Some(73));
        assert_eq!(choose_move(&game), Some(Move::Trash));
    }

    #[test]
    fn test_no_move_when_game_over() {
        let board = board_from_str_array(&[
            "7 11 13 17",
            "19 23 29 31",
            "37 41 43 47",
            "53 59 61 67",
        ])
        .unwrap();
        let game = game_with(board, &[71, 71, 71], None);
        assert!(game.is_game_over());
        assert_eq!(choose_move(&game), None);
    }

    #[test]
    fn test_greedy_moves_are_always_legal() {
        let config = GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        let mut last_score = 0;
        for _ in 0..500 {
            let Some(mv) = choose_move(&game) else { break };
            mv.apply(&mut game).expect("strategy only picks legal moves");
            assert!(game.score() >= last_score);
            last_score = game.score();
        }
    }
}
