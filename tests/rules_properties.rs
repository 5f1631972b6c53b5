//! Property tests for the placement rules and the controller invariants.
use just_divide::board::{can_merge, Board, PlacementOutcome, CELL_COUNT};
use just_divide::config::GameConfig;
use just_divide::game::Game;
use just_divide::progress::is_game_over;
use proptest::prelude::*;
use std::collections::VecDeque;

/// Everything undo is expected to restore.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Observed {
    board: Board,
    queue: VecDeque<u32>,
    keep: Option<u32>,
    score: u32,
    level: u32,
    trash_uses: u32,
    elapsed_secs: u32,
}

fn observe(game: &Game) -> Observed {
    Observed {
        board: game.board().clone(),
        queue: game.queue().clone(),
        keep: game.keep(),
        score: game.score(),
        level: game.level(),
        trash_uses: game.trash_uses(),
        elapsed_secs: game.elapsed_secs(),
    }
}

/// Runs action `op` (place front, place keep, swap, trash) and reports
/// whether it was accepted.
fn act(game: &mut Game, op: u8, cell: usize) -> bool {
    let result = match op % 4 {
        0 => game.place_active(cell),
        1 => game.place_keep(cell),
        2 => game.swap_active_with_keep(),
        _ => game.trash_active(),
    };
    result.is_ok()
}

fn cell_value() -> impl Strategy<Value = Option<u32>> {
    prop::option::weighted(0.8, 1u32..=32)
}

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform16(cell_value()).prop_map(Board::from_cells)
}

proptest! {
    #[test]
    fn merge_is_symmetric_and_reflexive(a in 1u32..500, b in 1u32..500) {
        prop_assert_eq!(can_merge(a, b), can_merge(b, a));
        prop_assert!(can_merge(a, a));
    }

    #[test]
    fn placement_follows_the_rules(board in board_strategy(), cell in 0usize..CELL_COUNT, value in 1u32..=32) {
        let mut after = board.clone();
        let outcome = after.place(cell, value);
        match board.get(cell) {
            None => {
                prop_assert_eq!(outcome, PlacementOutcome::Placed);
                prop_assert_eq!(after.get(cell), Some(value));
            }
            Some(current) if current == value => {
                prop_assert_eq!(outcome, PlacementOutcome::Matched { score_delta: 2 * value });
                prop_assert_eq!(after.get(cell), None);
            }
            Some(current) if can_merge(current, value) => {
                let larger = current.max(value);
                let quotient = larger / current.min(value);
                prop_assert_eq!(outcome, PlacementOutcome::Divided { quotient, score_delta: larger });
                prop_assert_eq!(after.get(cell), Some(quotient));
                prop_assert!(quotient > 1);
            }
            Some(_) => {
                prop_assert_eq!(outcome, PlacementOutcome::Rejected);
                prop_assert_eq!(&after, &board);
            }
        }
        for other in (0..CELL_COUNT).filter(|&c| c != cell) {
            prop_assert_eq!(after.get(other), board.get(other));
        }
    }

    #[test]
    fn game_over_iff_full_and_nothing_merges(
        board in board_strategy(),
        candidates in prop::collection::vec(1u32..=32, 0..=2),
    ) {
        let expected = board.is_full()
            && !candidates
                .iter()
                .any(|&c| board.occupied_values().any(|v| can_merge(c, v)));
        prop_assert_eq!(is_game_over(&board, &candidates), expected);
    }

    #[test]
    fn undo_is_a_strict_inverse(
        seed in any::<u64>(),
        actions in prop::collection::vec((0u8..4, 0usize..CELL_COUNT, 0u32..5), 1..40),
    ) {
        let config = GameConfig { seed: Some(seed), ..GameConfig::default() };
        let mut game = Game::new(config);
        let mut states = Vec::new();

        for (op, cell, secs) in actions {
            if states.len() == 10 || game.is_game_over() {
                break;
            }
            game.tick(secs);
            let before = observe(&game);
            if act(&mut game, op, cell) {
                states.push(before);
            } else {
                prop_assert_eq!(observe(&game), before);
            }
        }
        if game.is_game_over() {
            return Ok(());
        }

        while let Some(expected) = states.pop() {
            prop_assert!(game.undo().is_ok());
            prop_assert_eq!(observe(&game), expected);
        }
        prop_assert!(game.undo().is_err());
    }

    #[test]
    fn history_never_exceeds_capacity(
        seed in any::<u64>(),
        max_undo in 1usize..6,
        actions in prop::collection::vec((0u8..4, 0usize..CELL_COUNT), 1..60),
    ) {
        let config = GameConfig { seed: Some(seed), max_undo, ..GameConfig::default() };
        let mut game = Game::new(config);
        for (op, cell) in actions {
            if game.is_game_over() {
                break;
            }
            let len_before = game.history_len();
            let accepted = act(&mut game, op, cell);
            prop_assert!(game.history_len() <= max_undo);
            if !accepted {
                prop_assert_eq!(game.history_len(), len_before);
            }
        }
    }
}
