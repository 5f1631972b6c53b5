//! Score, level and trash bookkeeping, plus game-over detection.
use crate::board::{can_merge, Board};
use crate::tiles::TileValue;

/// Default points needed per level.
pub const DEFAULT_POINTS_PER_LEVEL: u32 = 10;

/// Default number of trash uses at the start of a game.
pub const DEFAULT_STARTING_TRASH_USES: u32 = 2;

/// Tracks score, level, remaining trash uses and the best score.
///
/// The level is derived from the score as `score / points_per_level + 1`.
/// Each time the level goes up, one trash use is granted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    level: u32,
    trash_uses: u32,
    best_score: u32,
    points_per_level: u32,
}

impl Progress {
    /// Starts a fresh game at level 1 with `starting_trash_uses`.
    ///
    /// # Panics
    /// Panics if `points_per_level` is 0.
    pub fn new(starting_trash_uses: u32, points_per_level: u32, best_score: u32) -> Self {
        assert!(points_per_level > 0, "points_per_level must be positive");
        Progress {
            score: 0,
            level: 1,
            trash_uses: starting_trash_uses,
            best_score,
            points_per_level,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn trash_uses(&self) -> u32 {
        self.trash_uses
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Adds the points earned by a placement. The score saturates at
    /// `u32::MAX`.
    pub fn apply_score_delta(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    /// Raises the level if the score has crossed a threshold.
    ///
    /// Returns the new level when it changed. One trash use is granted per
    /// call that raises the level, even if several thresholds were crossed
    /// at once.
    pub fn recompute_level(&mut self) -> Option<u32> {
        let new_level = (self.score / self.points_per_level).saturating_add(1);
        if new_level > self.level {
            self.level = new_level;
            self.trash_uses += 1;
            Some(new_level)
        } else {
            None
        }
    }

    /// Spends one trash use. Returns `false`, leaving the count untouched,
    /// when none remain.
    pub fn use_trash(&mut self) -> bool {
        if self.trash_uses > 0 {
            self.trash_uses -= 1;
            true
        } else {
            false
        }
    }

    /// Raises the best score to the current score if it was beaten.
    /// Returns `true` when the best score changed.
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    /// Puts score, level and trash uses back to a previously saved state.
    /// The best score is kept.
    pub fn restore(&mut self, score: u32, level: u32, trash_uses: u32) {
        self.score = score;
        self.level = level;
        self.trash_uses = trash_uses;
    }
}

/// Returns `true` when no further placement is possible.
///
/// The game is over when the board has no empty cell and none of the
/// `candidates` (the queue front and the kept tile) can merge with any
/// occupied cell. With no candidates at all the game is over as soon as the
/// board is full.
pub fn is_game_over(board: &Board, candidates: &[TileValue]) -> bool {
    if !board.is_full() {
        return false;
    }
    !board
        .occupied_values()
        .any(|cell| candidates.iter().any(|&c| can_merge(c, cell)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn full_board_of_primes() -> Board {
        board_from_str_array(&[
            "7 11 13 17",
            "19 23 29 31",
            "37 41 43 47",
            "53 59 61 67",
        ])
        .unwrap()
    }

    #[test]
    fn test_new_progress() {
        let progress = Progress::new(DEFAULT_STARTING_TRASH_USES, DEFAULT_POINTS_PER_LEVEL, 42);
        assert_eq!(progress.score(), 0);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.trash_uses(), 2);
        assert_eq!(progress.best_score(), 42);
    }

    #[test]
    fn test_level_up_grants_one_trash_once() {
        let mut progress = Progress::new(2, 10, 0);
        progress.apply_score_delta(10);
        assert_eq!(progress.recompute_level(), Some(2));
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.trash_uses(), 3);

        for _ in 11..20 {
            progress.apply_score_delta(1);
            assert_eq!(progress.recompute_level(), None);
        }
        assert_eq!(progress.score(), 19);
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.trash_uses(), 3);
    }

    #[test]
    fn test_level_jump_grants_single_trash() {
        let mut progress = Progress::new(0, 10, 0);
        progress.apply_score_delta(32);
        assert_eq!(progress.recompute_level(), Some(4));
        assert_eq!(progress.trash_uses(), 1);
    }

    #[test]
    fn test_score_saturates() {
        let mut progress = Progress::new(0, 1, 0);
        progress.apply_score_delta(u32::MAX - 1);
        progress.apply_score_delta(4_000_000_000);
        assert_eq!(progress.score(), u32::MAX);
        assert_eq!(progress.recompute_level(), Some(u32::MAX));
    }

    #[test]
    fn test_use_trash_never_negative() {
        let mut progress = Progress::new(1, 10, 0);
        assert!(progress.use_trash());
        assert_eq!(progress.trash_uses(), 0);
        assert!(!progress.use_trash());
        assert_eq!(progress.trash_uses(), 0);
    }

    #[test]
    fn test_record_best() {
        let mut progress = Progress::new(2, 10, 20);
        progress.apply_score_delta(20);
        assert!(!progress.record_best());
        progress.apply_score_delta(1);
        assert!(progress.record_best());
        assert_eq!(progress.best_score(), 21);
    }

    #[test]
    fn test_restore_keeps_best() {
        let mut progress = Progress::new(2, 10, 0);
        progress.apply_score_delta(30);
        progress.recompute_level();
        progress.record_best();
        progress.restore(0, 1, 2);
        assert_eq!(progress.score(), 0);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.trash_uses(), 2);
        assert_eq!(progress.best_score(), 30);
    }

    #[test]
    fn test_game_not_over_with_empty_cell() {
        let mut board = full_board_of_primes();
        board.set(3, None);
        assert!(!is_game_over(&board, &[4]));
        assert!(!is_game_over(&board, &[]));
    }

    #[test]
    fn test_game_over_when_full_and_stuck() {
        let board = full_board_of_primes();
        assert!(is_game_over(&board, &[4, 6]));
    }

    #[test]
    fn test_game_not_over_when_a_candidate_fits() {
        let board = full_board_of_primes();
        // Keep value can divide into a cell even though the front cannot.
        assert!(!is_game_over(&board, &[4, 7]));
        assert!(!is_game_over(&board, &[1]));
    }

    #[test]
    fn test_game_over_without_candidates() {
        assert!(is_game_over(&full_board_of_primes(), &[]));
    }
}
