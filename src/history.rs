//! Bounded undo history.
use crate::board::Board;
use crate::tiles::TileValue;
use std::collections::VecDeque;

/// Default number of undoable actions.
pub const DEFAULT_MAX_UNDO: usize = 10;

/// A full copy of the undoable game state, taken just before an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub queue: VecDeque<TileValue>,
    pub keep: Option<TileValue>,
    pub score: u32,
    pub level: u32,
    pub trash_uses: u32,
    pub elapsed_secs: u32,
}

/// A stack of snapshots with a maximum depth.
///
/// Pushing onto a full history drops the oldest snapshot, so only the most
/// recent `capacity` actions can be undone.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` snapshots.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `snapshot` as the most recent state, evicting the oldest
    /// entry when the history is full.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_MAX_UNDO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_score(score: u32) -> Snapshot {
        Snapshot {
            board: Board::new_empty(),
            queue: VecDeque::from(vec![2, 3, 4]),
            keep: None,
            score,
            level: 1,
            trash_uses: 2,
            elapsed_secs: 0,
        }
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut history = History::default();
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new(3);
        history.push(snapshot_with_score(1));
        history.push(snapshot_with_score(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().map(|s| s.score), Some(2));
        assert_eq!(history.pop().map(|s| s.score), Some(1));
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_push_evicts_oldest_when_full() {
        let mut history = History::new(DEFAULT_MAX_UNDO);
        for score in 0..25 {
            history.push(snapshot_with_score(score));
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.len(), DEFAULT_MAX_UNDO);

        let mut popped = Vec::new();
        while let Some(s) = history.pop() {
            popped.push(s.score);
        }
        assert_eq!(popped, (15..25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(2);
        history.push(snapshot_with_score(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "history capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        History::new(0);
    }
}
