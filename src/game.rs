//! The game controller.
//!
//! `Game` owns the whole game state (board, queue, keep slot, progress,
//! undo history, hints) and turns player intents into atomic state changes.
//! Each action either applies fully and returns the events a front-end needs
//! for feedback, or changes nothing and returns a `Rejection` explaining why.
use crate::board::{Board, PlacementOutcome, CELL_COUNT};
use crate::config::GameConfig;
use crate::hints::compute_hint_cells;
use crate::history::{History, Snapshot};
use crate::persistence::{BestScoreStore, JsonFileStore, MemoryStore};
use crate::progress::{is_game_over, Progress};
use crate::tiles::{Difficulty, TileSource, TileValue, QUEUE_LEN};
use log::{debug, info, warn};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// Where a tile being placed comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileOrigin {
    /// The front of the upcoming-tile queue.
    Queue,
    /// The keep slot.
    Keep,
}

impl fmt::Display for TileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileOrigin::Queue => f.write_str("queue"),
            TileOrigin::Keep => f.write_str("keep slot"),
        }
    }
}

/// Whether the game accepts actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// No legal placement remains. Only `restart` resumes play.
    GameOver,
}

/// Something that happened during an accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Placed {
        cell: usize,
        value: TileValue,
        origin: TileOrigin,
    },
    Matched {
        cell: usize,
        value: TileValue,
        origin: TileOrigin,
        score_delta: u32,
    },
    Divided {
        cell: usize,
        value: TileValue,
        quotient: TileValue,
        origin: TileOrigin,
        score_delta: u32,
    },
    /// The queue front went to the keep slot; `returned` is the previously
    /// kept tile, now at the front of the queue.
    Kept {
        value: TileValue,
        returned: Option<TileValue>,
    },
    Trashed {
        value: TileValue,
        trash_uses_left: u32,
    },
    LevelUp {
        level: u32,
        trash_uses: u32,
    },
    NewBestScore {
        score: u32,
    },
    Undone,
    DifficultyChanged {
        difficulty: Difficulty,
    },
    GameOver {
        score: u32,
    },
}

/// Why an action was refused. The game state is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("the game is over; restart to play again")]
    GameOver,

    #[error("cell {0} is not on the board")]
    CellOutOfRange(usize),

    #[error("there is no tile in the {0}")]
    EmptySource(TileOrigin),

    #[error("{value} cannot merge with {current} in cell {cell}")]
    InvalidPlacement {
        cell: usize,
        value: TileValue,
        current: TileValue,
    },

    #[error("no trash uses left")]
    TrashExhausted,

    #[error("nothing to undo")]
    UndoUnavailable,
}

/// Outcome of a player action.
pub type ActionResult = Result<Vec<GameEvent>, Rejection>;

/// A single game session.
///
/// # Examples
/// ```
/// use just_divide::board::Board;
/// use just_divide::config::GameConfig;
/// use just_divide::game::{Game, GameEvent};
///
/// let mut game = Game::new_with_state(GameConfig::default(), Board::new_empty(), &[4, 8, 2], None);
/// assert!(game.place_active(0).is_ok());
/// assert_eq!(game.board().get(0), Some(4));
///
/// let events = game.place_active(0).unwrap();
/// assert!(matches!(events[0], GameEvent::Divided { quotient: 2, .. }));
/// assert_eq!(game.score(), 8);
///
/// game.undo().unwrap();
/// assert_eq!(game.board().get(0), Some(4));
/// assert_eq!(game.score(), 0);
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    queue: VecDeque<TileValue>,
    keep: Option<TileValue>,
    difficulty: Difficulty,
    progress: Progress,
    history: History,
    source: TileSource,
    store: Box<dyn BestScoreStore>,
    hints: BTreeSet<usize>,
    hints_enabled: bool,
    elapsed_secs: u32,
    status: GameStatus,
}

impl Game {
    /// Starts a new game from `config`.
    ///
    /// Uses a `JsonFileStore` when `config.best_score_path` is set, an
    /// in-memory store otherwise.
    ///
    /// # Panics
    /// Panics if `config.max_undo` or `config.points_per_level` is 0; use
    /// `GameConfig::validate` first for untrusted input.
    pub fn new(config: GameConfig) -> Self {
        let store = store_for(&config);
        Self::with_store(config, store)
    }

    /// Starts a new game that reads and writes its best score through `store`.
    pub fn with_store(config: GameConfig, store: Box<dyn BestScoreStore>) -> Self {
        let source = match config.seed {
            Some(seed) => TileSource::new_with_seed(seed),
            None => TileSource::from_entropy(),
        };
        let mut game = Game {
            board: Board::new_empty(),
            queue: VecDeque::with_capacity(QUEUE_LEN + 1),
            keep: None,
            difficulty: config.difficulty,
            progress: Progress::new(config.starting_trash_uses, config.points_per_level, 0),
            history: History::new(config.max_undo),
            source,
            store,
            hints: BTreeSet::new(),
            hints_enabled: config.hints_enabled,
            elapsed_secs: 0,
            status: GameStatus::Playing,
            config,
        };
        game.restart();
        game
    }

    /// Starts a game from a prepared position. `queue` lists the upcoming
    /// tiles front first and is topped up to `QUEUE_LEN`.
    ///
    /// The best score store is chosen from `config` as in `Game::new`.
    ///
    /// # Panics
    /// Panics if `queue` holds more than `QUEUE_LEN` tiles or any value is 0.
    pub fn new_with_state(
        config: GameConfig,
        board: Board,
        queue: &[TileValue],
        keep: Option<TileValue>,
    ) -> Self {
        assert!(queue.len() <= QUEUE_LEN, "queue holds at most {} tiles", QUEUE_LEN);
        assert!(
            queue.iter().chain(keep.iter()).all(|&v| v > 0),
            "tile values must be positive"
        );
        let store = store_for(&config);
        let mut game = Self::with_store(config, store);
        game.board = board;
        game.queue = queue.iter().copied().collect();
        game.keep = keep;
        game.source.refill_queue(&mut game.queue, game.difficulty);
        game.refresh_hints();
        game.check_game_over(&mut Vec::new());
        game
    }

    // ----- read access -----

    /// The current grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Upcoming tiles, front first.
    pub fn queue(&self) -> &VecDeque<TileValue> {
        &self.queue
    }

    /// The tile held in the keep slot, if any.
    pub fn keep(&self) -> Option<TileValue> {
        self.keep
    }

    /// The value hints are computed for: the queue front, else the kept tile.
    pub fn active_value(&self) -> Option<TileValue> {
        self.queue.front().copied().or(self.keep)
    }

    /// Values the player could place next: the queue front and the kept tile.
    pub fn candidates(&self) -> Vec<TileValue> {
        self.queue.front().copied().into_iter().chain(self.keep).collect()
    }

    /// Points earned this game.
    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Remaining trash uses.
    pub fn trash_uses(&self) -> u32 {
        self.progress.trash_uses()
    }

    /// Best score across games, as loaded from the store and raised
    /// during play.
    pub fn best_score(&self) -> u32 {
        self.progress.best_score()
    }

    /// Highlighted cells for the active value. Empty while hints are off.
    pub fn hints(&self) -> &BTreeSet<usize> {
        &self.hints
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Shorthand for `status() == GameStatus::GameOver`.
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Tier new tiles are currently drawn from.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Play time in seconds, as advanced by `tick`.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Number of actions that can currently be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ----- actions -----

    /// Places the queue front on `cell`.
    pub fn place_active(&mut self, cell: usize) -> ActionResult {
        self.place(TileOrigin::Queue, cell)
    }

    /// Places the kept tile on `cell`.
    pub fn place_keep(&mut self, cell: usize) -> ActionResult {
        self.place(TileOrigin::Keep, cell)
    }

    /// Places the tile from `origin` on `cell`, merging or dividing with an
    /// occupied cell when the values allow it.
    ///
    /// # Arguments
    /// * `origin`: where the tile comes from.
    /// * `cell`: target cell index, `0..CELL_COUNT`.
    ///
    /// # Returns
    /// * `Ok(events)`: the placement event, followed by any `LevelUp`,
    ///   `NewBestScore` and `GameOver` it caused.
    /// * `Err(Rejection)`: the game is over, the cell is off the board, the
    ///   source is empty, or the values do not resolve. Nothing changed.
    pub fn place(&mut self, origin: TileOrigin, cell: usize) -> ActionResult {
        self.ensure_playing()?;
        if cell >= CELL_COUNT {
            return Err(Rejection::CellOutOfRange(cell));
        }
        let value = match origin {
            TileOrigin::Queue => self.queue.front().copied(),
            TileOrigin::Keep => self.keep,
        }
        .ok_or(Rejection::EmptySource(origin))?;

        let snapshot = self.snapshot();
        let current = self.board.get(cell);
        let outcome = self.board.place(cell, value);
        let event = match outcome {
            PlacementOutcome::Placed => GameEvent::Placed {
                cell,
                value,
                origin,
            },
            PlacementOutcome::Matched { score_delta } => GameEvent::Matched {
                cell,
                value,
                origin,
                score_delta,
            },
            PlacementOutcome::Divided {
                quotient,
                score_delta,
            } => GameEvent::Divided {
                cell,
                value,
                quotient,
                origin,
                score_delta,
            },
            PlacementOutcome::Rejected => {
                debug!("rejected {} from {} on cell {}", value, origin, cell);
                return Err(Rejection::InvalidPlacement {
                    cell,
                    value,
                    current: current.unwrap_or_default(),
                });
            }
        };
        debug!("{:?}", event);

        match origin {
            TileOrigin::Queue => {
                self.queue.pop_front();
                self.source.refill_queue(&mut self.queue, self.difficulty);
            }
            TileOrigin::Keep => self.keep = None,
        }

        let mut events = vec![event];
        self.progress.apply_score_delta(outcome.score_delta());
        if let Some(level) = self.progress.recompute_level() {
            debug!("level up to {}", level);
            events.push(GameEvent::LevelUp {
                level,
                trash_uses: self.progress.trash_uses(),
            });
        }
        self.record_best(&mut events);
        self.commit(snapshot, &mut events);
        Ok(events)
    }

    /// Moves the queue front into the keep slot. A tile already kept goes
    /// back to the front of the queue.
    pub fn swap_active_with_keep(&mut self) -> ActionResult {
        self.ensure_playing()?;
        let Some(&front) = self.queue.front() else {
            return Err(Rejection::EmptySource(TileOrigin::Queue));
        };

        let snapshot = self.snapshot();
        self.queue.pop_front();
        let returned = self.keep.replace(front);
        if let Some(previous) = returned {
            self.queue.push_front(previous);
        }
        self.source.refill_queue(&mut self.queue, self.difficulty);
        debug!("kept {}, returned {:?}", front, returned);

        let mut events = vec![GameEvent::Kept {
            value: front,
            returned,
        }];
        self.commit(snapshot, &mut events);
        Ok(events)
    }

    /// Discards the queue front, spending one trash use.
    pub fn trash_active(&mut self) -> ActionResult {
        self.ensure_playing()?;
        let Some(&front) = self.queue.front() else {
            return Err(Rejection::EmptySource(TileOrigin::Queue));
        };

        let snapshot = self.snapshot();
        if !self.progress.use_trash() {
            return Err(Rejection::TrashExhausted);
        }
        self.queue.pop_front();
        self.source.refill_queue(&mut self.queue, self.difficulty);
        debug!("trashed {}", front);

        let mut events = vec![GameEvent::Trashed {
            value: front,
            trash_uses_left: self.progress.trash_uses(),
        }];
        self.commit(snapshot, &mut events);
        Ok(events)
    }

    /// Restores the state from before the most recent action.
    pub fn undo(&mut self) -> ActionResult {
        self.ensure_playing()?;
        let snapshot = self.history.pop().ok_or(Rejection::UndoUnavailable)?;
        self.board = snapshot.board;
        self.queue = snapshot.queue;
        self.keep = snapshot.keep;
        self.progress
            .restore(snapshot.score, snapshot.level, snapshot.trash_uses);
        self.elapsed_secs = snapshot.elapsed_secs;
        self.refresh_hints();
        debug!("undo, {} left", self.history.len());
        Ok(vec![GameEvent::Undone])
    }

    /// Switches tier and redraws the whole queue. The board, score and
    /// history are untouched.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> ActionResult {
        self.ensure_playing()?;
        self.difficulty = difficulty;
        self.queue.clear();
        self.source.refill_queue(&mut self.queue, difficulty);
        debug!("difficulty set to {}", difficulty);

        let mut events = vec![GameEvent::DifficultyChanged { difficulty }];
        self.refresh_hints();
        self.check_game_over(&mut events);
        Ok(events)
    }

    /// Turns hints on or off and returns the new setting.
    pub fn toggle_hints(&mut self) -> bool {
        self.hints_enabled = !self.hints_enabled;
        self.refresh_hints();
        self.hints_enabled
    }

    /// Advances the play clock. Ignored once the game is over.
    pub fn tick(&mut self, secs: u32) {
        if self.status == GameStatus::Playing {
            self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        }
    }

    /// Throws away the current game and starts over from the config.
    /// The best score is reloaded from the store.
    pub fn restart(&mut self) {
        let best = match self.store.load_best_score() {
            Ok(best) => best,
            Err(e) => {
                warn!("could not load best score: {}", e);
                self.progress.best_score()
            }
        };
        self.board = Board::new_empty();
        self.queue.clear();
        self.keep = None;
        self.difficulty = self.config.difficulty;
        self.progress = Progress::new(
            self.config.starting_trash_uses,
            self.config.points_per_level,
            best,
        );
        self.history.clear();
        self.hints_enabled = self.config.hints_enabled;
        self.elapsed_secs = 0;
        self.status = GameStatus::Playing;
        self.source.refill_queue(&mut self.queue, self.difficulty);
        self.refresh_hints();
    }

    // ----- internals -----

    fn ensure_playing(&self) -> Result<(), Rejection> {
        match self.status {
            GameStatus::Playing => Ok(()),
            GameStatus::GameOver => Err(Rejection::GameOver),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            queue: self.queue.clone(),
            keep: self.keep,
            score: self.progress.score(),
            level: self.progress.level(),
            trash_uses: self.progress.trash_uses(),
            elapsed_secs: self.elapsed_secs,
        }
    }

    /// Finishes an accepted action: the pre-action snapshot becomes undoable,
    /// hints are refreshed and game over is checked.
    fn commit(&mut self, snapshot: Snapshot, events: &mut Vec<GameEvent>) {
        self.history.push(snapshot);
        self.refresh_hints();
        self.check_game_over(events);
    }

    fn refresh_hints(&mut self) {
        self.hints = if self.hints_enabled {
            compute_hint_cells(&self.board, self.active_value())
        } else {
            BTreeSet::new()
        };
    }

    fn record_best(&mut self, events: &mut Vec<GameEvent>) {
        if !self.progress.record_best() {
            return;
        }
        let score = self.progress.best_score();
        if let Err(e) = self.store.save_best_score(score) {
            warn!("could not save best score {}: {}", score, e);
        }
        info!("new best score {}", score);
        events.push(GameEvent::NewBestScore { score });
    }

    fn check_game_over(&mut self, events: &mut Vec<GameEvent>) {
        if is_game_over(&self.board, &self.candidates()) {
            self.status = GameStatus::GameOver;
            info!("game over with score {}", self.progress.score());
            events.push(GameEvent::GameOver {
                score: self.progress.score(),
            });
        }
    }
}

/// A `JsonFileStore` when `config.best_score_path` is set, an in-memory
/// store otherwise.
fn store_for(config: &GameConfig) -> Box<dyn BestScoreStore> {
    match &config.best_score_path {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    }
}
