//! # Just Divide
//!
//! Rules engine for a single-player number puzzle. Tiles from a queue are
//! dropped onto a 4×4 board: equal values clear each other, and when one
//! value divides the other the cell keeps the quotient. The game ends when
//! the board is full and nothing the player holds can resolve with it.
//!
//! The library has no rendering or input code. Front-ends drive a
//! `game::Game` and read its state back. Two terminal front-ends ship as
//! binaries:
//! - `human_player`: interactive play in the terminal.
//! - `selfplay`: plays batches of seeded games with a greedy policy and
//!   reports average scores per difficulty.
//!
//! ## Modules
//! - `tiles`: difficulty tiers and the random `TileSource` feeding the queue.
//! - `board`: the grid (`Board`), placement resolution and `can_merge`.
//! - `history`: bounded undo stack of `Snapshot`s.
//! - `hints`: empty cells where the active tile could resolve.
//! - `progress`: score, level, trash uses, best score, game-over detection.
//! - `game`: the `Game` controller tying the above together.
//! - `strategy`: a greedy move chooser used by `selfplay`.
//! - `persistence`: `BestScoreStore` and its memory and JSON-file backends.
//! - `config`: TOML-loadable `GameConfig`.
//! - `error`: error types for config, storage and grid parsing.
//! - `utils`: text grid parsing for tests and tools.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod hints;
pub mod history;
pub mod persistence;
pub mod progress;
pub mod strategy;
pub mod tiles;
pub mod utils;
