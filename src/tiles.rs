//! Tile generation.
//!
//! - `Difficulty`: the three value tiers tiles are drawn from.
//! - `TileSource`: a seedable random source that draws tile values and keeps
//!   the upcoming-tile queue topped up.
//! - `TileTier`: a coarse colour band for presentation layers.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A tile's face value. Always strictly positive.
pub type TileValue = u32;

/// Number of upcoming tiles kept in the queue.
pub const QUEUE_LEN: usize = 3;

const EASY_VALUES: [TileValue; 8] = [2, 3, 4, 5, 6, 8, 9, 10];
const MEDIUM_VALUES: [TileValue; 12] = [2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 20];
const HARD_VALUES: [TileValue; 15] = [3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 20, 24, 25, 30, 32];

/// Difficulty tier, selecting which values new tiles are drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The set of values tiles may take under this tier.
    ///
    /// # Examples
    /// ```
    /// use just_divide::tiles::Difficulty;
    /// assert!(Difficulty::Easy.values().contains(&2));
    /// assert!(!Difficulty::Hard.values().contains(&2));
    /// ```
    pub fn values(&self) -> &'static [TileValue] {
        match self {
            Difficulty::Easy => &EASY_VALUES,
            Difficulty::Medium => &MEDIUM_VALUES,
            Difficulty::Hard => &HARD_VALUES,
        }
    }

    /// Maps the external identifiers 1, 2 and 3 onto tiers.
    /// Any other number yields `None`.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Draws tile values for the queue.
///
/// Every call picks uniformly and independently from the tier's value set.
/// Seeding the source makes a whole game reproducible.
#[derive(Clone, Debug)]
pub struct TileSource {
    rng: SmallRng,
}

impl TileSource {
    /// Creates a deterministic source from `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        TileSource {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        TileSource {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Returns the next tile value for `difficulty`.
    pub fn next_value(&mut self, difficulty: Difficulty) -> TileValue {
        let values = difficulty.values();
        values[self.rng.gen_range(0..values.len())]
    }

    /// Appends fresh values until `queue` holds `QUEUE_LEN` tiles.
    /// A queue that is already full is left alone.
    pub fn refill_queue(&mut self, queue: &mut VecDeque<TileValue>, difficulty: Difficulty) {
        while queue.len() < QUEUE_LEN {
            queue.push_back(self.next_value(difficulty));
        }
    }
}

/// Colour band used to render a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileTier {
    Blue,
    Orange,
    Pink,
    Purple,
}

impl TileTier {
    /// Classifies a value: up to 8 blue, up to 15 orange, up to 25 pink,
    /// anything larger purple.
    pub fn of(value: TileValue) -> Self {
        match value {
            0..=8 => TileTier::Blue,
            9..=15 => TileTier::Orange,
            16..=25 => TileTier::Pink,
            _ => TileTier::Purple,
        }
    }

    /// ANSI background colour code for terminal output.
    pub(crate) fn to_ansi_color_code(self) -> &'static str {
        match self {
            TileTier::Blue => "44",
            TileTier::Orange => "43",
            TileTier::Pink => "41",
            TileTier::Purple => "45",
        }
    }
}
