use std::path::{Path, PathBuf};

use log::warn;

use crate::error::ConfigError;
use crate::history::DEFAULT_MAX_UNDO;
use crate::progress::{DEFAULT_POINTS_PER_LEVEL, DEFAULT_STARTING_TRASH_USES};
use crate::tiles::Difficulty;

/// Game configuration, loadable from TOML.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tier used at game start and after a restart.
    pub difficulty: Difficulty,
    /// How many actions can be undone.
    pub max_undo: usize,
    pub starting_trash_uses: u32,
    /// Score needed per level.
    pub points_per_level: u32,
    pub hints_enabled: bool,
    /// Seed for tile generation. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// JSON file holding the best score. `None` keeps it in memory.
    pub best_score_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            difficulty: Difficulty::default(),
            max_undo: DEFAULT_MAX_UNDO,
            starting_trash_uses: DEFAULT_STARTING_TRASH_USES,
            points_per_level: DEFAULT_POINTS_PER_LEVEL,
            hints_enabled: true,
            seed: None,
            best_score_path: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_undo == 0 {
            return Err(ConfigError::Validation("max_undo must be >= 1".into()));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::Validation(
                "points_per_level must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
