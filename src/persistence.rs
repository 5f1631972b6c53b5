//! Storage for the best score across games.
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Loads and saves a single best-score value.
pub trait BestScoreStore: fmt::Debug {
    fn load_best_score(&self) -> Result<u32, StoreError>;
    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Keeps the best score in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    /// Creates a store that starts out holding `best`.
    pub fn new(best: u32) -> Self {
        MemoryStore { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u32,
}

/// Keeps the best score in a small JSON file: `{"best_score": 42}`.
///
/// A missing file reads as a best score of 0. Parent directories are
/// created on save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`. Nothing is read or
    /// written until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self) -> Result<u32, StoreError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let file: BestScoreFile = serde_json::from_str(&text).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(file.best_score)
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(&BestScoreFile { best_score: score }).map_err(
            |e| StoreError::Json {
                path: self.path.clone(),
                source: e,
            },
        )?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}
