use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors raised by a best-score store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access best score file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse best score file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors produced while parsing a text grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    #[error("invalid number of rows: expected at most {expected}, found {found}")]
    TooManyRows { expected: usize, found: usize },

    #[error("row {row} is too long: expected at most {expected} cells, found {found}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell '{token}' in row {row} col {col}")]
    BadCell {
        token: String,
        row: usize,
        col: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("max_undo must be >= 1".to_string());
        assert_eq!(err.to_string(), "config validation error: max_undo must be >= 1");
    }

    #[test]
    fn test_grid_parse_error_display() {
        let err = GridParseError::BadCell {
            token: "x".to_string(),
            row: 1,
            col: 2,
        };
        assert_eq!(err.to_string(), "unrecognized cell 'x' in row 1 col 2");
    }
}
