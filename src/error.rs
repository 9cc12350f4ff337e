use std::path::PathBuf;

use crate::game::LINE_LENGTH;

/// A board was requested with a side too short to hold a line of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("board must be at least {min}x{min}, got {width}x{height}", min = LINE_LENGTH)]
pub struct InvalidDimension {
    pub width: usize,
    pub height: usize,
}

/// Reasons a drop is refused. The game is untouched when any of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameAlreadyOver,
}

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

    #[error("invalid board: {0}")]
    Dimension(#[from] InvalidDimension),
}
