use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;

use crate::error::{ConfigError, InvalidDimension};
use crate::game::{GameEngine, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH, LINE_LENGTH};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

/// Display attributes for one player. The engine never sees these.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Any color name or `#rrggbb` value the terminal backend understands
    pub color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            players: vec![
                PlayerConfig {
                    name: "Player 1".into(),
                    color: "red".into(),
                },
                PlayerConfig {
                    name: "Player 2".into(),
                    color: "yellow".into(),
                },
            ],
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl PlayerConfig {
    /// Terminal color for this player; falls back to white if unparseable.
    pub fn color(&self) -> Color {
        Color::from_str(&self.color).unwrap_or(Color::White)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width < LINE_LENGTH || self.board.height < LINE_LENGTH {
            return Err(InvalidDimension {
                width: self.board.width,
                height: self.board.height,
            }
            .into());
        }

        if self.players.len() != 2 {
            return Err(ConfigError::Validation(format!(
                "exactly 2 players required, got {}",
                self.players.len()
            )));
        }
        for (i, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "players[{i}].name must not be empty"
                )));
            }
            if Color::from_str(&player.color).is_err() {
                return Err(ConfigError::Validation(format!(
                    "players[{i}].color '{}' is not a known color",
                    player.color
                )));
            }
        }
        if self.players[0].name == self.players[1].name {
            return Err(ConfigError::Validation(
                "players must have distinct names".into(),
            ));
        }

        Ok(())
    }

    /// Start a fresh game on the configured board.
    pub fn new_game(&self) -> Result<GameEngine, InvalidDimension> {
        GameEngine::new(self.board.width, self.board.height)
    }

    /// Display attributes for `player`.
    ///
    /// Callers are expected to have run [`AppConfig::validate`], which
    /// guarantees both entries exist.
    pub fn player(&self, player: Player) -> &PlayerConfig {
        &self.players[player.index()]
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
