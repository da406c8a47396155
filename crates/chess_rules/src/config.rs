//! Session configuration, loaded from TOML.
//!
//! ```toml
//! start_fen = "8/8/8/4k3/8/8/4P3/4K3 w - - 0 1"
//!
//! [draw]
//! fifty_move_halfmoves = 100
//! repetition_limit = 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::ConfigError;
use crate::outcome::DrawRules;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting position; the standard setup when absent.
    pub start_fen: Option<String>,
    pub draw: DrawRules,
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.draw.validate()?;
        self.start_position()?;
        Ok(())
    }

    pub fn start_position(&self) -> Result<Position, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Position::from_fen(fen)?),
            None => Ok(Position::startpos()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
