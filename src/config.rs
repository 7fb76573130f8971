//! Session tunables
//!
//! Loaded from JSON so balance can be adjusted without a rebuild. Every field
//! falls back to the gameplay constants in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but describe an unplayable session
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Play field width in pixels
    pub field_width: f32,
    /// Play field height in pixels
    pub field_height: f32,
    /// Ticks between enemy spawns
    pub spawn_interval: u32,
    /// Player movement per tick
    pub player_speed: f32,
    /// Ticks between player shots
    pub shoot_delay: u32,
    /// Ticks between bombs
    pub special_delay: u32,
    /// Invulnerability window after a hit
    pub invulnerable_ticks: u32,
    /// Bomb charge cap (also the refill value after a hit)
    pub max_special_charges: u8,
    /// Lives at session start
    pub starting_lives: u8,
    /// Final damage radius of a bomb
    pub bomb_max_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,
            player_speed: PLAYER_SPEED,
            shoot_delay: SHOOT_DELAY,
            special_delay: SPECIAL_DELAY,
            invulnerable_ticks: INVULNERABLE_TICKS,
            max_special_charges: MAX_SPECIAL_CHARGES,
            starting_lives: PLAYER_START_LIVES,
            bomb_max_radius: BOMB_MAX_RADIUS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Field must fit the player so clamping has a non-empty range
        if !(self.field_width >= PLAYER_SIZE && self.field_height >= PLAYER_SIZE) {
            return Err(ConfigError::Invalid(format!(
                "field {}x{} is smaller than the player",
                self.field_width, self.field_height
            )));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::Invalid("spawn_interval must be > 0".into()));
        }
        if self.max_special_charges == 0 {
            return Err(ConfigError::Invalid(
                "max_special_charges must be > 0".into(),
            ));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be > 0".into()));
        }
        if !(self.player_speed >= 0.0 && self.bomb_max_radius >= 0.0) {
            return Err(ConfigError::Invalid(
                "player_speed and bomb_max_radius must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
