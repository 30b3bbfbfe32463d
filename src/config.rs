// src/config.rs
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{GameError, Result};

/// Tuning constants for the simulation. Every field has a default, so a
/// rules file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Edge length of one tile in world units.
    pub tile_size: f64,
    /// Tile value meaning "already dug out".
    pub empty_tile: u16,

    /// Ticks a single dig action lasts.
    pub dig_duration: u32,
    /// The tile is carved once the remaining dig time drops below this.
    pub carve_threshold: u32,

    pub ticks_per_second: u32,
    pub level_seconds: u32,
    /// Seconds before the end of the level during which the countdown cue plays.
    pub warning_seconds: u32,
    /// Gold needed to clear a level.
    pub gold_threshold: i32,

    pub item_cooldown: i32,
    pub item_scatter: f64,
    pub item_friction: f64,
    pub item_bounce: f64,
    pub item_size: f64,

    pub player_size: f64,
    pub player_speed: f64,
    pub player_friction: f64,
    pub player_bounce: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            empty_tile: 1,
            dig_duration: 56,
            carve_threshold: 14,
            ticks_per_second: 60,
            level_seconds: 60,
            warning_seconds: 5,
            gold_threshold: 50,
            item_cooldown: 30,
            item_scatter: 5.0,
            item_friction: 0.05,
            item_bounce: 1.0,
            item_size: 8.0,
            player_size: 24.0,
            player_speed: 1.0,
            player_friction: 0.2,
            player_bounce: 1.0,
        }
    }
}

impl RulesConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tile_size <= 0.0 {
            return Err(GameError::Config("tile_size must be positive".into()));
        }
        if self.ticks_per_second == 0 {
            return Err(GameError::Config("ticks_per_second must be positive".into()));
        }
        if self.dig_duration == 0 {
            return Err(GameError::Config("dig_duration must be positive".into()));
        }
        if self.carve_threshold == 0 || self.carve_threshold > self.dig_duration {
            return Err(GameError::Config(
                "carve_threshold must lie in [1, dig_duration]".into(),
            ));
        }
        if self.level_seconds.checked_mul(self.ticks_per_second).is_none() {
            return Err(GameError::Config("level_seconds is too long".into()));
        }
        for (name, friction) in [
            ("item_friction", self.item_friction),
            ("player_friction", self.player_friction),
        ] {
            if !(0.0..=1.0).contains(&friction) {
                return Err(GameError::Config(format!("{name} must lie in [0, 1]")));
            }
        }
        Ok(())
    }

    /// Length of a level in ticks.
    pub fn level_ticks(&self) -> u32 {
        self.level_seconds.saturating_mul(self.ticks_per_second)
    }
}
