/// Session configuration.
///
/// Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::DisplayMode;

/// How score accrues during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    /// One point per tick survived.
    PerTick,
    /// Points only for picking up collectibles.
    #[default]
    Pickup,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world_width: i32,
    pub view_width: i32,
    pub view_height: i32,
    /// Lane of the ground tiles; the player stands one row above.
    pub ground_level: i32,
    pub jump_height: i32,
    pub player_start_x: i32,
    pub lives: u32,
    pub enemy_count: usize,
    pub collectible_count: usize,
    /// Cells per tick for ground and collectibles.
    pub scroll_speed: i32,
    /// Cells per tick for active enemies.  Contact is checked over every
    /// cell an enemy steps across, so speeds above 1 cannot skip the player.
    pub enemy_speed: i32,
    pub scoring: Scoring,
    pub points_per_pickup: u32,
    /// Let the world widen as ground is laid down ahead of the player.
    pub grow_world: bool,
    /// Extra cells behind the camera before a ground tile is recycled.
    pub ground_margin: i32,
    /// Spawn enemies dormant: they drift in with the ground and only start
    /// charging once within a view width of the player.
    pub lurking_enemies: bool,
    /// Ticks of immunity after a hit.  0 disables the window.
    pub invulnerability_ticks: u32,
    /// Host tick rate.
    pub fps: u32,
    pub start_mode: DisplayMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: 100,
            view_width: 20,
            view_height: 4,
            ground_level: 3,
            jump_height: 3,
            player_start_x: 2,
            lives: 3,
            enemy_count: 5,
            collectible_count: 3,
            scroll_speed: 1,
            enemy_speed: 1,
            scoring: Scoring::Pickup,
            points_per_pickup: 10,
            grow_world: false,
            ground_margin: 2,
            lurking_enemies: false,
            invulnerability_ticks: 0,
            fps: 8,
            start_mode: DisplayMode::Plain,
        }
    }
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.view_width < 2 {
            return invalid(format!("view_width must be at least 2, got {}", self.view_width));
        }
        if self.view_width > self.world_width {
            return invalid(format!(
                "view_width ({}) exceeds world_width ({})",
                self.view_width, self.world_width
            ));
        }
        if self.ground_level < 1 || self.ground_level >= self.view_height {
            return invalid(format!(
                "ground_level ({}) must lie inside the view (height {})",
                self.ground_level, self.view_height
            ));
        }
        if self.jump_height < 2 || self.jump_height > self.ground_level {
            return invalid(format!(
                "jump_height ({}) must be between 2 and ground_level ({})",
                self.jump_height, self.ground_level
            ));
        }
        if self.player_start_x < 0 || self.player_start_x >= self.world_width {
            return invalid(format!(
                "player_start_x ({}) is outside the world",
                self.player_start_x
            ));
        }
        if self.lives == 0 {
            return invalid("lives must be at least 1".to_string());
        }
        if self.scroll_speed < 1 || self.enemy_speed < 1 {
            return invalid("speeds must be at least 1".to_string());
        }
        if self.ground_margin < 0 {
            return invalid("ground_margin must not be negative".to_string());
        }
        if self.fps == 0 {
            return invalid("fps must be at least 1".to_string());
        }
        Ok(())
    }
}
