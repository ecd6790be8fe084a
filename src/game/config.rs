use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the board edge behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Leaving the board is a wall hit
    Bounded,
    /// The board wraps around at every edge
    Unbounded,
}

/// Starting speed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreset {
    Easy,
    Hard,
}

impl DifficultyPreset {
    /// Base speed in cells per second
    pub fn base_speed(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 15.0,
            DifficultyPreset::Hard => 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Empty,
    Obstacles,
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    pub mode: GameMode,
    pub difficulty: DifficultyPreset,
    pub map: MapType,
    /// Map file for `MapType::Obstacles`; cells are placed randomly when absent
    pub map_file: Option<PathBuf>,
    /// Number of randomly placed obstacles when no map file is given
    pub obstacle_count: usize,

    /// Logic ticks per second
    pub logic_hz: f32,
    /// Length of every food effect window, in seconds
    pub effect_duration: f32,
    /// Added to the speed while a SpeedUp window is open
    pub speed_up_delta: f32,
    /// Multiplies the speed while a SlowDown window is open
    pub slow_down_factor: f32,
    /// Points needed per difficulty level
    pub points_per_level: u32,
    /// Base speed gained whenever the score lands on a level boundary
    pub level_speed_bonus: f32,

    pub input_queue_capacity: usize,
    pub leaderboard_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 24,
            initial_snake_length: 2,
            mode: GameMode::Bounded,
            difficulty: DifficultyPreset::Easy,
            map: MapType::Empty,
            map_file: None,
            obstacle_count: 20,
            logic_hz: 20.0,
            effect_duration: 10.0,
            speed_up_delta: 5.0,
            slow_down_factor: 0.8,
            points_per_level: 5,
            level_speed_bonus: 0.5,
            input_queue_capacity: 3,
            leaderboard_capacity: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Seconds between two logic ticks
    pub fn logic_period(&self) -> f32 {
        1.0 / self.logic_hz
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.grid_width < 5 || self.grid_height < 5 {
            bail!(
                "grid must be at least 5x5, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }

        if self.initial_snake_length < 2 || self.initial_snake_length > self.grid_height / 2 {
            bail!(
                "initial_snake_length must be in [2, {}], got {}",
                self.grid_height / 2,
                self.initial_snake_length
            );
        }

        if self.logic_hz <= 0.0 {
            bail!("logic_hz must be positive, got {}", self.logic_hz);
        }

        if self.effect_duration <= 0.0 {
            bail!(
                "effect_duration must be positive, got {}",
                self.effect_duration
            );
        }

        if self.slow_down_factor <= 0.0 {
            bail!(
                "slow_down_factor must be positive, got {}",
                self.slow_down_factor
            );
        }

        if self.points_per_level == 0 {
            bail!("points_per_level must be at least 1");
        }

        if self.input_queue_capacity == 0 {
            bail!("input_queue_capacity must be at least 1");
        }

        if self.leaderboard_capacity == 0 {
            bail!("leaderboard_capacity must be at least 1");
        }

        Ok(())
    }
}
