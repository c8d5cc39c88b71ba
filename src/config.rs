//! Game configuration, loaded from TOML.
//!
//! Every section is optional; missing values fall back to a 400x600
//! canvas with a 1 s alien tick and a 50 ms missile tick.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value that parses but cannot be played with
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub timing: TimingConfig,
    pub aliens: AlienConfig,
    pub missiles: MissileConfig,
    pub turret: TurretConfig,
    pub speed: SpeedDial,
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 400,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub alien_interval_ms: u64,
    pub missile_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            alien_interval_ms: 1000,
            missile_interval_ms: 50,
        }
    }
}

impl TimingConfig {
    pub fn alien_interval(&self) -> Duration {
        Duration::from_millis(self.alien_interval_ms)
    }

    pub fn missile_interval(&self) -> Duration {
        Duration::from_millis(self.missile_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    pub max_population: u32,
    /// Sizes are multiples of `size_step`: `size_step * 1 ..= size_step * size_steps`.
    pub size_step: i32,
    pub size_steps: i32,
    pub spawn_max_attempts: u32,
    pub variants: usize,
}

impl Default for AlienConfig {
    fn default() -> Self {
        AlienConfig {
            max_population: 10,
            size_step: 10,
            size_steps: 10,
            spawn_max_attempts: 10,
            variants: 10,
        }
    }
}

impl AlienConfig {
    pub fn max_size(&self) -> i32 {
        self.size_step * self.size_steps
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    /// Added to y every missile tick; negative means upwards.
    pub speed: i32,
    pub size: i32,
    /// Space left between the turret's top edge and a fresh missile.
    pub launch_gap: i32,
}

impl Default for MissileConfig {
    fn default() -> Self {
        MissileConfig {
            speed: -10,
            size: 10,
            launch_gap: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub size: i32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        TurretConfig { size: 30 }
    }
}

/// Alien descent per tick, picked on a discrete dial before the game starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedDial {
    pub initial: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for SpeedDial {
    fn default() -> Self {
        SpeedDial {
            initial: 10,
            min: 10,
            max: 100,
            step: 10,
        }
    }
}

impl SpeedDial {
    /// Snap `value` down onto the dial's notches, inside `[min, max]`.
    pub fn snap(&self, value: u32) -> u32 {
        let clamped = value.clamp(self.min, self.max);
        let step = self.step.max(1);
        self.min + (clamped - self.min) / step * step
    }
}

/// Scene units covered by one terminal cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_width: i32,
    pub cell_height: i32,
    pub frame_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            cell_width: 10,
            cell_height: 20,
            frame_ms: 16,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.canvas.width < 1 || self.canvas.height < 1 {
            return Err(invalid("canvas", "width and height must be positive"));
        }
        if self.timing.alien_interval_ms == 0 || self.timing.missile_interval_ms == 0 {
            return Err(invalid("timing", "intervals must be at least 1 ms"));
        }
        if self.aliens.size_step < 1 || self.aliens.size_steps < 1 {
            return Err(invalid("aliens.size_step", "alien sizes must be positive"));
        }
        if self.aliens.max_size() > self.canvas.width {
            return Err(invalid(
                "aliens.size_steps",
                format!(
                    "largest alien ({}) is wider than the canvas ({})",
                    self.aliens.max_size(),
                    self.canvas.width
                ),
            ));
        }
        if self.aliens.variants == 0 {
            return Err(invalid("aliens.variants", "need at least one variant"));
        }
        if self.missiles.speed >= 0 {
            return Err(invalid("missiles.speed", "missiles must travel upwards"));
        }
        if self.missiles.size < 1 || self.turret.size < 1 {
            return Err(invalid("size", "sprites must be at least one unit"));
        }
        if self.speed.min > self.speed.max || self.speed.step == 0 {
            return Err(invalid("speed", "dial needs min <= max and a non-zero step"));
        }
        if !(self.speed.min..=self.speed.max).contains(&self.speed.initial) {
            return Err(invalid("speed.initial", "must lie inside the dial range"));
        }
        if self.display.cell_width < 1 || self.display.cell_height < 1 {
            return Err(invalid("display", "cells must be at least one unit"));
        }
        Ok(())
    }
}
