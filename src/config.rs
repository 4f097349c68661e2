use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::Position;

pub const CONFIG_PATH: &str = "snake_config.json";

/// Numbers that drive power-up spawning and their effect on speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    /// How long a picked-up effect lasts, in seconds
    pub duration_secs: f64,
    /// Chance of a power-up appearing each time food is eaten
    pub spawn_chance: f64,
    pub speed_boost: u32,
    pub slow_penalty: u32,
    /// Speed never drops below this
    pub min_speed: u32,
    /// Speed never rises above this
    pub max_speed: u32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            duration_secs: 5.0,
            spawn_chance: 0.2,
            speed_boost: 5,
            slow_penalty: 3,
            min_speed: 5,
            max_speed: 30,
        }
    }
}

/// Game configuration, optionally read from `snake_config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub cols: i32,
    /// Board height in cells
    pub rows: i32,
    /// Pixel size of one cell (renderer only)
    pub cell_size: i32,
    /// Where a fresh snake starts
    pub start: Position,
    /// Ticks per second at the start of a round
    pub base_speed: u32,
    pub high_score_path: PathBuf,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    pub power_up: PowerUpTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 30,
            cell_size: 20,
            start: Position::new(5, 2),
            base_speed: 10,
            high_score_path: PathBuf::from("high_score.json"),
            log_level: "info".to_string(),
            seed: None,
            power_up: PowerUpTuning::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Small deterministic board for tests
    pub fn small() -> Self {
        Self {
            seed: Some(7),
            ..Self::new(10, 10)
        }
    }

    /// Read a config file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config.validate())
    }

    /// Like [`GameConfig::load`], but a missing or broken file just means
    /// defaults. The error of a broken file is handed back so the caller can
    /// report it once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Pull out-of-range values back into something playable.
    pub fn validate(mut self) -> Self {
        self.cols = self.cols.max(2);
        self.rows = self.rows.max(2);
        self.cell_size = self.cell_size.max(1);
        self.start = Position::new(
            self.start.x.clamp(0, self.cols - 1),
            self.start.y.clamp(0, self.rows - 1),
        );

        let t = &mut self.power_up;
        t.min_speed = t.min_speed.max(1);
        t.max_speed = t.max_speed.max(t.min_speed);
        if !t.spawn_chance.is_finite() {
            t.spawn_chance = 0.0;
        }
        t.spawn_chance = t.spawn_chance.clamp(0.0, 1.0);
        if !t.duration_secs.is_finite() || t.duration_secs < 0.0 {
            t.duration_secs = 0.0;
        }
        self.base_speed = self.base_speed.clamp(t.min_speed, t.max_speed);
        self
    }

    pub fn board_pixels(&self) -> (i32, i32) {
        (self.cols * self.cell_size, self.rows * self.cell_size)
    }
}
