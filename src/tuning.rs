//! Gameplay tuning
//!
//! Every balance number the simulation reads lives here so a run can be
//! re-tuned from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Lives at session start
    pub lives: u8,

    // === Player ===
    /// Horizontal rocket speed (pixels per tick)
    pub rocket_speed: f32,
    /// Minimum time between standard shots
    pub shot_cooldown_ms: u64,
    /// Standard shots allowed in flight at once
    pub max_player_shots: usize,
    /// Standard shot vertical speed (pixels per tick, upward)
    pub shot_speed: f32,
    /// Special attack cooldown
    pub special_cooldown_ms: u64,
    /// Special shot vertical speed (pixels per tick)
    pub special_speed: f32,
    /// Special shot growth per tick in both dimensions
    pub special_growth: f32,

    // === Enemy formation ===
    pub alien_rows: u32,
    pub alien_cols: u32,
    /// Horizontal step per formation move
    pub alien_step: f32,
    /// Vertical drop when the formation reverses
    pub alien_drop: f32,
    /// Delay between formation moves for a full grid
    pub alien_move_delay_ms: u64,
    /// Fastest the formation can move
    pub alien_move_delay_floor_ms: u64,
    /// Delay shaved off per destroyed enemy
    pub alien_speedup_per_kill_ms: u64,
    /// Time between bomb drops
    pub bomb_interval_ms: u64,
    /// Bomb vertical speed (pixels per tick, downward)
    pub bomb_speed: f32,

    // === Shields ===
    pub shield_count: u32,
    pub shield_health: i32,

    // === Bonus flyer ===
    pub flyer_speed: f32,
    pub flyer_interval_min_ms: u64,
    pub flyer_interval_max_ms: u64,

    // === Boss ===
    pub boss_health: i32,
    pub boss_speed: f32,
    pub boss_shot_cooldown_ms: u64,
    pub armor_health: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: 3,

            rocket_speed: 6.0,
            shot_cooldown_ms: 200,
            max_player_shots: 3,
            shot_speed: 10.0,
            special_cooldown_ms: 10_000,
            special_speed: 8.0,
            special_growth: 2.0,

            alien_rows: 3,
            alien_cols: 5,
            alien_step: 20.0,
            alien_drop: 24.0,
            alien_move_delay_ms: 600,
            alien_move_delay_floor_ms: 80,
            alien_speedup_per_kill_ms: 50,
            bomb_interval_ms: 1200,
            bomb_speed: 5.0,

            shield_count: 4,
            shield_health: 12,

            flyer_speed: 5.0,
            flyer_interval_min_ms: 15_000,
            flyer_interval_max_ms: 25_000,

            boss_health: 5,
            boss_speed: 3.0,
            boss_shot_cooldown_ms: 5000,
            armor_health: 2,
        }
    }
}

impl Tuning {
    /// Total enemies in a fresh grid
    pub fn grid_size(&self) -> usize {
        (self.alien_rows * self.alien_cols) as usize
    }

    /// Formation move delay for the given number of survivors
    pub fn alien_move_delay_for(&self, survivors: usize) -> u64 {
        let killed = self.grid_size().saturating_sub(survivors) as u64;
        self.alien_move_delay_ms
            .saturating_sub(self.alien_speedup_per_kill_ms * killed)
            .max(self.alien_move_delay_floor_ms)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lives == 0 {
            return Err(TuningError::Invalid("lives must be at least 1".into()));
        }
        if self.alien_rows == 0 || self.alien_cols == 0 {
            return Err(TuningError::Invalid("enemy grid must be non-empty".into()));
        }
        if self.alien_move_delay_floor_ms > self.alien_move_delay_ms {
            return Err(TuningError::Invalid(format!(
                "move delay floor {}ms exceeds initial delay {}ms",
                self.alien_move_delay_floor_ms, self.alien_move_delay_ms
            )));
        }
        if self.flyer_interval_min_ms > self.flyer_interval_max_ms {
            return Err(TuningError::Invalid(
                "flyer interval min exceeds max".into(),
            ));
        }
        if self.boss_health <= 0 || self.armor_health <= 0 || self.shield_health <= 0 {
            return Err(TuningError::Invalid("health values must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
