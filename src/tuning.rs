//! Data-driven game balance
//!
//! Every number the simulation uses lives here, with defaults matching the
//! shipped game. A tuning file is JSON; missing fields fall back to the
//! defaults, so a file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::MazeLayout;

/// Largest maze side, in cells
const MAX_MAZE_CELLS: u32 = 64;
/// Largest cell or wall span, in tiles
const MAX_SPAN: u32 = 32;
/// Largest tile edge, in world units
const MAX_TILE_SIZE: u32 = 256;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speeds (world units per tick) ===
    pub ball_start_speed: f32,
    pub player_start_speed: f32,
    /// Added to ball speed at every level start
    pub ball_speed_step: f32,
    /// Subtracted from player speed at every level start
    pub player_speed_step: f32,
    pub player_min_speed: f32,

    // === Progression ===
    /// Reaching this level index ends the run
    pub terminal_level: u32,
    /// Extra walls knocked out of each maze
    pub difficulty: u32,
    pub maze: MazeLayout,

    // === Timers (ticks) ===
    pub death_ticks: u32,
    pub flash_period: u32,
    pub level_intro_ticks: u32,
    pub countdown_ticks: u32,
    pub ticks_per_count: u32,

    // === Entity sizes ===
    pub player_half: f32,
    pub bullet_half: f32,
    pub goal_half: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_start_speed: BALL_START_SPEED,
            player_start_speed: PLAYER_START_SPEED,
            ball_speed_step: BALL_SPEED_STEP,
            player_speed_step: PLAYER_SPEED_STEP,
            player_min_speed: PLAYER_MIN_SPEED,

            terminal_level: TERMINAL_LEVEL,
            difficulty: 0,
            maze: MazeLayout::default(),

            death_ticks: DEATH_TICKS,
            flash_period: DEATH_FLASH_PERIOD,
            level_intro_ticks: LEVEL_INTRO_TICKS,
            countdown_ticks: COUNTDOWN_TICKS,
            ticks_per_count: TICKS_PER_SECOND,

            player_half: PLAYER_HALF,
            bullet_half: BULLET_HALF,
            goal_half: GOAL_HALF,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        let m = &self.maze;
        if m.cols == 0 || m.rows == 0 {
            return invalid("maze must have at least one cell");
        }
        if m.cell_span == 0 || m.tile_size == 0 {
            return invalid("cell span and tile size must be positive");
        }
        if m.cols > MAX_MAZE_CELLS || m.rows > MAX_MAZE_CELLS {
            return Err(TuningError::Invalid(format!(
                "maze is limited to {MAX_MAZE_CELLS} cells per side"
            )));
        }
        if m.cell_span > MAX_SPAN || m.wall_span > MAX_SPAN || m.tile_size > MAX_TILE_SIZE {
            return invalid("cell span, wall span or tile size out of range");
        }
        if self.terminal_level < 2 {
            return invalid("terminal level must leave at least one playable level");
        }
        for (name, half) in [
            ("player_half", self.player_half),
            ("bullet_half", self.bullet_half),
            ("goal_half", self.goal_half),
        ] {
            if half.is_nan() || half <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive")));
            }
        }
        // Entities spawn centered in a cell and must start clear of walls
        let cell_half = (m.cell_span * m.tile_size) as f32 * 0.5;
        if self.player_half.max(self.bullet_half).max(self.goal_half) >= cell_half {
            return invalid("entities must fit inside a maze cell");
        }
        if self.ball_start_speed.is_nan()
            || self.ball_start_speed < 0.0
            || self.player_min_speed.is_nan()
            || self.player_min_speed < 0.0
        {
            return invalid("speeds must be non-negative");
        }
        if self.flash_period == 0 || self.ticks_per_count == 0 || self.death_ticks == 0 {
            return invalid("flash period, death ticks and ticks per count must be positive");
        }
        Ok(())
    }

    /// First value shown by the pre-level countdown
    pub fn countdown_start(&self) -> u32 {
        self.countdown_ticks / self.ticks_per_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let t = Tuning::default();
        assert!(t.validate().is_ok());
        assert_eq!(t.terminal_level, 6);
        assert_eq!(t.countdown_start(), 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "ball_start_speed": 1.5, "difficulty": 4 }"#).unwrap();
        assert_eq!(t.ball_start_speed, 1.5);
        assert_eq!(t.difficulty, 4);
        assert_eq!(t.player_start_speed, PLAYER_START_SPEED);
        assert_eq!(t.maze, MazeLayout::default());
    }

    #[test]
    fn test_json_round_trip() {
        let t = Tuning::default();
        let back = Tuning::from_json(&t.to_json().unwrap()).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "terminal_level": 1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "player_half": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "bullet_half": 40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        // Sizes that would overflow the grid math
        let err = Tuning::from_json(r#"{ "maze": { "cell_span": 100000, "tile_size": 100000 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "maze": { "cols": 4000000000, "rows": 4000000000 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "ticks_per_count": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
