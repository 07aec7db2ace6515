//! Maze Dodge - A tile maze arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, entities, game state machine)
//! - `input`: Directional input sampling into per-tick commands
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only frame snapshot for the presentation layer

pub mod input;
pub mod sim;
pub mod tuning;
pub mod view;

pub use input::{InputSource, Key, KeyState};
pub use tuning::{Tuning, TuningError};
pub use view::Frame;

/// Game configuration constants
pub mod consts {
    /// Simulation runs one tick per rendered frame
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Level index that ends the run (5 playable levels)
    pub const TERMINAL_LEVEL: u32 = 6;

    /// Speeds in world units per tick
    pub const BALL_START_SPEED: f32 = 0.7;
    pub const PLAYER_START_SPEED: f32 = 0.7;
    /// Applied once per level start
    pub const BALL_SPEED_STEP: f32 = 0.3;
    pub const PLAYER_SPEED_STEP: f32 = 0.1;
    /// Player speed never drops below this
    pub const PLAYER_MIN_SPEED: f32 = 0.1;

    /// Phase timers (ticks)
    pub const DEATH_TICKS: u32 = 60;
    pub const DEATH_FLASH_PERIOD: u32 = 8;
    pub const LEVEL_INTRO_TICKS: u32 = 120;
    pub const COUNTDOWN_TICKS: u32 = 180;

    /// Maze layout: 9x5 cells, each 8 open tiles wide with 1-tile walls
    pub const MAZE_COLS: u32 = 9;
    pub const MAZE_ROWS: u32 = 5;
    pub const CELL_SPAN: u32 = 8;
    pub const WALL_SPAN: u32 = 1;
    /// Tile edge length in world units (pixels)
    pub const TILE_SIZE: u32 = 9;

    /// Entity half extents
    pub const PLAYER_HALF: f32 = 4.0;
    pub const BULLET_HALF: f32 = 2.0;
    pub const GOAL_HALF: f32 = 4.0;
}

/// RGBA display color handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const WHITE: Rgba = Rgba(255, 255, 255, 255);
    pub const RED: Rgba = Rgba(255, 0, 0, 255);
    pub const PINK: Rgba = Rgba(255, 128, 255, 255);
    pub const GREEN: Rgba = Rgba(0, 255, 0, 255);
}
