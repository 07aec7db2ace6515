//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock timers
//! - Seeded RNG only (level index is the seed)
//! - Stable iteration order (insertion order in the entity store)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collider;
pub mod grid;
pub mod maze;
pub mod state;
pub mod tick;
pub mod world;

pub use aabb::Aabb;
pub use collider::{Collision, TileHit, reflect_velocity, sweep};
pub use grid::Grid;
pub use maze::{Backtracker, Maze, MazeGenerator, MazeLayout};
pub use state::{Body, Bullet, GameEvent, GamePhase, GameSession, Goal, Player};
pub use tick::{TickInput, tick};
pub use world::{Archetype, EntityId, EntityStore};
