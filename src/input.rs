//! Input sampling
//!
//! Hosts report raw key state through [`InputSource`]; the simulation only
//! ever sees the derived [`TickInput`].

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Confirm,
}

/// Instantaneous key queries for the current frame
pub trait InputSource {
    /// Key is held down
    fn is_pressed(&self, key: Key) -> bool;
    /// Key went down this frame
    fn is_just_pressed(&self, key: Key) -> bool;
}

impl TickInput {
    /// Derive this tick's commands from a key source
    pub fn sample(source: &impl InputSource) -> Self {
        let mut axis = Vec2::ZERO;
        if source.is_pressed(Key::Up) {
            axis.y -= 1.0;
        }
        if source.is_pressed(Key::Down) {
            axis.y += 1.0;
        }
        if source.is_pressed(Key::Left) {
            axis.x -= 1.0;
        }
        if source.is_pressed(Key::Right) {
            axis.x += 1.0;
        }

        Self {
            axis: axis.normalize_or_zero(),
            pause: source.is_just_pressed(Key::Pause),
            confirm: source.is_just_pressed(Key::Confirm),
        }
    }
}

/// Key state tracked across frames
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<Key>,
    previous: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Call once per frame after the tick has sampled input
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.down);
    }
}

impl InputSource for KeyState {
    fn is_pressed(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_just_pressed(&self, key: Key) -> bool {
        self.down.contains(&key) && !self.previous.contains(&key)
    }
}
