//! Frame snapshot for the presentation layer
//!
//! Renderers read a `Frame` and never touch the session directly. Taking the
//! snapshot happens after the tick, so drawing never overlaps mutation.

use serde::{Deserialize, Serialize};

use crate::Rgba;
use crate::sim::{Aabb, Bullet, GamePhase, GameSession, Goal, MazeGenerator, Player};

/// What a sprite represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Bullet,
    Goal,
}

/// One entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub aabb: Aabb,
    pub color: Rgba,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub level: u32,
    pub deaths: u32,
    /// Countdown digit, 0 when hidden
    pub countdown: u32,
    /// Goal first, then bullets, then the player on top
    pub sprites: Vec<Sprite>,
}

impl Frame {
    pub fn capture<G: MazeGenerator>(session: &GameSession<G>) -> Self {
        let palette = session.palette;
        let goals = session.world.iter::<Goal>().map(|(_, Goal(aabb))| Sprite {
            kind: SpriteKind::Goal,
            aabb: *aabb,
            color: palette.goal,
        });
        let bullets = session.world.iter::<Bullet>().map(|(_, Bullet(b))| Sprite {
            kind: SpriteKind::Bullet,
            aabb: b.aabb,
            color: palette.bullet,
        });
        let players = session.world.iter::<Player>().map(|(_, Player(p))| Sprite {
            kind: SpriteKind::Player,
            aabb: p.aabb,
            color: palette.player,
        });

        Self {
            phase: session.phase,
            level: session.level,
            deaths: session.deaths,
            countdown: session.countdown,
            sprites: goals.chain(bullets).chain(players).collect(),
        }
    }

    /// Whether the maze and sprites should be drawn this frame
    pub fn shows_board(&self) -> bool {
        !matches!(self.phase, GamePhase::NextLevel | GamePhase::GameOver)
    }

    /// HUD text for the current phase
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::NextLevel => Some(format!("LEVEL {}", self.level)),
            GamePhase::Wait if self.countdown > 0 => Some(self.countdown.to_string()),
            GamePhase::Paused => Some("PAUSED".to_string()),
            GamePhase::GameOver => Some(format!(
                "GAME OVER\nDeaths {}\nPress Space to restart",
                self.deaths
            )),
            _ => None,
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
