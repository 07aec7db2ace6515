//! Game session state and entity components
//!
//! A `GameSession` owns everything one run needs: the current maze, the
//! entity store, the seeded RNG, phase timers and speed scalars. Nothing is
//! global, so independent sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::maze::{Backtracker, Maze, MazeGenerator};
use super::world::{EntityId, EntityStore};
use crate::Rgba;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Death flash, then respawn
    Dying,
    /// Level banner while the next maze is set up
    NextLevel,
    /// Countdown before play resumes
    Wait,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Box plus per-tick velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub aabb: Aabb,
    pub vel: Vec2,
}

impl Body {
    pub fn new(aabb: Aabb, vel: Vec2) -> Self {
        Self { aabb, vel }
    }
}

/// The player-controlled box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player(pub Body);

/// A projectile bouncing around the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet(pub Body);

/// Level exit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal(pub Aabb);

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerHitWall,
    PlayerHitBullet,
    GoalReached { level: u32 },
    LevelStarted { level: u32 },
    Respawned { deaths: u32 },
    GameOver { deaths: u32 },
    Paused,
    Resumed,
    Restarted,
}

/// Display colors for each entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub player: Rgba,
    pub bullet: Rgba,
    pub goal: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            player: Rgba::WHITE,
            bullet: Rgba::PINK,
            goal: Rgba::GREEN,
        }
    }
}

/// Complete game session (deterministic)
#[derive(Debug, Clone)]
pub struct GameSession<G = Backtracker> {
    /// Balance values
    pub tuning: Tuning,
    /// Produces a fresh maze per level
    pub generator: G,
    /// Current level layout
    pub maze: Maze,
    /// Player, bullets and goal
    pub world: EntityStore,
    /// Bullet direction source, reseeded from the level index
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Current level index (also the maze and RNG seed)
    pub level: u32,
    /// Deaths this run
    pub deaths: u32,
    /// Ticks spent in the current phase
    pub phase_ticks: u32,
    /// Value shown by the pre-level countdown (0 = hidden)
    pub countdown: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bullet speed for newly spawned bullets
    pub ball_speed: f32,
    /// Player movement speed
    pub player_speed: f32,
    /// Current display colors
    pub palette: Palette,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    player: EntityId,
}

impl GameSession<Backtracker> {
    /// New session using the default maze generator.
    ///
    /// `tuning` should already have passed [`Tuning::validate`]; zero timer
    /// periods are treated as one tick rather than rejected here.
    pub fn new(tuning: Tuning) -> Self {
        let generator = Backtracker::new(tuning.maze);
        Self::with_generator(tuning, generator)
    }
}

impl Default for GameSession<Backtracker> {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl<G: MazeGenerator> GameSession<G> {
    /// New session starting at level 1, about to set the level up
    pub fn with_generator(tuning: Tuning, generator: G) -> Self {
        let level = 1;
        let maze = generator.generate(level as u64, tuning.difficulty);
        let mut world = EntityStore::new();
        let start = maze.cell_center(0, 0);
        let player = world.spawn(Player(Body::new(
            Aabb::square(start, tuning.player_half),
            Vec2::ZERO,
        )));

        Self {
            ball_speed: tuning.ball_start_speed,
            player_speed: tuning.player_start_speed,
            tuning,
            generator,
            maze,
            world,
            rng: Pcg32::seed_from_u64(level as u64),
            phase: GamePhase::NextLevel,
            level,
            deaths: 0,
            phase_ticks: 0,
            countdown: 0,
            time_ticks: 0,
            palette: Palette::default(),
            events: Vec::new(),
            player,
        }
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    /// The player body.
    ///
    /// # Panics
    /// If the player entity is gone. Exactly one player exists for the
    /// session's whole lifetime.
    pub fn player(&self) -> &Body {
        &self
            .world
            .get::<Player>(self.player)
            .expect("invariant violated: session has no player entity")
            .0
    }

    pub fn player_mut(&mut self) -> &mut Body {
        &mut self
            .world
            .get_mut::<Player>(self.player)
            .expect("invariant violated: session has no player entity")
            .0
    }

    /// Player spawn point: the first maze cell
    pub fn start_position(&self) -> Vec2 {
        self.maze.cell_center(0, 0)
    }

    /// Goal position: the far corner cell
    pub fn goal_position(&self) -> Vec2 {
        self.maze
            .cell_center(self.maze.cols() - 1, self.maze.rows() - 1)
    }

    /// One bullet per cell except the start cell
    pub fn expected_bullet_count(&self) -> usize {
        (self.maze.cols() * self.maze.rows()).saturating_sub(1) as usize
    }

    pub fn bullet_count(&self) -> usize {
        self.world.len::<Bullet>()
    }

    /// Whether the run has reached the terminal level
    pub fn is_final_level(&self) -> bool {
        self.level >= self.tuning.terminal_level
    }

    /// Switch phase and restart its timer
    pub fn enter(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?} (level {})", self.phase, phase, self.level);
        self.phase = phase;
        self.phase_ticks = 0;
        match phase {
            GamePhase::Wait => self.countdown = self.tuning.countdown_start(),
            GamePhase::GameOver => {
                self.countdown = 0;
                self.events.push(GameEvent::GameOver {
                    deaths: self.deaths,
                });
                log::info!("Game over after {} deaths", self.deaths);
            }
            _ => {}
        }
    }

    pub(crate) fn reseed(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.level as u64);
    }

    pub(crate) fn reset_player(&mut self) {
        let start = self.start_position();
        let player = self.player_mut();
        player.aabb.pos = start;
        player.vel = Vec2::ZERO;
    }

    /// Replace all bullets with one per non-start cell, each heading in a
    /// random direction at the current ball speed
    pub(crate) fn spawn_bullets(&mut self) {
        self.world.clear::<Bullet>();
        let (cols, rows) = (self.maze.cols(), self.maze.rows());
        for i in 0..cols {
            for j in 0..rows {
                if i == 0 && j == 0 {
                    continue;
                }
                let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
                let pos = self.maze.cell_center(i, j);
                self.world.spawn(Bullet(Body::new(
                    Aabb::square(pos, self.tuning.bullet_half),
                    Vec2::from_angle(angle) * self.ball_speed,
                )));
            }
        }
    }

    pub(crate) fn spawn_goal(&mut self) {
        self.world.clear::<Goal>();
        let pos = self.goal_position();
        self.world
            .spawn(Goal(Aabb::square(pos, self.tuning.goal_half)));
    }

    /// Level entry: speed up bullets, slow the player, build a fresh maze
    /// and repopulate it
    pub(crate) fn begin_level(&mut self) {
        self.ball_speed += self.tuning.ball_speed_step;
        self.player_speed =
            (self.player_speed - self.tuning.player_speed_step).max(self.tuning.player_min_speed);
        self.reseed();
        self.maze = self
            .generator
            .generate(self.level as u64, self.tuning.difficulty);
        self.world.clear::<Goal>();
        self.spawn_bullets();
        self.reset_player();
        self.spawn_goal();
        self.events.push(GameEvent::LevelStarted { level: self.level });
        log::info!(
            "Level {} (ball speed {:.1}, player speed {:.1}, {} bullets)",
            self.level,
            self.ball_speed,
            self.player_speed,
            self.bullet_count()
        );
    }

    /// End of the death cycle: count it and put everything back to the
    /// level's starting layout
    pub(crate) fn respawn(&mut self) {
        self.deaths += 1;
        self.reseed();
        self.spawn_bullets();
        self.reset_player();
        self.palette = Palette::default();
        self.events.push(GameEvent::Respawned {
            deaths: self.deaths,
        });
        log::debug!("Respawned (deaths {})", self.deaths);
    }

    /// Start a new run from level 1. Deaths and speeds carry over; speeds
    /// keep stepping from where the last run left them.
    pub(crate) fn restart(&mut self) {
        self.level = 1;
        self.palette = Palette::default();
        self.events.push(GameEvent::Restarted);
        log::info!("Restarting run");
    }
}
