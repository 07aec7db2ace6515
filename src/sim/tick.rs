//! Per-frame simulation tick
//!
//! One handler per phase. Each handler runs that phase's per-tick behaviour
//! and returns the phase for the next tick; `tick` applies the change and
//! its entry actions.

use glam::Vec2;

use super::aabb::Aabb;
use super::collider::{reflect_velocity, sweep};
use super::maze::MazeGenerator;
use super::state::{Bullet, GameEvent, GamePhase, GameSession, Goal};
use crate::Rgba;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Movement direction; normalized before use, zero = stand still
    pub axis: Vec2,
    /// Pause toggle (just pressed)
    pub pause: bool,
    /// Restart/confirm (just pressed)
    pub confirm: bool,
}

/// Advance the session by one tick
pub fn tick<G: MazeGenerator>(session: &mut GameSession<G>, input: &TickInput) {
    session.events.clear();
    session.time_ticks += 1;

    let next = match session.phase {
        GamePhase::Playing => playing(session, input),
        GamePhase::Dying => dying(session),
        GamePhase::NextLevel => next_level(session),
        GamePhase::Wait => wait(session),
        GamePhase::Paused => paused(session, input),
        GamePhase::GameOver => game_over(session, input),
    };

    if next != session.phase {
        session.enter(next);
    }
}

fn playing<G: MazeGenerator>(session: &mut GameSession<G>, input: &TickInput) -> GamePhase {
    if input.pause {
        session.events.push(GameEvent::Paused);
        return GamePhase::Paused;
    }

    let mut next = GamePhase::Playing;

    // Player: walls are lethal
    let vel = input.axis.normalize_or_zero() * session.player_speed;
    let collision = sweep(&session.maze.grid, &session.player().aabb, vel);
    let player = session.player_mut();
    player.vel = vel;
    player.aabb.pos += collision.delta;
    let player_box: Aabb = player.aabb;
    if collision.hit() {
        session.events.push(GameEvent::PlayerHitWall);
        next = GamePhase::Dying;
    }

    // Bullets bounce off walls using the first hit normal
    let mut shot = false;
    for (_, Bullet(bullet)) in session.world.iter_mut::<Bullet>() {
        let collision = sweep(&session.maze.grid, &bullet.aabb, bullet.vel);
        if let Some(normal) = collision.first_normal() {
            bullet.vel = reflect_velocity(bullet.vel, normal);
        }
        bullet.aabb.pos += collision.delta;
        shot |= bullet.aabb.overlaps(&player_box);
    }
    if shot {
        session.events.push(GameEvent::PlayerHitBullet);
        next = GamePhase::Dying;
    }

    // Reaching the goal wins over a death on the same tick
    let reached = session
        .world
        .iter::<Goal>()
        .any(|(_, Goal(goal))| goal.overlaps(&player_box));
    if reached {
        session.events.push(GameEvent::GoalReached {
            level: session.level,
        });
        session.level += 1;
        next = if session.is_final_level() {
            GamePhase::GameOver
        } else {
            GamePhase::NextLevel
        };
    }

    next
}

fn dying<G: MazeGenerator>(session: &mut GameSession<G>) -> GamePhase {
    let flash = if (session.phase_ticks / session.tuning.flash_period.max(1)) % 2 == 0 {
        Rgba::RED
    } else {
        Rgba::WHITE
    };
    session.palette.player = flash;
    session.palette.bullet = flash;

    session.phase_ticks += 1;
    if session.phase_ticks >= session.tuning.death_ticks {
        session.respawn();
        return GamePhase::Playing;
    }
    GamePhase::Dying
}

fn next_level<G: MazeGenerator>(session: &mut GameSession<G>) -> GamePhase {
    if session.is_final_level() {
        return GamePhase::GameOver;
    }

    if session.phase_ticks == 0 {
        session.begin_level();
    }

    if session.phase_ticks > session.tuning.level_intro_ticks {
        return GamePhase::Wait;
    }
    session.phase_ticks += 1;
    GamePhase::NextLevel
}

fn wait<G: MazeGenerator>(session: &mut GameSession<G>) -> GamePhase {
    let per_count = session.tuning.ticks_per_count.max(1);
    session.countdown = session
        .tuning
        .countdown_start()
        .saturating_sub(session.phase_ticks / per_count);

    session.phase_ticks += 1;
    if session.phase_ticks > session.tuning.countdown_ticks {
        session.countdown = 0;
        return GamePhase::Playing;
    }
    GamePhase::Wait
}

fn paused<G: MazeGenerator>(session: &mut GameSession<G>, input: &TickInput) -> GamePhase {
    if input.pause {
        session.events.push(GameEvent::Resumed);
        return GamePhase::Playing;
    }
    GamePhase::Paused
}

fn game_over<G: MazeGenerator>(session: &mut GameSession<G>, input: &TickInput) -> GamePhase {
    if input.confirm {
        session.restart();
        return GamePhase::NextLevel;
    }
    GamePhase::GameOver
}
