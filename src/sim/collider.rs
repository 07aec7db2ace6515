//! Swept AABB movement against the tile grid
//!
//! Motion is resolved one axis at a time (X, then Y using the X-resolved
//! box), which lets boxes slide along walls. For each axis the displacement
//! is clamped to the largest value that keeps the box out of every blocked
//! tile it could enter this tick.

use glam::{IVec2, Vec2};

use super::aabb::Aabb;
use super::grid::Grid;

/// Distances below this are treated as touching, not overlapping.
/// Keeps boxes resting flush against a wall from tunneling through it
/// after float rounding.
///
/// The cross axis is shrunk by the same amount, so a box already inside a
/// wall row by less than `SKIN` may keep sliding along it. Containment holds
/// up to this tolerance; a strict [`Aabb::overlaps`] can still report it.
const SKIN: f32 = 1e-3;

/// A blocked tile touched during a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    /// Tile coordinates in the grid
    pub tile: IVec2,
    /// Axis-aligned unit normal opposing the motion on the blocked axis
    pub normal: Vec2,
}

/// Result of a sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collision {
    /// Displacement that is safe to apply this tick
    pub delta: Vec2,
    /// Every tile that clamped the motion, X hits first
    pub hits: Vec<TileHit>,
}

impl Collision {
    /// Whether any axis was clamped
    #[inline]
    pub fn hit(&self) -> bool {
        !self.hits.is_empty()
    }

    /// Normal of the first tile hit
    pub fn first_normal(&self) -> Option<Vec2> {
        self.hits.first().map(|h| h.normal)
    }
}

/// Sweep `aabb` by `vel` (already per-tick) through `grid`.
///
/// Does not move the box; the caller applies `Collision::delta`.
/// Tiles outside the grid are open.
pub fn sweep(grid: &Grid, aabb: &Aabb, vel: Vec2) -> Collision {
    let mut hits = Vec::new();
    let dx = sweep_axis(grid, aabb, vel.x, 0, &mut hits);
    let moved = aabb.translated(Vec2::new(dx, 0.0));
    let dy = sweep_axis(grid, &moved, vel.y, 1, &mut hits);
    Collision {
        delta: Vec2::new(dx, dy),
        hits,
    }
}

/// Clamp motion `d` along `axis` (0 = x, 1 = y)
fn sweep_axis(grid: &Grid, aabb: &Aabb, d: f32, axis: usize, hits: &mut Vec<TileHit>) -> f32 {
    if d == 0.0 || !d.is_finite() {
        return 0.0;
    }

    let ts = grid.tile_len();
    let cross = 1 - axis;
    let (min, max) = (aabb.min(), aabb.max());
    let (lane_count, cross_count) = if axis == 0 {
        (grid.width as i32, grid.height as i32)
    } else {
        (grid.height as i32, grid.width as i32)
    };

    // Tiles the box overlaps on the cross axis, clipped to the grid
    let lo = tile_coord(((min[cross] + SKIN) / ts).floor(), cross_count);
    let hi = tile_coord(((max[cross] - SKIN) / ts).ceil(), cross_count) - 1;
    if hi < lo {
        return d;
    }

    let tile_at = |lane: i32, c: i32| {
        if axis == 0 {
            IVec2::new(lane, c)
        } else {
            IVec2::new(c, lane)
        }
    };
    let mut normal = Vec2::ZERO;
    normal[axis] = -d.signum();

    let mut blocked_lane = |lane: i32| -> bool {
        let before = hits.len();
        for c in lo..=hi {
            let tile = tile_at(lane, c);
            if grid.is_blocked(tile) {
                hits.push(TileHit { tile, normal });
            }
        }
        hits.len() > before
    };

    if d > 0.0 {
        let edge = max[axis];
        let first = tile_coord(((edge - SKIN) / ts).ceil(), lane_count);
        let last = tile_coord(((edge + d) / ts).ceil(), lane_count) - 1;
        for lane in first..=last {
            if blocked_lane(lane) {
                return (lane as f32 * ts - edge).clamp(0.0, d);
            }
        }
    } else {
        let edge = min[axis];
        let first = tile_coord(((edge + SKIN) / ts).floor(), lane_count) - 1;
        let last = tile_coord(((edge + d) / ts).floor(), lane_count);
        for lane in (last..=first).rev() {
            if blocked_lane(lane) {
                return ((lane + 1) as f32 * ts - edge).clamp(d, 0.0);
            }
        }
    }

    d
}

/// Rounded tile coordinate clamped to `0..=count` in float space, so boxes
/// far outside the grid never overflow the integer lane math
#[inline]
fn tile_coord(t: f32, count: i32) -> i32 {
    t.clamp(0.0, count as f32) as i32
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
