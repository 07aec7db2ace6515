//! Property tests for tile sweeps and bullet reflection

use glam::{IVec2, Vec2};
use proptest::prelude::*;

use maze_dodge::sim::grid::WALL;
use maze_dodge::sim::{Aabb, Backtracker, Grid, MazeGenerator, reflect_velocity, sweep};

const TILE: u32 = 9;
const SIZE: u32 = 8;
/// Float slack when checking overlap after a clamp
const EPS: f32 = 1e-3;

fn grid_from_mask(mask: &[bool]) -> Grid {
    let mut grid = Grid::open(SIZE, SIZE, TILE);
    for (i, &blocked) in mask.iter().enumerate() {
        if blocked {
            let tile = IVec2::new((i as u32 % SIZE) as i32, (i as u32 / SIZE) as i32);
            grid.set(tile, WALL);
        }
    }
    grid
}

/// Overlap with a blocked tile by more than `EPS` on both axes
fn penetrates(grid: &Grid, aabb: &Aabb) -> bool {
    grid.blocked_tiles().any(|t| {
        let tile = grid.tile_aabb(t);
        let d = (tile.pos - aabb.pos).abs();
        let reach = tile.half + aabb.half - Vec2::splat(EPS);
        d.x < reach.x && d.y < reach.y
    })
}

proptest! {
    #[test]
    fn sweep_never_enters_blocked_tiles(
        mask in prop::collection::vec(prop::bool::weighted(0.3), (SIZE * SIZE) as usize),
        pos in (-10.0f32..82.0, -10.0f32..82.0),
        half in (0.5f32..6.0, 0.5f32..6.0),
        vel in (-20.0f32..20.0, -20.0f32..20.0),
    ) {
        let grid = grid_from_mask(&mask);
        let aabb = Aabb::new(Vec2::new(pos.0, pos.1), Vec2::new(half.0, half.1));
        prop_assume!(!penetrates(&grid, &aabb));

        let collision = sweep(&grid, &aabb, Vec2::new(vel.0, vel.1));
        let moved = aabb.translated(collision.delta);
        prop_assert!(!penetrates(&grid, &moved), "moved into a wall: {:?}", moved);

        // Never moves further than asked, and never backwards
        prop_assert!(collision.delta.x.abs() <= vel.0.abs() + EPS);
        prop_assert!(collision.delta.y.abs() <= vel.1.abs() + EPS);
        prop_assert!(collision.delta.x * vel.0 >= 0.0);
        prop_assert!(collision.delta.y * vel.1 >= 0.0);

        for hit in &collision.hits {
            prop_assert!(grid.is_blocked(hit.tile));
            prop_assert!((hit.normal.length() - 1.0).abs() < 1e-6);
            prop_assert!(hit.normal.x == 0.0 || hit.normal.y == 0.0);
        }
    }

    #[test]
    fn unclamped_sweep_moves_full_distance(
        pos in (10.0f32..60.0, 10.0f32..60.0),
        vel in (-5.0f32..5.0, -5.0f32..5.0),
    ) {
        let grid = Grid::open(SIZE, SIZE, TILE);
        let aabb = Aabb::square(Vec2::new(pos.0, pos.1), 2.0);
        let collision = sweep(&grid, &aabb, Vec2::new(vel.0, vel.1));
        prop_assert!(collision.hits.is_empty());
        prop_assert_eq!(collision.delta, Vec2::new(vel.0, vel.1));
    }

    #[test]
    fn reflection_preserves_speed_and_flips_normal_component(
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 0.1f32..5.0,
        axis in 0usize..4,
    ) {
        let normal = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y][axis];
        let v = Vec2::from_angle(angle) * speed;
        let r = reflect_velocity(v, normal);
        prop_assert!((r.length() - v.length()).abs() < 1e-4);
        prop_assert!((r.dot(normal) + v.dot(normal)).abs() < 1e-4);
    }

    #[test]
    fn bullets_bounce_forever_inside_generated_mazes(
        seed in 1u64..50,
        angle in 0.0f32..std::f32::consts::TAU,
    ) {
        let maze = Backtracker::default().generate(seed, 0);
        let grid = &maze.grid;
        let mut aabb = Aabb::square(maze.cell_center(3, 2), 2.0);
        let mut vel = Vec2::from_angle(angle) * 2.5;

        for _ in 0..500 {
            let collision = sweep(grid, &aabb, vel);
            if let Some(normal) = collision.first_normal() {
                vel = reflect_velocity(vel, normal);
            }
            aabb = aabb.translated(collision.delta);
            prop_assert!(!penetrates(grid, &aabb));
        }
        prop_assert!((vel.length() - 2.5).abs() < 1e-3);
    }
}

#[test]
fn axis_aligned_wall_bounce() {
    let v = reflect_velocity(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
    assert!((v - Vec2::new(-1.0, 0.0)).length() < 1e-6);
}
