//! Maze generation
//!
//! A maze is a grid of `cols x rows` cells. Each cell is a square block of
//! `cell_span` open tiles, separated from its neighbours (and the outer
//! border) by `wall_span` tiles of wall. Carving a passage between two cells
//! opens the wall tiles between them.
//!
//! The simulation only depends on the [`MazeGenerator`] trait, so layouts can
//! be swapped without touching collision or game logic.

use glam::{IVec2, Vec2};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, OPEN, WALL};
use crate::consts::*;

/// Cell and tile dimensions of a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeLayout {
    /// Cells across
    pub cols: u32,
    /// Cells down
    pub rows: u32,
    /// Open tiles per cell edge
    pub cell_span: u32,
    /// Wall tiles between cells
    pub wall_span: u32,
    /// Tile edge length in world units
    pub tile_size: u32,
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self {
            cols: MAZE_COLS,
            rows: MAZE_ROWS,
            cell_span: CELL_SPAN,
            wall_span: WALL_SPAN,
            tile_size: TILE_SIZE,
        }
    }
}

impl MazeLayout {
    /// Distance in tiles from one cell origin to the next
    #[inline]
    pub fn pitch(&self) -> u32 {
        self.cell_span + self.wall_span
    }

    /// Grid size in tiles
    pub fn grid_size(&self) -> (u32, u32) {
        (
            self.cols * self.pitch() + self.wall_span,
            self.rows * self.pitch() + self.wall_span,
        )
    }

    /// Top-left open tile of a cell
    pub fn cell_origin(&self, col: u32, row: u32) -> IVec2 {
        IVec2::new(
            (self.wall_span + col * self.pitch()) as i32,
            (self.wall_span + row * self.pitch()) as i32,
        )
    }

    /// World-space center of a cell
    pub fn cell_center(&self, col: u32, row: u32) -> Vec2 {
        let origin = self.cell_origin(col, row).as_vec2();
        (origin + Vec2::splat(self.cell_span as f32 * 0.5)) * self.tile_size as f32
    }

    /// Total number of cells
    pub fn cell_count(&self) -> u32 {
        self.cols * self.rows
    }
}

/// A generated maze: its layout plus the tile grid used for collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub layout: MazeLayout,
    pub seed: u64,
    pub grid: Grid,
}

impl Maze {
    /// Maze with every cell sealed off by walls
    pub fn sealed(layout: MazeLayout, seed: u64) -> Self {
        let (w, h) = layout.grid_size();
        let mut grid = Grid::filled(w, h, layout.tile_size, WALL);
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let origin = layout.cell_origin(col, row);
                for dy in 0..layout.cell_span as i32 {
                    for dx in 0..layout.cell_span as i32 {
                        grid.set(origin + IVec2::new(dx, dy), OPEN);
                    }
                }
            }
        }
        Self { layout, seed, grid }
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.layout.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.layout.rows
    }

    /// World-space center of a cell
    pub fn cell_center(&self, col: u32, row: u32) -> Vec2 {
        self.layout.cell_center(col, row)
    }

    /// Open the wall between two orthogonally adjacent cells
    pub fn carve(&mut self, a: (u32, u32), b: (u32, u32)) {
        let ((c0, r0), (c1, r1)) = if (a.1, a.0) <= (b.1, b.0) { (a, b) } else { (b, a) };
        debug_assert!(c0.abs_diff(c1) + r0.abs_diff(r1) == 1, "cells not adjacent");

        let l = self.layout;
        let origin = l.cell_origin(c0, r0);
        let span = l.cell_span as i32;
        let wall = l.wall_span as i32;

        if r0 == r1 {
            // East wall of (c0, r0)
            for dy in 0..span {
                for dx in 0..wall {
                    self.grid.set(origin + IVec2::new(span + dx, dy), OPEN);
                }
            }
        } else {
            // South wall of (c0, r0)
            for dy in 0..wall {
                for dx in 0..span {
                    self.grid.set(origin + IVec2::new(dx, span + dy), OPEN);
                }
            }
        }
    }

    /// Whether the wall between two adjacent cells has been carved
    pub fn is_passage(&self, a: (u32, u32), b: (u32, u32)) -> bool {
        let ((c0, r0), (c1, r1)) = if (a.1, a.0) <= (b.1, b.0) { (a, b) } else { (b, a) };
        if c0.abs_diff(c1) + r0.abs_diff(r1) != 1 {
            return false;
        }
        let l = self.layout;
        let origin = l.cell_origin(c0, r0);
        let span = l.cell_span as i32;
        let probe = if r0 == r1 {
            origin + IVec2::new(span, 0)
        } else {
            origin + IVec2::new(0, span)
        };
        !self.grid.is_blocked(probe)
    }
}

/// Produces a maze grid from a seed and a difficulty parameter
pub trait MazeGenerator {
    fn layout(&self) -> MazeLayout;

    /// Must be deterministic for a given `(seed, difficulty)`
    fn generate(&self, seed: u64, difficulty: u32) -> Maze;
}

/// Depth-first recursive backtracker.
///
/// Produces a perfect maze (exactly one route between any two cells).
/// `difficulty` knocks out that many extra interior walls afterwards,
/// adding loops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backtracker {
    pub layout: MazeLayout,
}

impl Backtracker {
    pub fn new(layout: MazeLayout) -> Self {
        Self { layout }
    }

    fn neighbours(&self, (c, r): (u32, u32)) -> Vec<(u32, u32)> {
        let (cols, rows) = (self.layout.cols, self.layout.rows);
        [
            (c.checked_sub(1), Some(r)),
            (Some(c + 1).filter(|&c| c < cols), Some(r)),
            (Some(c), r.checked_sub(1)),
            (Some(c), Some(r + 1).filter(|&r| r < rows)),
        ]
        .into_iter()
        .filter_map(|(c, r)| Some((c?, r?)))
        .collect()
    }
}

impl MazeGenerator for Backtracker {
    fn layout(&self) -> MazeLayout {
        self.layout
    }

    fn generate(&self, seed: u64, difficulty: u32) -> Maze {
        let layout = self.layout;
        let mut maze = Maze::sealed(layout, seed);
        if layout.cell_count() == 0 {
            return maze;
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let index = |(c, r): (u32, u32)| (r * layout.cols + c) as usize;
        let mut visited = vec![false; layout.cell_count() as usize];
        let mut stack = vec![(0u32, 0u32)];
        visited[0] = true;

        while let Some(&current) = stack.last() {
            let open: Vec<_> = self
                .neighbours(current)
                .into_iter()
                .filter(|&n| !visited[index(n)])
                .collect();
            if open.is_empty() {
                stack.pop();
                continue;
            }
            let next = open[rng.random_range(0..open.len())];
            maze.carve(current, next);
            visited[index(next)] = true;
            stack.push(next);
        }

        if difficulty > 0 {
            let mut walls = Vec::new();
            for r in 0..layout.rows {
                for c in 0..layout.cols {
                    for n in [(c + 1, r), (c, r + 1)] {
                        if n.0 < layout.cols && n.1 < layout.rows && !maze.is_passage((c, r), n) {
                            walls.push(((c, r), n));
                        }
                    }
                }
            }
            walls.shuffle(&mut rng);
            for &(a, b) in walls.iter().take(difficulty as usize) {
                maze.carve(a, b);
            }
        }

        log::debug!(
            "Generated {}x{} maze (seed {}, difficulty {})",
            layout.cols,
            layout.rows,
            seed,
            difficulty
        );
        maze
    }
}
