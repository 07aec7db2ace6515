//! Static tile grid
//!
//! Cells are stored row-major. 0 is open, anything else blocks movement.
//! Coordinates outside the grid read as open space.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Cell state for open space
pub const OPEN: u8 = 0;
/// Cell state for a wall
pub const WALL: u8 = 1;

/// A fixed-size grid of square tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tile edge length in world units
    pub tile_size: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// Grid with every tile set to `fill`
    pub fn filled(width: u32, height: u32, tile_size: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            tile_size,
            cells: vec![fill; (width * height) as usize],
        }
    }

    /// Grid with every tile open
    pub fn open(width: u32, height: u32, tile_size: u32) -> Self {
        Self::filled(width, height, tile_size, OPEN)
    }

    /// Build from rows of cell states. Rows must all have the same length.
    pub fn from_rows(rows: &[&[u8]], tile_size: u32) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len() as u32);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in rows {
            assert_eq!(row.len() as u32, width, "ragged grid rows");
            cells.extend_from_slice(row);
        }
        Self {
            width,
            height,
            tile_size,
            cells,
        }
    }

    #[inline]
    fn index(&self, tile: IVec2) -> Option<usize> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.width as i32 || tile.y >= self.height as i32
        {
            return None;
        }
        Some(tile.y as usize * self.width as usize + tile.x as usize)
    }

    /// Cell state at `tile`, open when out of bounds
    pub fn get(&self, tile: IVec2) -> u8 {
        self.index(tile).map_or(OPEN, |i| self.cells[i])
    }

    /// Set a cell. Writes outside the grid are ignored.
    pub fn set(&mut self, tile: IVec2, state: u8) {
        if let Some(i) = self.index(tile) {
            self.cells[i] = state;
        }
    }

    #[inline]
    pub fn is_blocked(&self, tile: IVec2) -> bool {
        self.get(tile) != OPEN
    }

    /// Tile edge length as float
    #[inline]
    pub fn tile_len(&self) -> f32 {
        self.tile_size as f32
    }

    /// World-space box covering a tile
    pub fn tile_aabb(&self, tile: IVec2) -> Aabb {
        let ts = self.tile_len();
        let min = tile.as_vec2() * ts;
        Aabb::from_min_max(min, min + Vec2::splat(ts))
    }

    /// Tile containing a world-space point
    pub fn world_to_tile(&self, p: Vec2) -> IVec2 {
        (p / self.tile_len()).floor().as_ivec2()
    }

    /// Size of the whole grid in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_len()
    }

    /// All blocked tiles, row-major
    pub fn blocked_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != OPEN)
            .map(move |(i, _)| IVec2::new((i % w) as i32, (i / w) as i32))
    }

    /// Raw row-major cell states
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
