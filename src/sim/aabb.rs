//! Axis-aligned bounding boxes
//!
//! A box is stored as its center plus half extents:
//! - min = pos - half
//! - max = pos + half
//!
//! Half extents are kept non-negative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center position
    pub pos: Vec2,
    /// Half extents (always >= 0)
    pub half: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, half: Vec2) -> Self {
        Self {
            pos,
            half: half.abs(),
        }
    }

    /// Square box with the same half extent on both axes
    pub fn square(pos: Vec2, half: f32) -> Self {
        Self::new(pos, Vec2::splat(half))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half
    }

    /// Full width and height
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Copy of this box moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            half: self.half,
        }
    }

    /// Axis-separation overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (other.pos - self.pos).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// Box covering the rectangle `min..max`
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_both_axes() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 4.0);
        let b = Aabb::square(Vec2::new(5.0, 3.0), 2.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::square(Vec2::ZERO, 4.0);
        // Overlapping on y, separated on x
        let b = Aabb::square(Vec2::new(10.0, 0.0), 4.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::square(Vec2::ZERO, 4.0);
        let b = Aabb::square(Vec2::new(8.0, 0.0), 4.0);
        assert!(!a.overlaps(&b));

        let c = Aabb::square(Vec2::new(7.99, 0.0), 4.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_negative_half_is_normalized() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(-3.0, 2.0));
        assert_eq!(a.half, Vec2::new(3.0, 2.0));
        assert_eq!(a.min(), Vec2::new(-3.0, -2.0));
        assert_eq!(a.max(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_from_min_max() {
        let a = Aabb::from_min_max(Vec2::new(9.0, 18.0), Vec2::new(18.0, 27.0));
        assert_eq!(a.pos, Vec2::new(13.5, 22.5));
        assert_eq!(a.half, Vec2::splat(4.5));
        assert_eq!(a.size(), Vec2::splat(9.0));
    }
}
