//! Axis-aligned collision boxes
//!
//! Everything in the playfield collides as a center + half-extents box in
//! the 2D plane. Sizes come from the per-entity lookup tables.

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Build from a center point and full size (width, height)
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Overlap test (touching edges count as intersecting)
    pub fn intersects(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x <= reach.x && d.y <= reach.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let b = Aabb::from_center_size(Vec2::new(1.5, 0.0), Vec2::new(2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_miss_on_one_axis() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(2.0, 2.0));
        // Overlaps in x but not in y
        let b = Aabb::from_center_size(Vec2::new(0.5, 5.0), Vec2::new(2.0, 2.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let b = Aabb::from_center_size(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_contains_point() {
        let a = Aabb::from_center_size(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));
        assert!(a.contains_point(Vec2::new(1.5, 0.5)));
        assert!(!a.contains_point(Vec2::new(3.0, 1.0)));
    }

    #[test]
    fn test_min_max() {
        let a = Aabb::from_center_size(Vec2::new(1.0, -1.0), Vec2::new(4.0, 2.0));
        assert_eq!(a.min(), Vec2::new(-1.0, -2.0));
        assert_eq!(a.max(), Vec2::new(3.0, 0.0));
    }
}
