//! Axis-aligned bounding boxes
//!
//! Boxes are stored as a top-left corner plus size, screen coordinates
//! (y grows downward).

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Open-interval overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, side: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(side))
    }

    #[test]
    fn test_overlap() {
        let a = square(0.0, 0.0, 20.0);
        let b = square(10.0, 10.0, 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = square(100.0, 530.0, 20.0);
        // Obstacle flush against the player's right edge
        let right = square(120.0, 525.0, 25.0);
        assert!(!player.overlaps(&right));
        assert!(!right.overlaps(&player));

        // Obstacle flush against the player's bottom edge
        let below = square(105.0, 550.0, 25.0);
        assert!(!player.overlaps(&below));
    }

    #[test]
    fn test_separated() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(50.0, 0.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let outer = square(0.0, 0.0, 100.0);
        let inner = square(40.0, 40.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
