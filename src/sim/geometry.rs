//! Axis-aligned geometry for bricks, paddle and ball
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Check if a point lies inside (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// True if `x` lies strictly between the left and right edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }

    /// Check if the circle's bounding square intersects this rectangle on both axes
    pub fn overlaps(&self, circle: &Circle) -> bool {
        let c = circle.center;
        let r = circle.radius;
        c.x + r > self.left()
            && c.x - r < self.right()
            && c.y + r > self.top()
            && c.y - r < self.bottom()
    }

    /// Check if two rectangles share any interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// A circle by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Same circle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}

/// Playfield bounds the ball reflects off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner of the inner area
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            width,
            height,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(30.0, 30.0, 75.0, 20.0);
        assert_eq!(rect.left(), 30.0);
        assert_eq!(rect.right(), 105.0);
        assert_eq!(rect.top(), 30.0);
        assert_eq!(rect.bottom(), 50.0);
        assert_eq!(rect.center(), Vec2::new(67.5, 40.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(rect.contains(Vec2::new(10.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.1, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn test_circle_overlap_uses_bounding_square() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);

        // Corner case: bounding square overlaps even though the disc does not
        let corner = Circle::new(Vec2::new(95.0, 95.0), 8.0);
        assert!(rect.overlaps(&corner));

        let touching = Circle::new(Vec2::new(90.0, 110.0), 10.0);
        assert!(!rect.overlaps(&touching), "edge contact is not overlap");

        let apart = Circle::new(Vec2::new(200.0, 110.0), 10.0);
        assert!(!rect.overlaps(&apart));
    }

    #[test]
    fn test_spans_x_is_strict() {
        let rect = Rect::new(10.0, 0.0, 20.0, 5.0);
        assert!(rect.spans_x(15.0));
        assert!(!rect.spans_x(10.0));
        assert!(!rect.spans_x(30.0));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }
}
