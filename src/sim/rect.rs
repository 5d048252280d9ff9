//! Axis-aligned rectangle geometry for paddle, bricks, and projectiles
//!
//! The playfield uses screen coordinates: origin top-left, +x right, +y down.
//! Every solid entity in the game is a `Rect`; the ball collides via its
//! bounding square.

use glam::Vec2;

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner x
    pub x: f32,
    /// Top-left corner y
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from its center point
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    /// Move the rect so its center x lands on the given coordinate
    pub fn set_center_x(&mut self, cx: f32) {
        self.x = cx - self.width / 2.0;
    }

    /// Resize the width in place, keeping the center fixed
    pub fn resize_width_about_center(&mut self, new_width: f32) {
        let cx = self.center_x();
        self.width = new_width;
        self.set_center_x(cx);
    }

    /// Clamp the rect horizontally to [min_x, max_x]
    pub fn clamp_horizontal(&mut self, min_x: f32, max_x: f32) {
        if self.left() < min_x {
            self.x = min_x;
        }
        if self.right() > max_x {
            self.x = max_x - self.width;
        }
    }

    /// Overlap test (shared edges do not count as overlap)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_resize_preserves_center() {
        let mut r = Rect::new(350.0, 560.0, 100.0, 10.0);
        let cx = r.center_x();
        r.resize_width_about_center(150.0);
        assert_eq!(r.width, 150.0);
        assert!((r.center_x() - cx).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_horizontal() {
        let mut r = Rect::new(-20.0, 0.0, 100.0, 10.0);
        r.clamp_horizontal(0.0, 800.0);
        assert_eq!(r.left(), 0.0);

        let mut r = Rect::new(750.0, 0.0, 100.0, 10.0);
        r.clamp_horizontal(0.0, 800.0);
        assert_eq!(r.right(), 800.0);
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        // Touching edges do not overlap
        let d = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(400.0, 300.0), 20.0, 20.0);
        assert_eq!(r.x, 390.0);
        assert_eq!(r.y, 290.0);
        assert_eq!(r.center(), Vec2::new(400.0, 300.0));
    }
}
