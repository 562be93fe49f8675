//! Axis-aligned rectangle in world pixels
//!
//! Stored as min corner + size. Entities carry two of these: the visual
//! rect that drives drawing and the hitbox that drives collision.

use macroquad::prelude::Vec2;

/// A rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Place a rect of the given size with its center at `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    /// Place a rect with its top-left corner at `top_left`
    pub fn from_top_left(top_left: Vec2, w: f32, h: f32) -> Self {
        Self::new(top_left.x, top_left.y, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Midpoints of each edge, used to attach one rect to the side of another
    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y)
    }

    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    pub fn mid_left(&self) -> Vec2 {
        Vec2::new(self.x, self.center_y())
    }

    pub fn mid_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.center_y())
    }

    // Edge setters move the rect, they never resize it.

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w * 0.5;
        self.y = center.y - self.h * 0.5;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow (or shrink, for negative deltas) around the center
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        let w = (self.w + dw).max(0.0);
        let h = (self.h + dh).max(0.0);
        Self::from_center(self.center(), w, h)
    }

    /// Strict overlap test: rects that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(64.0, 0.0, 64.0, 64.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(63.5, 10.0, 64.0, 64.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(100.0, 200.0, 64.0, 64.0);
        let hit = r.inflate(0.0, -26.0);
        assert_eq!(hit.center(), r.center());
        assert!((hit.h - 38.0).abs() < 0.001);
        assert!((hit.w - 64.0).abs() < 0.001);
        assert!(hit.top() >= r.top() && hit.bottom() <= r.bottom());
    }

    #[test]
    fn test_edge_setters_move_without_resizing() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 20.0);
        r.set_right(50.0);
        assert_eq!(r, Rect::new(40.0, 0.0, 10.0, 20.0));
        r.set_bottom(5.0);
        assert_eq!(r, Rect::new(40.0, -15.0, 10.0, 20.0));
        r.set_center(Vec2::new(0.0, 0.0));
        assert_eq!(r, Rect::new(-5.0, -10.0, 10.0, 20.0));
    }

    #[test]
    fn test_anchors() {
        let r = Rect::from_center(Vec2::new(10.0, 10.0), 4.0, 2.0);
        assert_eq!(r.top_left(), Vec2::new(8.0, 9.0));
        assert_eq!(r.mid_right(), Vec2::new(12.0, 10.0));
        assert_eq!(r.mid_bottom(), Vec2::new(10.0, 11.0));
    }
}
