//! Axis-aligned rectangle geometry for the tile board
//!
//! All coordinates are integer pixels. A rectangle is its top-left corner
//! plus a positive width and height; overlap is strict, so rectangles that
//! merely share an edge do not collide.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with integer position and size.
///
/// Invariant: `w > 0` and `h > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rectangle centered on `center`.
    pub fn centered(center: IVec2, size: i32) -> Self {
        Self::new(center.x - size / 2, center.y - size / 2, size, size)
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn set_pos(&mut self, pos: IVec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Center point (integer division, biased toward top-left for odd sizes)
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    #[inline]
    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test: projections must overlap on both axes.
    /// Edge-touching rectangles do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Whether the rectangle lies entirely inside `[0, bounds)` on both axes
    pub fn within(&self, bounds: IVec2) -> bool {
        self.x >= 0 && self.y >= 0 && self.x + self.w <= bounds.x && self.y + self.h <= bounds.y
    }

    /// Clamp the rectangle's position so it stays inside the board extents
    pub fn clamp_to(&mut self, bounds: IVec2) {
        self.x = self.x.clamp(0, (bounds.x - self.w).max(0));
        self.y = self.y.clamp(0, (bounds.y - self.h).max(0));
    }
}
