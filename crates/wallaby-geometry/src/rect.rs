//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::edges::RectEdges;
use crate::point::{Offset, Point, Size};

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// The empty rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rect.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rect from its origin and size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rect of `size` at the origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// The smallest rect containing both corner points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rect encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `other` lies entirely inside this rect (edges inclusive).
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.max_x() >= other.max_x()
            && self.y <= other.y
            && self.max_y() >= other.max_y()
    }

    /// Whether `point` lies inside this rect (max edges exclusive).
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Whether the two rects share any area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// The shared area of the two rects, or an empty rect at the origin.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if x >= max_x || y >= max_y {
            return Self::ZERO;
        }
        Self::new(x, y, max_x - x, max_y - y)
    }

    /// The bounding rect of both. An empty rect is the identity.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        self.union_even_if_empty(other)
    }

    /// The bounding rect of both, even when one of them has no area.
    #[must_use]
    pub fn union_even_if_empty(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self::new(x, y, max_x - x, max_y - y)
    }

    /// Grow outward by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Grow outward by a per-side amount. Negative amounts shrink.
    #[must_use]
    pub fn inflate_edges(&self, edges: &RectEdges<f32>) -> Self {
        Self::new(
            self.x - edges.left,
            self.y - edges.top,
            self.width + edges.left + edges.right,
            self.height + edges.top + edges.bottom,
        )
    }

    /// Shrink inward by a per-side amount. Width and height stay
    /// non-negative.
    #[must_use]
    pub fn contract_edges(&self, edges: &RectEdges<f32>) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.left - edges.right).max(0.0),
            (self.height - edges.top - edges.bottom).max(0.0),
        )
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn moved_by(&self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy, self.width, self.height)
    }

    /// Move the left edge to `edge`, keeping the right edge fixed.
    pub fn shift_x_edge_to(&mut self, edge: f32) {
        self.width -= edge - self.x;
        self.x = edge;
    }

    /// Move the right edge to `edge`, keeping the left edge fixed.
    pub fn shift_max_x_edge_to(&mut self, edge: f32) {
        self.width = edge - self.x;
    }

    /// Move the top edge to `edge`, keeping the bottom edge fixed.
    pub fn shift_y_edge_to(&mut self, edge: f32) {
        self.height -= edge - self.y;
        self.y = edge;
    }

    /// Move the bottom edge to `edge`, keeping the top edge fixed.
    pub fn shift_max_y_edge_to(&mut self, edge: f32) {
        self.height = edge - self.y;
    }

    /// Swap the axes.
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self::new(self.y, self.x, self.height, self.width)
    }

    /// The smallest integer-aligned rect that contains this one.
    #[must_use]
    pub fn enclosing_integral(&self) -> Self {
        let x = self.x.floor();
        let y = self.y.floor();
        Self::new(x, y, self.max_x().ceil() - x, self.max_y().ceil() - y)
    }

    /// Round each edge to the nearest device pixel.
    ///
    /// Edges are snapped independently so adjacent rects that share an edge
    /// before snapping still share it afterwards.
    #[must_use]
    pub fn snapped_to_device_pixels(&self, device_scale_factor: f32) -> Self {
        if device_scale_factor <= 0.0 || !device_scale_factor.is_finite() {
            return *self;
        }
        let snap = |v: f32| (v * device_scale_factor).round() / device_scale_factor;
        let x = snap(self.x);
        let y = snap(self.y);
        Self::new(x, y, snap(self.max_x()) - x, snap(self.max_y()) - y)
    }
}
