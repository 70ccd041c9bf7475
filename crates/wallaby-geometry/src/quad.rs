//! Quadrilaterals produced by mapping rects through transforms.

use serde::{Deserialize, Serialize};

use crate::point::{Offset, Point};
use crate::rect::Rect;

/// Four points in clockwise order, starting at the top-left of the source
/// rect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// First corner (source top-left).
    pub p1: Point,
    /// Second corner (source top-right).
    pub p2: Point,
    /// Third corner (source bottom-right).
    pub p3: Point,
    /// Fourth corner (source bottom-left).
    pub p4: Point,
}

impl Quad {
    /// The all-zero quad, produced when a mapping cannot be performed.
    pub const ZERO: Self = Self::new(Point::ZERO, Point::ZERO, Point::ZERO, Point::ZERO);

    /// Create a quad from its corners.
    #[must_use]
    pub const fn new(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        Self { p1, p2, p3, p4 }
    }

    /// The quad covering `rect`.
    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(
            Point::new(rect.x, rect.y),
            Point::new(rect.max_x(), rect.y),
            Point::new(rect.max_x(), rect.max_y()),
            Point::new(rect.x, rect.max_y()),
        )
    }

    /// The corners as an array.
    #[must_use]
    pub const fn points(&self) -> [Point; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }

    /// The smallest rect containing all four corners.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let points = self.points();
        let (mut min_x, mut min_y) = (points[0].x, points[0].y);
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Translate every corner.
    #[must_use]
    pub fn moved_by(&self, offset: Offset) -> Self {
        Self::new(
            self.p1 + offset,
            self.p2 + offset,
            self.p3 + offset,
            self.p4 + offset,
        )
    }

    /// Whether the quad is an axis-aligned rectangle (possibly rotated by a
    /// multiple of 90°).
    #[must_use]
    pub fn is_rectilinear(&self) -> bool {
        let [p1, p2, p3, p4] = self.points();
        (p1.y == p2.y && p2.x == p3.x && p3.y == p4.y && p4.x == p1.x)
            || (p1.x == p2.x && p2.y == p3.y && p3.x == p4.x && p4.y == p1.y)
    }
}
