//! Rounded rectangles and corner radii.
//!
//! [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)

use serde::{Deserialize, Serialize};

use crate::point::{Offset, Point, Size};
use crate::rect::Rect;

/// Relative slack allowed when checking that radii fit a side.
///
/// Scaling radii by `side / (a + b)` can land a hair above `side` in `f32`.
const RENDERABLE_EPSILON: f32 = 1.0e-4;

/// The four elliptical corner radii of a box.
///
/// Each corner is a [`Size`]: `width` is the horizontal radius and `height`
/// the vertical one. A corner with either radius zero is square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    /// Top-left corner radii.
    pub top_left: Size,
    /// Top-right corner radii.
    pub top_right: Size,
    /// Bottom-left corner radii.
    pub bottom_left: Size,
    /// Bottom-right corner radii.
    pub bottom_right: Size,
}

impl CornerRadii {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(Size::ZERO);

    /// The same radii on every corner.
    #[must_use]
    pub const fn uniform(radius: Size) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Whether every corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.corners().iter().all(|c| c.is_zero())
    }

    fn corners(&self) -> [Size; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    fn corners_mut(&mut self) -> [&mut Size; 4] {
        [
            &mut self.top_left,
            &mut self.top_right,
            &mut self.bottom_left,
            &mut self.bottom_right,
        ]
    }

    /// Scale every radius uniformly.
    pub fn scale(&mut self, factor: f32) {
        self.scale_xy(factor, factor);
    }

    /// Scale horizontal radii by `horizontal` and vertical radii by
    /// `vertical`.
    ///
    /// A corner that ends up with either radius zero is reset to square, so
    /// no corner is ever half-elliptical.
    pub fn scale_xy(&mut self, horizontal: f32, vertical: f32) {
        if (horizontal - 1.0).abs() < f32::EPSILON && (vertical - 1.0).abs() < f32::EPSILON {
            return;
        }
        for corner in self.corners_mut() {
            corner.width *= horizontal;
            corner.height *= vertical;
            if corner.width <= 0.0 || corner.height <= 0.0 {
                *corner = Size::ZERO;
            }
        }
    }

    /// Grow each rounded corner by the adjoining edge amounts.
    ///
    /// Square corners stay square. Results are clamped at zero.
    pub fn expand(&mut self, top: f32, bottom: f32, left: f32, right: f32) {
        let grow = |corner: &mut Size, horizontal: f32, vertical: f32| {
            if corner.width > 0.0 && corner.height > 0.0 {
                corner.width = (corner.width + horizontal).max(0.0);
                corner.height = (corner.height + vertical).max(0.0);
            }
        };
        grow(&mut self.top_left, left, top);
        grow(&mut self.top_right, right, top);
        grow(&mut self.bottom_left, left, bottom);
        grow(&mut self.bottom_right, right, bottom);
    }

    /// Shrink each rounded corner by the adjoining edge amounts, clamped at
    /// zero.
    pub fn shrink(&mut self, top: f32, bottom: f32, left: f32, right: f32) {
        self.expand(-top, -bottom, -left, -right);
    }

    /// Whether no two radii along any side of `rect` overlap.
    #[must_use]
    pub fn are_renderable_in(&self, rect: &Rect) -> bool {
        let fits = |a: f32, b: f32, side: f32| a + b <= side + RENDERABLE_EPSILON * side.max(1.0);
        fits(self.top_left.width, self.top_right.width, rect.width)
            && fits(self.bottom_left.width, self.bottom_right.width, rect.width)
            && fits(self.top_left.height, self.bottom_left.height, rect.height)
            && fits(self.top_right.height, self.bottom_right.height, rect.height)
    }

    /// Uniformly scale the radii down until they are renderable in `rect`.
    ///
    /// Radii that have no horizontal or no vertical extent at all collapse
    /// to square corners.
    pub fn make_renderable_in(&mut self, rect: &Rect) {
        let max_radius_width = (self.top_left.width + self.top_right.width)
            .max(self.bottom_left.width + self.bottom_right.width);
        let max_radius_height = (self.top_left.height + self.bottom_left.height)
            .max(self.top_right.height + self.bottom_right.height);

        if max_radius_width <= 0.0 || max_radius_height <= 0.0 {
            self.scale(0.0);
            return;
        }

        let width_ratio = rect.width / max_radius_width;
        let height_ratio = rect.height / max_radius_height;
        self.scale(width_ratio.min(height_ratio));
    }

    /// [§ 5.5 Overlapping Curves](https://www.w3.org/TR/css-backgrounds-3/#corner-overlap)
    ///
    /// "Let f = min(Li/Si), where i ∈ {top, right, bottom, left}, Si is the
    /// sum of the two corresponding radii of the corners on side i, and
    /// Ltop = Lbottom = the width of the box, and Lleft = Lright = the height
    /// of the box. If f < 1, then all corner radii are reduced by multiplying
    /// them by f."
    #[must_use]
    pub fn constraint_scale_for(&self, rect: &Rect) -> f32 {
        let mut factor: f32 = 1.0;
        let mut constrain = |sum: f32, side: f32| {
            if sum > side {
                factor = factor.min(side / sum);
            }
        };

        // top
        constrain(self.top_left.width + self.top_right.width, rect.width);
        // bottom
        constrain(self.bottom_left.width + self.bottom_right.width, rect.width);
        // left
        constrain(self.top_left.height + self.bottom_left.height, rect.height);
        // right
        constrain(self.top_right.height + self.bottom_right.height, rect.height);

        factor.max(0.0)
    }
}

/// A rectangle with elliptical corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundedRect {
    /// The bounding rect.
    pub rect: Rect,
    /// Corner radii.
    pub radii: CornerRadii,
}

impl RoundedRect {
    /// A rounded rect with square corners.
    #[must_use]
    pub const fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            radii: CornerRadii::ZERO,
        }
    }

    /// A rounded rect with the given radii.
    #[must_use]
    pub const fn new(rect: Rect, radii: CornerRadii) -> Self {
        Self { rect, radii }
    }

    /// Whether any corner is rounded.
    #[must_use]
    pub fn is_rounded(&self) -> bool {
        !self.radii.is_zero()
    }

    /// Whether the radii fit inside the rect.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.radii.are_renderable_in(&self.rect)
    }

    /// Scale the radii down uniformly so they fit.
    pub fn adjust_radii(&mut self) {
        self.radii.make_renderable_in(&self.rect);
    }

    /// Translate by `offset`.
    pub fn move_by(&mut self, offset: Offset) {
        self.rect = self.rect.moved_by(offset);
    }

    /// Grow the rect by `amount` on every side, scaling the radii by the
    /// growth factor of the shorter dimension.
    pub fn inflate_with_radii(&mut self, amount: f32) {
        let old = self.rect;
        self.rect = self.rect.inflate(amount);

        let factor = if self.rect.width < self.rect.height {
            if old.width == 0.0 {
                0.0
            } else {
                self.rect.width / old.width
            }
        } else if old.height == 0.0 {
            0.0
        } else {
            self.rect.height / old.height
        };
        self.radii.scale(factor.max(0.0));
    }

    /// Whether `other` lies entirely inside the rounded shape.
    ///
    /// Each corner of `other` that falls inside a rounded corner's bounding
    /// square must also fall inside that corner's ellipse.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        if !self.rect.contains_rect(other) || !self.is_renderable() {
            return false;
        }

        let r = &self.rect;
        let corner_ok = |radius: Size, center: Point, corner: Point, in_region: bool| {
            radius.is_empty() || !in_region || ellipse_contains_point(center, radius, corner)
        };

        let tl = self.radii.top_left;
        let center = Point::new(r.x + tl.width, r.y + tl.height);
        if !corner_ok(
            tl,
            center,
            Point::new(other.x, other.y),
            other.x <= center.x && other.y <= center.y,
        ) {
            return false;
        }

        let tr = self.radii.top_right;
        let center = Point::new(r.max_x() - tr.width, r.y + tr.height);
        if !corner_ok(
            tr,
            center,
            Point::new(other.max_x(), other.y),
            other.max_x() >= center.x && other.y <= center.y,
        ) {
            return false;
        }

        let bl = self.radii.bottom_left;
        let center = Point::new(r.x + bl.width, r.max_y() - bl.height);
        if !corner_ok(
            bl,
            center,
            Point::new(other.x, other.max_y()),
            other.x <= center.x && other.max_y() >= center.y,
        ) {
            return false;
        }

        let br = self.radii.bottom_right;
        let center = Point::new(r.max_x() - br.width, r.max_y() - br.height);
        corner_ok(
            br,
            center,
            Point::new(other.max_x(), other.max_y()),
            other.max_x() >= center.x && other.max_y() >= center.y,
        )
    }

    /// Snap the rect to device pixels, scaling the radii by the size change
    /// so the result stays renderable.
    #[must_use]
    pub fn pixel_snapped(&self, device_scale_factor: f32) -> Self {
        if self.rect.is_empty() {
            return *self;
        }
        let snapped_rect = self.rect.snapped_to_device_pixels(device_scale_factor);
        if !self.is_renderable() {
            return Self::new(snapped_rect, self.radii);
        }

        let mut radii = self.radii;
        radii.scale_xy(
            snapped_rect.width / self.rect.width,
            snapped_rect.height / self.rect.height,
        );
        let mut snapped = Self::new(snapped_rect, radii);
        if !snapped.is_renderable() {
            snapped.adjust_radii();
        }
        snapped
    }
}

fn ellipse_contains_point(center: Point, radii: Size, point: Point) -> bool {
    let x = (point.x - center.x) / radii.width;
    let y = (point.y - center.y) / radii.height;
    x * x + y * y <= 1.0 + RENDERABLE_EPSILON
}
