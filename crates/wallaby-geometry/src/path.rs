//! Vector paths built from rects, rounded rects, ellipses, and arcs.
//!
//! Paths here are only ever constructed geometrically (border and clip
//! shapes). There is no path data parser.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::point::Point;
use crate::rect::Rect;
use crate::rounded_rect::RoundedRect;
use crate::transform::TransformationMatrix;

/// Distance of a cubic control point from the corner, as a fraction of the
/// radius, for a quarter-ellipse approximation.
pub const CIRCLE_CONTROL_POINT_KAPPA: f32 = 0.552_284_8;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line to the point.
    LineTo(Point),
    /// Quadratic Bézier with one control point.
    QuadTo(Point, Point),
    /// Cubic Bézier with two control points.
    CubicTo(Point, Point, Point),
    /// Close the current subpath.
    Close,
}

/// An ordered list of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
    subpath_start: Option<Point>,
    current: Option<Point>,
}

impl Path {
    /// An empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            subpath_start: None,
            current: None,
        }
    }

    /// The commands in order.
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Whether the path has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The end point of the last command, if any.
    #[must_use]
    pub const fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Start a new subpath at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.elements.push(PathElement::MoveTo(point));
        self.subpath_start = Some(point);
        self.current = Some(point);
    }

    /// Line to `point`. Starts a subpath if there is no current point.
    pub fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.elements.push(PathElement::LineTo(point));
        self.current = Some(point);
    }

    /// Quadratic curve to `end`.
    pub fn quad_to(&mut self, control: Point, end: Point) {
        if self.current.is_none() {
            self.move_to(control);
        }
        self.elements.push(PathElement::QuadTo(control, end));
        self.current = Some(end);
    }

    /// Cubic curve to `end`.
    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) {
        if self.current.is_none() {
            self.move_to(control1);
        }
        self.elements
            .push(PathElement::CubicTo(control1, control2, end));
        self.current = Some(end);
    }

    /// Close the current subpath. No-op if nothing is open.
    pub fn close(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.elements.push(PathElement::Close);
        self.current = self.subpath_start;
    }

    /// Add a closed rectangle subpath.
    pub fn add_rect(&mut self, rect: &Rect) {
        self.move_to(Point::new(rect.x, rect.y));
        self.line_to(Point::new(rect.max_x(), rect.y));
        self.line_to(Point::new(rect.max_x(), rect.max_y()));
        self.line_to(Point::new(rect.x, rect.max_y()));
        self.close();
    }

    /// Add a closed rounded-rectangle subpath.
    ///
    /// Each rounded corner is one cubic. Non-renderable radii are scaled
    /// down first so corners never overlap.
    pub fn add_rounded_rect(&mut self, rounded: &RoundedRect) {
        if rounded.rect.is_empty() {
            return;
        }
        if !rounded.is_rounded() {
            self.add_rect(&rounded.rect);
            return;
        }
        let mut rounded = *rounded;
        if !rounded.is_renderable() {
            rounded.adjust_radii();
        }

        let r = rounded.rect;
        let radii = rounded.radii;
        let k = CIRCLE_CONTROL_POINT_KAPPA;

        self.move_to(Point::new(r.x + radii.top_left.width, r.y));

        self.line_to(Point::new(r.max_x() - radii.top_right.width, r.y));
        if !radii.top_right.is_zero() {
            self.cubic_to(
                Point::new(r.max_x() - radii.top_right.width * (1.0 - k), r.y),
                Point::new(r.max_x(), r.y + radii.top_right.height * (1.0 - k)),
                Point::new(r.max_x(), r.y + radii.top_right.height),
            );
        }

        self.line_to(Point::new(r.max_x(), r.max_y() - radii.bottom_right.height));
        if !radii.bottom_right.is_zero() {
            self.cubic_to(
                Point::new(
                    r.max_x(),
                    r.max_y() - radii.bottom_right.height * (1.0 - k),
                ),
                Point::new(
                    r.max_x() - radii.bottom_right.width * (1.0 - k),
                    r.max_y(),
                ),
                Point::new(r.max_x() - radii.bottom_right.width, r.max_y()),
            );
        }

        self.line_to(Point::new(r.x + radii.bottom_left.width, r.max_y()));
        if !radii.bottom_left.is_zero() {
            self.cubic_to(
                Point::new(r.x + radii.bottom_left.width * (1.0 - k), r.max_y()),
                Point::new(r.x, r.max_y() - radii.bottom_left.height * (1.0 - k)),
                Point::new(r.x, r.max_y() - radii.bottom_left.height),
            );
        }

        self.line_to(Point::new(r.x, r.y + radii.top_left.height));
        if !radii.top_left.is_zero() {
            self.cubic_to(
                Point::new(r.x, r.y + radii.top_left.height * (1.0 - k)),
                Point::new(r.x + radii.top_left.width * (1.0 - k), r.y),
                Point::new(r.x + radii.top_left.width, r.y),
            );
        }

        self.close();
    }

    /// Add a closed ellipse inscribed in `rect`.
    pub fn add_ellipse(&mut self, rect: &Rect) {
        if rect.is_empty() {
            return;
        }
        let center = rect.center();
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        let (kx, ky) = (rx * CIRCLE_CONTROL_POINT_KAPPA, ry * CIRCLE_CONTROL_POINT_KAPPA);

        self.move_to(Point::new(center.x + rx, center.y));
        self.cubic_to(
            Point::new(center.x + rx, center.y + ky),
            Point::new(center.x + kx, center.y + ry),
            Point::new(center.x, center.y + ry),
        );
        self.cubic_to(
            Point::new(center.x - kx, center.y + ry),
            Point::new(center.x - rx, center.y + ky),
            Point::new(center.x - rx, center.y),
        );
        self.cubic_to(
            Point::new(center.x - rx, center.y - ky),
            Point::new(center.x - kx, center.y - ry),
            Point::new(center.x, center.y - ry),
        );
        self.cubic_to(
            Point::new(center.x + kx, center.y - ry),
            Point::new(center.x + rx, center.y - ky),
            Point::new(center.x + rx, center.y),
        );
        self.close();
    }

    /// Add a circular arc.
    ///
    /// Angles are in radians, measured from the positive x axis towards the
    /// positive y axis. With `clockwise` the arc sweeps towards increasing
    /// angles. A sweep of a full turn or more draws the whole circle.
    ///
    /// Non-finite input or a non-positive radius is silently dropped.
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        if !center.x.is_finite()
            || !center.y.is_finite()
            || !radius.is_finite()
            || !start_angle.is_finite()
            || !end_angle.is_finite()
            || radius <= 0.0
        {
            return;
        }

        let raw = if clockwise {
            end_angle - start_angle
        } else {
            start_angle - end_angle
        };
        let sweep = if raw >= TAU { TAU } else { raw.rem_euclid(TAU) };
        let signed_sweep = if clockwise { sweep } else { -sweep };

        let point_at = |angle: f32| {
            let (sin, cos) = angle.sin_cos();
            Point::new(center.x + radius * cos, center.y + radius * sin)
        };

        let start = point_at(start_angle);
        if self.current.is_some() {
            self.line_to(start);
        } else {
            self.move_to(start);
        }
        if sweep == 0.0 {
            return;
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        #[allow(clippy::cast_precision_loss)]
        let step = signed_sweep / segments as f32;
        let handle = 4.0 / 3.0 * (step / 4.0).tan() * radius;

        let mut angle = start_angle;
        for _ in 0..segments {
            let next = angle + step;
            let (s0, c0) = angle.sin_cos();
            let (s1, c1) = next.sin_cos();
            let p0 = point_at(angle);
            let p3 = point_at(next);
            self.cubic_to(
                Point::new(p0.x - handle * s0, p0.y + handle * c0),
                Point::new(p3.x + handle * s1, p3.y - handle * c1),
                p3,
            );
            angle = next;
        }
    }

    /// The bounds of every point in the path, control points included.
    ///
    /// This is the cheap hull bound: it can be larger than the tight curve
    /// bounds but never smaller.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let mut bounds: Option<(Point, Point)> = None;
        let mut include = |p: Point| {
            bounds = Some(bounds.map_or((p, p), |(min, max)| {
                (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                )
            }));
        };
        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => include(p),
                PathElement::QuadTo(c, p) => {
                    include(c);
                    include(p);
                }
                PathElement::CubicTo(c1, c2, p) => {
                    include(c1);
                    include(c2);
                    include(p);
                }
                PathElement::Close => {}
            }
        }
        bounds.map_or(Rect::ZERO, |(min, max)| Rect::from_corners(min, max))
    }

    /// Map every point through `matrix`.
    #[must_use]
    pub fn transform(&self, matrix: &TransformationMatrix) -> Self {
        let map = |p: Point| matrix.map_point(p);
        Self {
            elements: self
                .elements
                .iter()
                .map(|element| match *element {
                    PathElement::MoveTo(p) => PathElement::MoveTo(map(p)),
                    PathElement::LineTo(p) => PathElement::LineTo(map(p)),
                    PathElement::QuadTo(c, p) => PathElement::QuadTo(map(c), map(p)),
                    PathElement::CubicTo(c1, c2, p) => {
                        PathElement::CubicTo(map(c1), map(c2), map(p))
                    }
                    PathElement::Close => PathElement::Close,
                })
                .collect(),
            subpath_start: self.subpath_start.map(map),
            current: self.current.map(map),
        }
    }
}
