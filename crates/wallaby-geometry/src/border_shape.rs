//! Border shapes: the outer border edge and inner padding edge of a box.
//!
//! [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
//!
//! "The padding edge (inner border) radius is the outer border radius minus
//! the corresponding border thickness. In the case where this results in a
//! negative value, the inner radius is zero."

use crate::edges::{ClosedEdges, RectEdges};
use crate::path::Path;
use crate::point::{Offset, Size};
use crate::rect::Rect;
use crate::rounded_rect::{CornerRadii, RoundedRect};

/// A pair of rounded rects (border edge and padding edge) plus the border
/// widths between them.
///
/// The inner rect is always derived from the outer rect and the widths,
/// and its radii are always renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderShape {
    border_rect: RoundedRect,
    inner_edge_rect: RoundedRect,
    border_widths: RectEdges<f32>,
}

impl BorderShape {
    /// The shape of a box's border.
    ///
    /// `radii` are the style radii already evaluated against the border rect
    /// size. They are scaled by the corner-overlap factor, dropped on edges
    /// that are not closed, and finally made renderable. Border widths on
    /// open edges are treated as zero.
    #[must_use]
    pub fn shape_for_border_rect(
        border_rect: Rect,
        radii: CornerRadii,
        border_widths: RectEdges<f32>,
        closed_edges: ClosedEdges,
    ) -> Self {
        let used_widths = used_widths_for_closed_edges(&border_widths, &closed_edges);

        if radii.is_zero() {
            return Self::new(border_rect, used_widths);
        }

        let mut radii = radii;
        radii.scale(radii.constraint_scale_for(&border_rect));
        drop_radii_on_open_edges(&mut radii, &closed_edges);
        if !radii.are_renderable_in(&border_rect) {
            radii.make_renderable_in(&border_rect);
        }
        Self::with_radii(border_rect, used_widths, radii)
    }

    /// The shape of an outline drawn around `border_rect` at
    /// `outline_box_rect`.
    ///
    /// Rounded corners grow by the outset on each side so the outline
    /// follows the border curve.
    #[must_use]
    pub fn shape_for_outset_rect(
        border_rect: Rect,
        outline_box_rect: Rect,
        radii: CornerRadii,
        outline_widths: RectEdges<f32>,
        closed_edges: ClosedEdges,
    ) -> Self {
        let used_widths = used_widths_for_closed_edges(&outline_widths, &closed_edges);

        if radii.is_zero() {
            return Self::new(outline_box_rect, used_widths);
        }

        let left_outset = (border_rect.x - outline_box_rect.x).max(0.0);
        let top_outset = (border_rect.y - outline_box_rect.y).max(0.0);
        let right_outset = (outline_box_rect.max_x() - border_rect.max_x()).max(0.0);
        let bottom_outset = (outline_box_rect.max_y() - border_rect.max_y()).max(0.0);

        let mut radii = radii;
        radii.expand(top_outset, bottom_outset, left_outset, right_outset);
        drop_radii_on_open_edges(&mut radii, &closed_edges);
        if !radii.are_renderable_in(&outline_box_rect) {
            radii.make_renderable_in(&outline_box_rect);
        }
        Self::with_radii(outline_box_rect, used_widths, radii)
    }

    /// The shape of `inset_rect`, a rect inside `border_rect`, with radii
    /// shrunk by the inset on each side (for clipping to an inset box).
    #[must_use]
    pub fn shape_for_inset_rect(border_rect: Rect, radii: CornerRadii, inset_rect: Rect) -> Self {
        if radii.is_zero() {
            return Self::new(inset_rect, RectEdges::ZERO);
        }

        let left_inset = (inset_rect.x - border_rect.x).max(0.0);
        let top_inset = (inset_rect.y - border_rect.y).max(0.0);
        let right_inset = (border_rect.max_x() - inset_rect.max_x()).max(0.0);
        let bottom_inset = (border_rect.max_y() - inset_rect.max_y()).max(0.0);
        let inset_widths = RectEdges::new(top_inset, right_inset, bottom_inset, left_inset);

        let inset_rounded = Self::compute_inner_edge_rounded_rect(
            &RoundedRect::new(border_rect, radii),
            &inset_widths,
        );
        Self::with_radii(inset_rect, RectEdges::ZERO, inset_rounded.radii)
    }

    /// A square-cornered shape.
    #[must_use]
    pub fn new(border_rect: Rect, border_widths: RectEdges<f32>) -> Self {
        let border_rect = RoundedRect::from_rect(border_rect);
        Self {
            border_rect,
            inner_edge_rect: Self::compute_inner_edge_rounded_rect(&border_rect, &border_widths),
            border_widths,
        }
    }

    /// A shape with already-adjusted radii.
    ///
    /// If the radii do not fit, they are made renderable here rather than
    /// trusted.
    #[must_use]
    pub fn with_radii(border_rect: Rect, border_widths: RectEdges<f32>, radii: CornerRadii) -> Self {
        let mut border_rect = RoundedRect::new(border_rect, radii);
        if !border_rect.is_renderable() {
            border_rect.adjust_radii();
        }
        Self {
            border_rect,
            inner_edge_rect: Self::compute_inner_edge_rounded_rect(&border_rect, &border_widths),
            border_widths,
        }
    }

    /// The same outer shape with different border widths.
    #[must_use]
    pub fn with_border_widths(&self, border_widths: RectEdges<f32>) -> Self {
        Self::with_radii(self.border_rect.rect, border_widths, self.border_rect.radii)
    }

    /// Inset `border_rounded` by `widths`, shrinking its radii to match.
    ///
    /// Width and height are clamped to zero. Shrunk radii that no longer
    /// fit are scaled down uniformly.
    #[must_use]
    pub fn compute_inner_edge_rounded_rect(
        border_rounded: &RoundedRect,
        widths: &RectEdges<f32>,
    ) -> RoundedRect {
        let border_rect = border_rounded.rect;
        let inner_rect = Rect::new(
            border_rect.x + widths.left,
            border_rect.y + widths.top,
            (border_rect.width - widths.left - widths.right).max(0.0),
            (border_rect.height - widths.top - widths.bottom).max(0.0),
        );

        let mut inner = RoundedRect::from_rect(inner_rect);
        if border_rounded.is_rounded() {
            let mut inner_radii = border_rounded.radii;
            inner_radii.shrink(widths.top, widths.bottom, widths.left, widths.right);
            inner.radii = inner_radii;
            if !inner.is_renderable() {
                inner.adjust_radii();
            }
        }
        inner
    }

    /// The outer (border edge) rounded rect.
    #[must_use]
    pub const fn outer_rounded_rect(&self) -> &RoundedRect {
        &self.border_rect
    }

    /// The inner (padding edge) rounded rect.
    #[must_use]
    pub const fn inner_rounded_rect(&self) -> &RoundedRect {
        &self.inner_edge_rect
    }

    /// The outer rect without radii.
    #[must_use]
    pub const fn border_rect(&self) -> Rect {
        self.border_rect.rect
    }

    /// The inner rect without radii.
    #[must_use]
    pub const fn inner_edge_rect(&self) -> Rect {
        self.inner_edge_rect.rect
    }

    /// The used border widths.
    #[must_use]
    pub const fn border_widths(&self) -> &RectEdges<f32> {
        &self.border_widths
    }

    /// The outer corner radii.
    #[must_use]
    pub const fn radii(&self) -> &CornerRadii {
        &self.border_rect.radii
    }

    /// The outer rect snapped to device pixels.
    #[must_use]
    pub fn snapped_outer_rect(&self, device_scale_factor: f32) -> Rect {
        self.border_rect
            .rect
            .snapped_to_device_pixels(device_scale_factor)
    }

    /// The inner rect snapped to device pixels.
    #[must_use]
    pub fn snapped_inner_rect(&self, device_scale_factor: f32) -> Rect {
        self.inner_edge_rect
            .rect
            .snapped_to_device_pixels(device_scale_factor)
    }

    /// Whether `rect` lies inside the inner rounded shape.
    #[must_use]
    pub fn inner_shape_contains(&self, rect: &Rect) -> bool {
        self.inner_edge_rect.contains_rect(rect)
    }

    /// Whether `rect` lies inside the outer rounded shape.
    #[must_use]
    pub fn outer_shape_contains(&self, rect: &Rect) -> bool {
        self.border_rect.contains_rect(rect)
    }

    /// Whether the outer shape has square corners.
    #[must_use]
    pub fn outer_shape_is_rectangular(&self) -> bool {
        !self.border_rect.is_rounded()
    }

    /// Whether the inner shape has square corners.
    #[must_use]
    pub fn inner_shape_is_rectangular(&self) -> bool {
        !self.inner_edge_rect.is_rounded()
    }

    /// Translate both edges.
    pub fn move_by(&mut self, offset: Offset) {
        self.border_rect.move_by(offset);
        self.inner_edge_rect.move_by(offset);
    }

    /// Grow the outer edge by `amount` and re-derive the inner edge.
    pub fn inflate(&mut self, amount: f32) {
        self.border_rect.inflate_with_radii(amount);
        self.inner_edge_rect =
            Self::compute_inner_edge_rounded_rect(&self.border_rect, &self.border_widths);
    }

    /// Path of the outer edge, snapped to device pixels.
    #[must_use]
    pub fn path_for_outer_shape(&self, device_scale_factor: f32) -> Path {
        let mut path = Path::new();
        self.add_outer_shape_to_path(&mut path, device_scale_factor);
        path
    }

    /// Path of the inner edge, snapped to device pixels.
    #[must_use]
    pub fn path_for_inner_shape(&self, device_scale_factor: f32) -> Path {
        let mut path = Path::new();
        self.add_inner_shape_to_path(&mut path, device_scale_factor);
        path
    }

    /// Path covering the border area: the outer edge followed by the inner
    /// edge, for an even-odd fill.
    #[must_use]
    pub fn path_for_border_area(&self, device_scale_factor: f32) -> Path {
        let mut path = Path::new();
        self.add_outer_shape_to_path(&mut path, device_scale_factor);
        self.add_inner_shape_to_path(&mut path, device_scale_factor);
        path
    }

    /// Append the snapped outer edge to `path`.
    pub fn add_outer_shape_to_path(&self, path: &mut Path, device_scale_factor: f32) {
        add_rounded_rect_to_path(
            &self.border_rect.pixel_snapped(device_scale_factor),
            path,
        );
    }

    /// Append the snapped inner edge to `path`.
    pub fn add_inner_shape_to_path(&self, path: &mut Path, device_scale_factor: f32) {
        add_rounded_rect_to_path(
            &self.inner_edge_rect.pixel_snapped(device_scale_factor),
            path,
        );
    }
}

fn add_rounded_rect_to_path(rounded: &RoundedRect, path: &mut Path) {
    if rounded.is_rounded() {
        path.add_rounded_rect(rounded);
    } else {
        path.add_rect(&rounded.rect);
    }
}

fn used_widths_for_closed_edges(widths: &RectEdges<f32>, closed: &ClosedEdges) -> RectEdges<f32> {
    RectEdges::new(
        if closed.top { widths.top } else { 0.0 },
        if closed.right { widths.right } else { 0.0 },
        if closed.bottom { widths.bottom } else { 0.0 },
        if closed.left { widths.left } else { 0.0 },
    )
}

fn drop_radii_on_open_edges(radii: &mut CornerRadii, closed: &ClosedEdges) {
    if !closed.top {
        radii.top_left = Size::ZERO;
        radii.top_right = Size::ZERO;
    }
    if !closed.right {
        radii.top_right = Size::ZERO;
        radii.bottom_right = Size::ZERO;
    }
    if !closed.bottom {
        radii.bottom_right = Size::ZERO;
        radii.bottom_left = Size::ZERO;
    }
    if !closed.left {
        radii.bottom_left = Size::ZERO;
        radii.top_left = Size::ZERO;
    }
}
