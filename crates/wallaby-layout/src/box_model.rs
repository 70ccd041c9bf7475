//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::Serialize;
use wallaby_geometry::{BorderShape, ClosedEdges, Point, Rect, RectEdges, Size};

use crate::style::BoxStyle;

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// The border box is the anchor: `frame` is the border-box rect in the
/// parent's border-box coordinate space, and every other area is derived
/// from it and the resolved edge widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxGeometry {
    /// Border box, relative to the parent's border box.
    pub frame: Rect,
    /// Resolved margins.
    pub margin: RectEdges<f32>,
    /// Resolved border widths.
    pub border: RectEdges<f32>,
    /// Resolved padding.
    pub padding: RectEdges<f32>,
}

impl BoxGeometry {
    // [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
    //
    // ┌─────────────────────────────────────────┐
    // │              margin-top                 │
    // │   ┌─────────────────────────────────┐   │
    // │   │ frame   border-top              │   │
    // │   │   ┌─────────────────────────┐   │   │
    // │   │   │      padding-top        │   │   │
    // │   │   │   ┌─────────────────┐   │   │   │
    // │ m │ b │ p │     CONTENT     │ p │ b │ m │
    // │   │   │   └─────────────────┘   │   │   │
    // │   │   │      padding-bottom     │   │   │
    // │   │   └─────────────────────────┘   │   │
    // │   │          border-bottom          │   │
    // │   └─────────────────────────────────┘   │
    // │              margin-bottom              │
    // └─────────────────────────────────────────┘
    //
    // The local rects below are in the box's own coordinate space, where
    // the border box's top-left corner is the origin.

    /// Top-left corner of the border box in the parent's space.
    #[must_use]
    pub const fn location(&self) -> Point {
        self.frame.origin()
    }

    /// Border-box size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.frame.size()
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub const fn border_box_rect(&self) -> Rect {
        Rect::from_size(self.frame.size())
    }

    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    ///
    /// ```text
    /// x = border.left
    /// width = frame.width - border.left - border.right
    /// ```
    #[must_use]
    pub fn padding_box_rect(&self) -> Rect {
        self.border_box_rect().contract_edges(&self.border)
    }

    /// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
    ///
    /// "The content box contains the actual content of the element."
    ///
    /// ```text
    /// x = border.left + padding.left
    /// width = frame.width - (border + padding).horizontal_sum()
    /// ```
    #[must_use]
    pub fn content_box_rect(&self) -> Rect {
        self.padding_box_rect().contract_edges(&self.padding)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    /// Negative margins shrink it.
    #[must_use]
    pub fn margin_box_rect(&self) -> Rect {
        self.border_box_rect().inflate_edges(&self.margin)
    }

    /// Border plus padding on each side.
    #[must_use]
    pub fn border_and_padding(&self) -> RectEdges<f32> {
        self.border.plus(&self.padding)
    }

    /// The content-box size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_box_rect().size()
    }
}

/// The output of one width or height computation.
///
/// For an inline-axis result `margin_start` / `margin_end` are the
/// inline-start and inline-end margins; for a block-axis result they are
/// the block-start and block-end margins. `position` is only meaningful for
/// out-of-flow boxes, where it is the physical offset of the border box
/// from the left (or top) edge of the containing block's padding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LogicalExtentComputedValues {
    /// Border-box extent.
    pub extent: f32,
    /// Offset from the containing block.
    pub position: f32,
    /// Start-side margin.
    pub margin_start: f32,
    /// End-side margin.
    pub margin_end: f32,
}

/// The border shape for a laid-out box, in its own coordinate space.
///
/// [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
///
/// "Percentages: Refer to corresponding dimension of the border box."
#[must_use]
pub fn border_shape_for_box(style: &BoxStyle, geometry: &BoxGeometry) -> BorderShape {
    let border_rect = geometry.border_box_rect();
    BorderShape::shape_for_border_rect(
        border_rect,
        style.border_radius.resolve(border_rect.size()),
        geometry.border,
        ClosedEdges::ALL,
    )
}
