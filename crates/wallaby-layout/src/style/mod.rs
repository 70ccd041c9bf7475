//! Typed style inputs.
//!
//! Cascade and computed-value resolution happen upstream. By the time a box
//! reaches layout its style is a [`BoxStyle`]: every property is already a
//! typed value, and only percentages and keywords remain to be resolved
//! against layout-time bases.

/// Keyword-valued and compound properties.
pub mod keywords;
/// Symbolic lengths.
pub mod length;
/// Writing modes and logical directions.
pub mod writing_mode;

use serde::{Deserialize, Serialize};
use wallaby_geometry::{RectEdges, Size, TransformationMatrix};

pub use keywords::{
    AlignItems, AlignSelf, AspectRatio, BorderRadius, BoxShadow, BoxSizing, FlexDirection,
    FlexWrap, FloatSide, JustifyContent, LengthSize, Outline, Overflow, Position, TextAnchor,
    TextShadow, TransformOperation, TransformOrigin, box_shadow_outsets, text_shadow_outsets,
};
pub use length::{
    IntrinsicSizes, Length, float_value_for_length, intrinsic_value_for_length,
    minimum_value_for_length, value_for_length,
};
pub use writing_mode::{Direction, LogicalFlow, LogicalSide, WritingMode};

/// The resolved style of one box.
///
/// Physical properties (`margin`, `inset`, ...) are stored as authored; the
/// `logical_*` accessors map them through the box's writing mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoxStyle {
    /// `position`
    pub position: Position,
    /// `float`
    pub float: FloatSide,
    /// `box-sizing`
    pub box_sizing: BoxSizing,
    /// `writing-mode`
    pub writing_mode: WritingMode,
    /// `direction`
    pub direction: Direction,

    /// `width`
    pub width: Length,
    /// `height`
    pub height: Length,
    /// `min-width`
    pub min_width: Length,
    /// `min-height`
    pub min_height: Length,
    /// `max-width`
    pub max_width: Length,
    /// `max-height`
    pub max_height: Length,

    /// `margin-*`
    pub margin: RectEdges<Length>,
    /// `padding-*`
    pub padding: RectEdges<Length>,
    /// `border-*-width`, already resolved to pixels.
    pub border_width: RectEdges<f32>,
    /// `top` / `right` / `bottom` / `left`
    pub inset: RectEdges<Length>,

    /// `aspect-ratio`
    pub aspect_ratio: AspectRatio,
    /// `overflow-x`
    pub overflow_x: Overflow,
    /// `overflow-y`
    pub overflow_y: Overflow,

    /// `border-*-radius`
    pub border_radius: BorderRadius,
    /// `box-shadow`
    pub box_shadow: Vec<BoxShadow>,
    /// `border-image-outset`, already resolved to pixels.
    pub border_image_outset: RectEdges<f32>,
    /// `outline-width` / `outline-offset`
    pub outline: Outline,
    /// `transform`
    pub transform: Vec<TransformOperation>,
    /// `transform-origin`
    pub transform_origin: TransformOrigin,

    /// `flex-direction`
    pub flex_direction: FlexDirection,
    /// `flex-wrap`
    pub flex_wrap: FlexWrap,
    /// `justify-content`
    pub justify_content: JustifyContent,
    /// `align-items`
    pub align_items: AlignItems,
    /// `align-self`
    pub align_self: AlignSelf,
    /// `flex-grow`
    pub flex_grow: f32,
    /// `flex-shrink`
    pub flex_shrink: f32,
    /// `flex-basis`
    pub flex_basis: Length,

    /// `text-anchor`
    pub text_anchor: TextAnchor,
    /// `stroke-width`; zero means the text is not stroked.
    pub stroke_width: f32,
    /// `text-shadow`
    pub text_shadow: Vec<TextShadow>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            float: FloatSide::None,
            box_sizing: BoxSizing::ContentBox,
            writing_mode: WritingMode::HorizontalTb,
            direction: Direction::Ltr,
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            min_height: Length::Auto,
            max_width: Length::None,
            max_height: Length::None,
            margin: RectEdges::uniform(Length::ZERO),
            padding: RectEdges::uniform(Length::ZERO),
            border_width: RectEdges::ZERO,
            inset: RectEdges::uniform(Length::Auto),
            aspect_ratio: AspectRatio::Auto,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            border_radius: BorderRadius::default(),
            box_shadow: Vec::new(),
            border_image_outset: RectEdges::ZERO,
            outline: Outline::default(),
            transform: Vec::new(),
            transform_origin: TransformOrigin::default(),
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: AlignSelf::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Length::Auto,
            text_anchor: TextAnchor::Start,
            stroke_width: 0.0,
            text_shadow: Vec::new(),
        }
    }
}

impl BoxStyle {
    /// The writing mode and direction together.
    #[must_use]
    pub const fn flow(&self) -> LogicalFlow {
        LogicalFlow::new(self.writing_mode, self.direction)
    }

    /// Horizontal writing mode.
    #[must_use]
    pub const fn is_horizontal_writing_mode(&self) -> bool {
        self.writing_mode.is_horizontal()
    }

    const fn pick<T: Copy>(&self, horizontal: T, vertical: T) -> T {
        if self.is_horizontal_writing_mode() {
            horizontal
        } else {
            vertical
        }
    }

    /// The size property along the inline axis.
    #[must_use]
    pub const fn logical_width(&self) -> Length {
        self.pick(self.width, self.height)
    }

    /// The size property along the block axis.
    #[must_use]
    pub const fn logical_height(&self) -> Length {
        self.pick(self.height, self.width)
    }

    /// The min-size property along the inline axis.
    #[must_use]
    pub const fn logical_min_width(&self) -> Length {
        self.pick(self.min_width, self.min_height)
    }

    /// The max-size property along the inline axis.
    #[must_use]
    pub const fn logical_max_width(&self) -> Length {
        self.pick(self.max_width, self.max_height)
    }

    /// The min-size property along the block axis.
    #[must_use]
    pub const fn logical_min_height(&self) -> Length {
        self.pick(self.min_height, self.min_width)
    }

    /// The max-size property along the block axis.
    #[must_use]
    pub const fn logical_max_height(&self) -> Length {
        self.pick(self.max_height, self.max_width)
    }

    /// `margin-inline-start`, `margin-block-end`, ...
    #[must_use]
    pub const fn margin_for(&self, side: LogicalSide) -> Length {
        self.flow().get(&self.margin, side)
    }

    /// `padding-inline-start`, `padding-block-end`, ...
    #[must_use]
    pub const fn padding_for(&self, side: LogicalSide) -> Length {
        self.flow().get(&self.padding, side)
    }

    /// `inset-inline-start`, `inset-block-end`, ...
    #[must_use]
    pub const fn inset_for(&self, side: LogicalSide) -> Length {
        self.flow().get(&self.inset, side)
    }

    /// Whether an `aspect-ratio` other than `auto` is set.
    #[must_use]
    pub const fn has_aspect_ratio(&self) -> bool {
        !matches!(self.aspect_ratio, AspectRatio::Auto)
    }

    /// The specified aspect ratio expressed as inline size over block size.
    ///
    /// `None` for `auto` and for a degenerate ratio.
    #[must_use]
    pub fn logical_aspect_ratio(&self) -> Option<f32> {
        let ratio = self.aspect_ratio.ratio()?;
        Some(if self.is_horizontal_writing_mode() {
            ratio
        } else {
            1.0 / ratio
        })
    }

    /// [§ 5.1](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
    ///
    /// "If both auto and a `<ratio>` are specified together ... size
    /// calculations involving the aspect ratio always work with the content
    /// box dimensions."
    #[must_use]
    pub const fn box_sizing_for_aspect_ratio(&self) -> BoxSizing {
        match self.aspect_ratio {
            AspectRatio::AutoAndRatio(..) => BoxSizing::ContentBox,
            AspectRatio::Auto | AspectRatio::Ratio(..) => self.box_sizing,
        }
    }

    /// [§ 3 Scrolling and Clipping Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    ///
    /// Either axis clips.
    #[must_use]
    pub const fn has_non_visible_overflow(&self) -> bool {
        !self.overflow_x.is_visible() || !self.overflow_y.is_visible()
    }

    /// Either axis is a scroll container.
    #[must_use]
    pub const fn has_scrollable_overflow(&self) -> bool {
        self.overflow_x.is_scrollable() || self.overflow_y.is_scrollable()
    }

    /// `float` other than `none`.
    #[must_use]
    pub const fn is_floating(&self) -> bool {
        !matches!(self.float, FloatSide::None)
    }

    /// A non-empty `transform` list.
    #[must_use]
    pub fn has_transform(&self) -> bool {
        !self.transform.is_empty()
    }

    /// [CSS Transforms Level 1 § 9 The Transform Rendering Model](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
    ///
    /// "The transformation matrix is computed from the transform and
    /// transform-origin properties as follows:
    ///  1. Start with the identity matrix.
    ///  2. Translate by the computed X and Y of transform-origin.
    ///  3. Multiply by each of the transform functions in transform property
    ///     from left to right.
    ///  4. Translate by the negated computed X and Y values of
    ///     transform-origin."
    ///
    /// `None` when the box has no transform. The reference box is the
    /// border box.
    #[must_use]
    pub fn transform_matrix(&self, border_box: Size) -> Option<TransformationMatrix> {
        if self.transform.is_empty() {
            return None;
        }
        let origin_x = f64::from(float_value_for_length(self.transform_origin.x, border_box.width));
        let origin_y =
            f64::from(float_value_for_length(self.transform_origin.y, border_box.height));

        let mut matrix = TransformationMatrix::translation(origin_x, origin_y);
        for operation in &self.transform {
            matrix = matrix.multiply(&operation.to_matrix(border_box));
        }
        Some(matrix.multiply(&TransformationMatrix::translation(-origin_x, -origin_y)))
    }
}
