//! Keyword-valued and compound style properties.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use wallaby_geometry::{CornerRadii, RectEdges, Size, TransformationMatrix};

use super::length::{Length, float_value_for_length};

/// [§ 9.3.1 Choosing a positioning scheme: 'position' property](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "The 'position' and 'float' properties determine which of the CSS 2
/// positioning algorithms is used to calculate the position of a box."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but the box is fixed with respect to some reference."
    Fixed,
}

impl Position {
    /// Absolute or fixed: removed from normal flow.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }

    /// "An element is said to be positioned if its 'position' property has
    /// a value other than 'static'."
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// [§ 4.4 box-sizing](https://www.w3.org/TR/css-box-4/#box-sizing)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSizing {
    /// "'width' and 'height' ... are measured to the content box."
    #[default]
    ContentBox,
    /// "'width' and 'height' ... are measured to the border box."
    BorderBox,
}

/// [§ 3 Scrolling and Clipping Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Overflow {
    /// "There is no special handling of overflow."
    #[default]
    Visible,
    /// Clipped, scrollable programmatically.
    Hidden,
    /// Clipped, not scrollable.
    Clip,
    /// Clipped, always shows a scrolling mechanism.
    Scroll,
    /// Clipped, scrolling mechanism when needed.
    Auto,
}

impl Overflow {
    /// Anything but `visible` clips.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Clips into a scroll container.
    #[must_use]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Hidden | Self::Scroll | Self::Auto)
    }
}

/// [§ 9.5.1 Positioning the float: the 'float' property](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FloatSide {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to 'left', except the box is floated to the right."
    Right,
}

/// [§ 5.1 Flex Flow Direction: the flex-direction property](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// "The flex container's main axis has the same orientation as the
    /// inline axis of the current writing mode."
    #[default]
    Row,
    /// "Same as row, except the main-start and main-end directions are
    /// swapped."
    RowReverse,
    /// "The flex container's main axis has the same orientation as the
    /// block axis of the current writing mode."
    Column,
    /// "Same as column, except the main-start and main-end directions are
    /// swapped."
    ColumnReverse,
}

impl FlexDirection {
    /// The main axis is the inline axis.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Main-start and main-end are swapped.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// [§ 5.2 Flex Line Wrapping: the flex-wrap property](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexWrap {
    /// "The flex container is single-line."
    #[default]
    Nowrap,
    /// "The flex container is multi-line."
    Wrap,
    /// "Same as wrap."
    WrapReverse,
}

/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JustifyContent {
    /// "Flex items are packed toward the start of the line."
    #[default]
    FlexStart,
    /// "Flex items are packed toward the end of the line."
    FlexEnd,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size
    /// spaces on either end."
    SpaceAround,
    /// [§ 6.1 Distributed Alignment](https://www.w3.org/TR/css-align-3/#valdef-align-content-space-evenly)
    ///
    /// "The alignment subjects are evenly distributed in the alignment
    /// container, with a full-size space on either end."
    SpaceEvenly,
}

/// [§ 8.3 Cross-axis Alignment: the align-items and align-self properties](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignItems {
    /// "If the cross size property of the flex item computes to auto, and
    /// neither of the cross-axis margins are auto, the flex item is
    /// stretched."
    #[default]
    Stretch,
    /// "The cross-start margin edge of the flex item is placed flush with
    /// the cross-start edge of the line."
    FlexStart,
    /// "The cross-end margin edge of the flex item is placed flush with the
    /// cross-end edge of the line."
    FlexEnd,
    /// "The flex item's margin box is centered in the cross axis within the
    /// line."
    Center,
}

/// `align-self`: `auto` defers to the container's `align-items`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignSelf {
    /// Use the parent's `align-items`.
    #[default]
    Auto,
    /// See [`AlignItems::Stretch`].
    Stretch,
    /// See [`AlignItems::FlexStart`].
    FlexStart,
    /// See [`AlignItems::FlexEnd`].
    FlexEnd,
    /// See [`AlignItems::Center`].
    Center,
}

impl AlignSelf {
    /// The used alignment given the container's `align-items`.
    #[must_use]
    pub const fn resolve(self, align_items: AlignItems) -> AlignItems {
        match self {
            Self::Auto => align_items,
            Self::Stretch => AlignItems::Stretch,
            Self::FlexStart => AlignItems::FlexStart,
            Self::FlexEnd => AlignItems::FlexEnd,
            Self::Center => AlignItems::Center,
        }
    }
}

/// [SVG 2 § 11.10.1.1 The 'text-anchor' property](https://www.w3.org/TR/SVG2/text.html#TextAnchoringProperties)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextAnchor {
    /// "The rendered characters are aligned such that the start of the
    /// resulting rendered text is at the initial current text position."
    #[default]
    Start,
    /// "The rendered characters are shifted such that the geometric middle
    /// of the resulting rendered text is at the initial current text
    /// position."
    Middle,
    /// "The rendered characters are shifted such that the end of the
    /// resulting rendered text is at the initial current text position."
    End,
}

/// [§ 5.1 Preferred Aspect Ratios: the aspect-ratio property](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectRatio {
    /// "Replaced elements with a natural aspect ratio use that aspect ratio;
    /// otherwise the box has no preferred aspect ratio."
    #[default]
    Auto,
    /// `<width> / <height>`
    Ratio(f32, f32),
    /// "If both auto and a `<ratio>` are specified together, the preferred
    /// aspect ratio is the specified ratio of width / height unless it is a
    /// replaced element with a natural aspect ratio, in which case that
    /// aspect ratio is used instead. In all cases, size calculations
    /// involving the aspect ratio always work with the content box
    /// dimensions."
    AutoAndRatio(f32, f32),
}

impl AspectRatio {
    /// The width-over-height ratio, if one was specified and usable.
    #[must_use]
    pub fn ratio(self) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Ratio(width, height) | Self::AutoAndRatio(width, height) => {
                let ratio = width / height;
                (width > 0.0 && height > 0.0 && ratio.is_finite()).then_some(ratio)
            }
        }
    }

    /// A ratio was specified but has a zero, negative, or non-finite
    /// component.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !matches!(self, Self::Auto) && self.ratio().is_none()
    }
}

/// A width/height pair of lengths (one corner's radii).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LengthSize {
    /// Horizontal component.
    pub width: Length,
    /// Vertical component.
    pub height: Length,
}

impl LengthSize {
    /// The same length in both components.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        Self {
            width: length,
            height: length,
        }
    }

    /// Resolve against a box size: horizontal percentages against the
    /// width, vertical ones against the height.
    #[must_use]
    pub fn resolve(&self, size: Size) -> Size {
        Size::new(
            float_value_for_length(self.width, size.width).max(0.0),
            float_value_for_length(self.height, size.height).max(0.0),
        )
    }
}

/// [§ 5.1 Curve Radii: the border-radius properties](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BorderRadius {
    /// `border-top-left-radius`
    pub top_left: LengthSize,
    /// `border-top-right-radius`
    pub top_right: LengthSize,
    /// `border-bottom-left-radius`
    pub bottom_left: LengthSize,
    /// `border-bottom-right-radius`
    pub bottom_right: LengthSize,
}

impl Default for BorderRadius {
    fn default() -> Self {
        Self::uniform(Length::ZERO)
    }
}

impl BorderRadius {
    /// The same radius on every corner.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        let corner = LengthSize::uniform(length);
        Self {
            top_left: corner,
            top_right: corner,
            bottom_left: corner,
            bottom_right: corner,
        }
    }

    /// "Percentages: Refer to corresponding dimension of the border box."
    #[must_use]
    pub fn resolve(&self, border_box: Size) -> CornerRadii {
        CornerRadii {
            top_left: self.top_left.resolve(border_box),
            top_right: self.top_right.resolve(border_box),
            bottom_left: self.bottom_left.resolve(border_box),
            bottom_right: self.bottom_right.resolve(border_box),
        }
    }
}

/// How far a blur of `radius` visibly extends past the shadow's edge.
///
/// A Gaussian blur never quite reaches zero, but at 1.4× the radius it is
/// below one 8-bit step.
fn blur_painting_extent(radius: f32) -> f32 {
    (radius.max(0.0) * 1.4).ceil()
}

/// [§ 7.1 Drop Shadows: the box-shadow property](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoxShadow {
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Blur radius.
    pub blur: f32,
    /// Spread distance.
    pub spread: f32,
    /// Inner shadows never paint outside the border box.
    pub inset: bool,
}

/// [§ 2 Text Shadows: the text-shadow property](https://www.w3.org/TR/css-text-decor-3/#text-shadow-property)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextShadow {
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Blur radius.
    pub blur: f32,
}

/// Outsets (all non-negative) covering every outer box shadow.
#[must_use]
pub fn box_shadow_outsets(shadows: &[BoxShadow]) -> RectEdges<f32> {
    shadow_outsets(shadows.iter().filter(|shadow| !shadow.inset).map(|shadow| {
        (
            shadow.offset_x,
            shadow.offset_y,
            blur_painting_extent(shadow.blur) + shadow.spread,
        )
    }))
}

/// Outsets (all non-negative) covering every text shadow.
#[must_use]
pub fn text_shadow_outsets(shadows: &[TextShadow]) -> RectEdges<f32> {
    shadow_outsets(
        shadows
            .iter()
            .map(|shadow| (shadow.offset_x, shadow.offset_y, blur_painting_extent(shadow.blur))),
    )
}

fn shadow_outsets(shadows: impl Iterator<Item = (f32, f32, f32)>) -> RectEdges<f32> {
    let (mut top, mut right, mut bottom, mut left) = (0.0_f32, 0.0_f32, 0.0_f32, 0.0_f32);
    for (x, y, extent) in shadows {
        top = top.min(y - extent);
        right = right.max(x + extent);
        bottom = bottom.max(y + extent);
        left = left.min(x - extent);
    }
    RectEdges::new(-top, right, bottom, -left)
}

/// [§ 3 Outline Properties](https://www.w3.org/TR/css-ui-4/#outline-props)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Outline {
    /// `outline-width`; zero means no outline.
    pub width: f32,
    /// `outline-offset`
    pub offset: f32,
}

impl Outline {
    /// How far the outline reaches past the border box.
    #[must_use]
    pub fn size(&self) -> f32 {
        if self.width > 0.0 {
            (self.width + self.offset).max(0.0)
        } else {
            0.0
        }
    }
}

/// [CSS Transforms Level 2 § 13 Transform Functions](https://www.w3.org/TR/css-transforms-2/#transform-functions)
///
/// A single 2D transform function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformOperation {
    /// `translate(x, y)`; percentages refer to the reference box.
    Translate {
        /// Horizontal translation.
        x: Length,
        /// Vertical translation.
        y: Length,
    },
    /// `scale(x, y)`
    Scale {
        /// Horizontal factor.
        x: f32,
        /// Vertical factor.
        y: f32,
    },
    /// `rotate(<angle>)` in degrees.
    Rotate {
        /// Clockwise rotation in degrees.
        degrees: f32,
    },
    /// `skew(x, y)` in degrees.
    Skew {
        /// Horizontal skew angle.
        x: f32,
        /// Vertical skew angle.
        y: f32,
    },
    /// `matrix(a, b, c, d, e, f)`
    Matrix([f64; 6]),
}

impl TransformOperation {
    /// The matrix for this function given the reference box size.
    #[must_use]
    pub fn to_matrix(&self, reference_box: Size) -> TransformationMatrix {
        match *self {
            Self::Translate { x, y } => TransformationMatrix::translation(
                f64::from(float_value_for_length(x, reference_box.width)),
                f64::from(float_value_for_length(y, reference_box.height)),
            ),
            Self::Scale { x, y } => TransformationMatrix::scale(f64::from(x), f64::from(y)),
            Self::Rotate { degrees } => TransformationMatrix::rotation(f64::from(degrees)),
            Self::Skew { x, y } => TransformationMatrix::skew(f64::from(x), f64::from(y)),
            Self::Matrix([a, b, c, d, e, f]) => TransformationMatrix::from_affine(a, b, c, d, e, f),
        }
    }
}

/// [CSS Transforms Level 1 § 6 The transform-origin property](https://www.w3.org/TR/css-transforms-1/#transform-origin-property)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOrigin {
    /// Horizontal origin; percentages refer to the border box width.
    pub x: Length,
    /// Vertical origin; percentages refer to the border box height.
    pub y: Length,
}

impl Default for TransformOrigin {
    /// "Initial: 50% 50%"
    fn default() -> Self {
        Self {
            x: Length::Percent(50.0),
            y: Length::Percent(50.0),
        }
    }
}
