//! Symbolic lengths and their resolution against a basis.
//!
//! [§ 4 Distance Units: the `<length>` type](https://www.w3.org/TR/css-values-4/#lengths)
//!
//! Styles arrive already cascaded and computed, so every length is one of a
//! handful of shapes: an absolute pixel value, a percentage of some basis,
//! a `calc()` sum of the two, or a keyword. Resolution happens at layout
//! time, when the basis (usually the containing block's width) is known.

use serde::{Deserialize, Serialize};

/// A computed length value.
///
/// Serialized as kebab-case, externally tagged: `"auto"`, `{"fixed": 10}`,
/// `{"percent": 50}`, `{"calc": {"px": 10, "percent": 50}}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Length {
    /// `auto`
    #[default]
    Auto,
    /// `normal`
    Normal,
    /// An absolute length in CSS pixels.
    Fixed(f32),
    /// A percentage of the basis.
    Percent(f32),
    /// [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#calc-notation)
    ///
    /// `calc(<px> + <percent>%)`, already simplified to one of each.
    Calc {
        /// The absolute part.
        px: f32,
        /// The percentage part.
        percent: f32,
    },
    /// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#sizing-values)
    ///
    /// `min-content`
    MinContent,
    /// `max-content`
    MaxContent,
    /// `fit-content`
    FitContent,
    /// `-webkit-fill-available` / `stretch`
    FillAvailable,
    /// `none` (only meaningful for `max-width` / `max-height`).
    None,
}

impl Length {
    /// `0px`.
    pub const ZERO: Self = Self::Fixed(0.0);

    /// `auto`
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// `none`
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// An absolute length.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// A percentage or a `calc()` with a percentage part.
    #[must_use]
    pub const fn is_percent_or_calc(self) -> bool {
        matches!(self, Self::Percent(_) | Self::Calc { .. })
    }

    /// A numeric length: fixed, percentage, or `calc()`.
    #[must_use]
    pub const fn is_specified(self) -> bool {
        matches!(self, Self::Fixed(_) | Self::Percent(_) | Self::Calc { .. })
    }

    /// One of the content-based sizing keywords.
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        matches!(
            self,
            Self::MinContent | Self::MaxContent | Self::FitContent | Self::FillAvailable
        )
    }

    /// `auto` or a content-based keyword.
    #[must_use]
    pub const fn is_intrinsic_or_auto(self) -> bool {
        self.is_auto() || self.is_intrinsic()
    }

    /// The pixel value of a fixed length.
    #[must_use]
    pub const fn fixed_value(self) -> Option<f32> {
        match self {
            Self::Fixed(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the length resolves to more than zero against a positive
    /// basis.
    #[must_use]
    pub fn is_positive(self) -> bool {
        match self {
            Self::Fixed(value) | Self::Percent(value) => value > 0.0,
            Self::Calc { px, percent } => px > 0.0 || percent > 0.0,
            _ => false,
        }
    }

    /// Evaluate a numeric length against `basis`.
    fn evaluate(self, basis: impl FnOnce() -> f32) -> Option<f32> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Percent(percent) => Some(basis() * percent / 100.0),
            Self::Calc { px, percent } => Some(percent.mul_add(basis() / 100.0, px)),
            _ => None,
        }
    }
}

/// The min-content and max-content inline sizes of a box.
///
/// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IntrinsicSizes {
    /// The min-content size.
    pub min: f32,
    /// The max-content size.
    pub max: f32,
}

impl IntrinsicSizes {
    /// Create intrinsic sizes, keeping `min <= max`.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Both sizes offset by `amount` (border and padding, margins).
    #[must_use]
    pub fn expanded_by(self, amount: f32) -> Self {
        Self {
            min: self.min + amount,
            max: self.max + amount,
        }
    }

    /// [§ 5.1](https://www.w3.org/TR/css-sizing-3/#fit-content-size)
    ///
    /// "max(min-content size, min(max-content size, stretch-fit size))"
    #[must_use]
    pub fn fit_content(self, available: f32) -> f32 {
        self.min.max(self.max.min(available))
    }
}

/// Resolve `length` with `auto`-like values filling the basis.
///
/// The basis is a thunk so that callers never compute an expensive basis
/// (typically the containing block's width) for a length that does not
/// need it: fixed lengths never call it.
///
/// `auto`, `normal` and `fill-available` resolve to the basis. The
/// content-based keywords and `none` resolve to zero here; sizing code
/// resolves them through [`intrinsic_value_for_length`] first.
pub fn value_for_length(length: Length, basis: impl FnOnce() -> f32) -> f32 {
    match length {
        Length::Fixed(_) | Length::Percent(_) | Length::Calc { .. } => {
            length.evaluate(basis).unwrap_or(0.0)
        }
        Length::Auto | Length::Normal | Length::FillAvailable => basis(),
        Length::MinContent | Length::MaxContent | Length::FitContent | Length::None => 0.0,
    }
}

/// Resolve `length` with every non-numeric value treated as zero.
///
/// Used for margins and padding, where `auto` means "no minimum".
pub fn minimum_value_for_length(length: Length, basis: impl FnOnce() -> f32) -> f32 {
    length.evaluate(basis).unwrap_or(0.0)
}

/// [`value_for_length`] with an eagerly computed basis.
#[must_use]
pub fn float_value_for_length(length: Length, basis: f32) -> f32 {
    value_for_length(length, || basis)
}

/// Resolve a content-based keyword.
///
/// `min-content` and `max-content` map to the box's preferred widths,
/// `fit-content` clamps `available` between them, and `fill-available`
/// is `available` itself. Any other length returns `None` without calling
/// `sizes`.
pub fn intrinsic_value_for_length(
    length: Length,
    available: f32,
    sizes: impl FnOnce() -> IntrinsicSizes,
) -> Option<f32> {
    match length {
        Length::MinContent => Some(sizes().min),
        Length::MaxContent => Some(sizes().max),
        Length::FitContent => Some(sizes().fit_content(available)),
        Length::FillAvailable => Some(available),
        _ => None,
    }
}
