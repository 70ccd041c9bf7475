//! 4×4 transformation matrices.
//!
//! [CSS Transforms Module Level 2 § 14 Mathematical Description of Transform Functions](https://www.w3.org/TR/css-transforms-2/#mathematical-description)
//!
//! Matrices use the column-vector convention: a point `p` maps to `M · p`.
//! `a.multiply(&b)` is `a · b`, so `b` is applied to the point first. This
//! matches the way a CSS `transform` function list reads left to right:
//! `translate(..) rotate(..)` is `T · R`, and the rotation happens first.

use serde::{Deserialize, Serialize};

use crate::point::{Offset, Point};
use crate::quad::Quad;
use crate::rect::Rect;

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1.0e-12;

/// A 4×4 matrix in `f64`, stored row-major as `m[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformationMatrix {
    m: [[f64; 4]; 4],
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformationMatrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Build a matrix from its rows.
    #[must_use]
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// The matrix rows.
    #[must_use]
    pub const fn rows(&self) -> &[[f64; 4]; 4] {
        &self.m
    }

    /// [§ 14 `matrix(a, b, c, d, e, f)`](https://www.w3.org/TR/css-transforms-1/#funcdef-transform-matrix)
    ///
    /// "specifies a 2D transformation in the form of a transformation matrix
    /// of the six values a-f."
    #[must_use]
    pub const fn from_affine(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self::from_rows([
            [a, c, 0.0, e],
            [b, d, 0.0, f],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// A 2D translation.
    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::from_affine(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A 2D scale about the origin.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::from_affine(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A clockwise 2D rotation about the origin (y axis points down).
    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_affine(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// A 2D skew by the given angles along the x and y axes.
    #[must_use]
    pub fn skew(x_degrees: f64, y_degrees: f64) -> Self {
        Self::from_affine(
            1.0,
            y_degrees.to_radians().tan(),
            x_degrees.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    /// `self · other`: `other` is applied first.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[row][k] * other.m[k][col]).sum();
            }
        }
        Self { m: out }
    }

    /// Translate before this transform (`self = self · T`), the way a
    /// trailing `translate()` in a CSS function list behaves.
    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        *self = self.multiply(&Self::translation(tx, ty));
        self
    }

    /// Translate after this transform (`self = T · self`).
    pub fn translate_right(&mut self, tx: f64, ty: f64) -> &mut Self {
        for col in 0..4 {
            self.m[0][col] += tx * self.m[3][col];
            self.m[1][col] += ty * self.m[3][col];
        }
        self
    }

    /// The 2D translation component.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn translation_offset(&self) -> Offset {
        Offset::new(self.m[0][3] as f32, self.m[1][3] as f32)
    }

    /// Whether this is exactly the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether this matrix only translates (in x, y or z).
    #[must_use]
    pub fn is_identity_or_translation(&self) -> bool {
        self.m
            .iter()
            .enumerate()
            .all(|(row, values)| {
                values.iter().enumerate().all(|(col, &v)| {
                    if col == 3 && row < 3 {
                        true
                    } else {
                        v == Self::IDENTITY.m[row][col]
                    }
                })
            })
    }

    /// Whether this matrix is a 2D affine transform (no z, no perspective).
    #[must_use]
    pub fn is_affine(&self) -> bool {
        let m = &self.m;
        m[0][2] == 0.0
            && m[1][2] == 0.0
            && m[2] == [0.0, 0.0, 1.0, 0.0]
            && m[3] == [0.0, 0.0, 0.0, 1.0]
    }

    /// The full 4×4 determinant.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        (0..4)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[0][col] * minor3(m, 0, col)
            })
            .sum()
    }

    /// The inverse, or `None` if the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        if self.is_identity_or_translation() {
            let mut inverse = *self;
            inverse.m[0][3] = -self.m[0][3];
            inverse.m[1][3] = -self.m[1][3];
            inverse.m[2][3] = -self.m[2][3];
            return Some(inverse);
        }

        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
            return None;
        }

        let mut out = [[0.0; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                // adjugate = transpose of the cofactor matrix
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                *cell = sign * minor3(&self.m, col, row) / det;
            }
        }
        Some(Self { m: out })
    }

    /// Map a point, with perspective division.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn map_point(&self, point: Point) -> Point {
        let (x, y) = (f64::from(point.x), f64::from(point.y));
        let m = &self.m;
        let mut mx = m[0][0] * x + m[0][1] * y + m[0][3];
        let mut my = m[1][0] * x + m[1][1] * y + m[1][3];
        let w = m[3][0] * x + m[3][1] * y + m[3][3];
        if w != 1.0 && w != 0.0 {
            mx /= w;
            my /= w;
        }
        Point::new(mx as f32, my as f32)
    }

    /// Map each corner of a quad.
    #[must_use]
    pub fn map_quad(&self, quad: &Quad) -> Quad {
        if self.is_identity_or_translation() {
            return quad.moved_by(self.translation_offset());
        }
        Quad::new(
            self.map_point(quad.p1),
            self.map_point(quad.p2),
            self.map_point(quad.p3),
            self.map_point(quad.p4),
        )
    }

    /// The bounding box of the mapped rect.
    #[must_use]
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        if self.is_identity_or_translation() {
            return rect.moved_by(self.translation_offset());
        }
        self.map_quad(&Quad::from_rect(rect)).bounding_box()
    }
}

/// Determinant of the 3×3 matrix left after deleting `skip_row` and
/// `skip_col`.
fn minor3(m: &[[f64; 4]; 4], skip_row: usize, skip_col: usize) -> f64 {
    let mut sub = [[0.0; 3]; 3];
    for (r, sub_row) in (0..4).filter(|&r| r != skip_row).zip(sub.iter_mut()) {
        for (c, cell) in (0..4).filter(|&c| c != skip_col).zip(sub_row.iter_mut()) {
            *cell = m[r][c];
        }
    }
    sub[0][0] * (sub[1][1] * sub[2][2] - sub[1][2] * sub[2][1])
        - sub[0][1] * (sub[1][0] * sub[2][2] - sub[1][2] * sub[2][0])
        + sub[0][2] * (sub[1][0] * sub[2][1] - sub[1][1] * sub[2][0])
}
