//! Coordinate-space accumulation while walking up or down a box tree.
//!
//! Mapping a point from a deeply nested box to the root visits every
//! ancestor. Most steps are pure translations (the child's offset inside
//! its parent), so the state starts out tracking a plain 2D offset and only
//! switches to a 4×4 matrix when it meets a transform that is more than a
//! translation. The switch is one-way.

use wallaby_common::warning::warn_once;

use crate::point::{Offset, Point};
use crate::quad::Quad;
use crate::transform::TransformationMatrix;

/// Which way the walk maps coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyTransformDirection {
    /// Local to ancestor. Steps arrive innermost first and are composed on
    /// the left (`A = step · A`).
    ApplyTransform,
    /// Ancestor to local. Steps arrive outermost first, are composed on the
    /// right (`A = A · step`), and coordinates go through the inverse.
    UnapplyInverseTransform,
}

/// Whether a step keeps accumulating or flattens into the tracked
/// coordinates immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformAccumulation {
    /// Map the tracked coordinates now and reset the matrix to identity.
    FlattenTransform,
    /// Keep composing into the accumulated matrix.
    AccumulateTransform,
}

/// A mapped point plus whether the mapping had to fall back to identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    /// The mapped point.
    pub point: Point,
    /// The accumulated matrix could not be inverted.
    pub was_clamped: bool,
}

/// A mapped quad plus whether the mapping had to fall back to identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedQuad {
    /// The mapped quad.
    pub quad: Quad,
    /// The accumulated matrix could not be inverted.
    pub was_clamped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Accumulated {
    OffsetOnly(Offset),
    Matrix(TransformationMatrix),
}

/// Accumulator for one coordinate-mapping walk.
///
/// Tracks a point and optionally one or two quads. Created at the start of
/// the walk, fed one step per ancestor, read at the end.
#[derive(Debug, Clone)]
pub struct TransformState {
    direction: ApplyTransformDirection,
    accumulated: Accumulated,
    last_planar_point: Point,
    last_planar_quad: Option<Quad>,
    last_planar_second_quad: Option<Quad>,
    was_clamped: bool,
}

impl TransformState {
    /// Track a single point.
    #[must_use]
    pub const fn new(direction: ApplyTransformDirection, point: Point) -> Self {
        Self {
            direction,
            accumulated: Accumulated::OffsetOnly(Offset::ZERO),
            last_planar_point: point,
            last_planar_quad: None,
            last_planar_second_quad: None,
            was_clamped: false,
        }
    }

    /// Track a point and a quad.
    #[must_use]
    pub const fn new_with_quad(direction: ApplyTransformDirection, point: Point, quad: Quad) -> Self {
        let mut state = Self::new(direction, point);
        state.last_planar_quad = Some(quad);
        state
    }

    /// Track a second quad alongside the first (e.g. a repaint rect next to
    /// a hit-test rect).
    pub fn set_second_quad(&mut self, quad: Quad) {
        self.last_planar_second_quad = Some(quad);
    }

    /// The walk direction.
    #[must_use]
    pub const fn direction(&self) -> ApplyTransformDirection {
        self.direction
    }

    /// Whether a non-translation transform has promoted the state to a
    /// full matrix.
    #[must_use]
    pub const fn is_matrix_accumulated(&self) -> bool {
        matches!(self.accumulated, Accumulated::Matrix(_))
    }

    /// Whether any step so far had to map through a non-invertible matrix.
    #[must_use]
    pub const fn was_clamped(&self) -> bool {
        self.was_clamped
    }

    /// The pending translation while still offset-only.
    #[must_use]
    pub const fn accumulated_offset(&self) -> Option<Offset> {
        match self.accumulated {
            Accumulated::OffsetOnly(offset) => Some(offset),
            Accumulated::Matrix(_) => None,
        }
    }

    /// The pending transform as a matrix, whichever state we are in.
    #[must_use]
    pub fn accumulated_transform(&self) -> TransformationMatrix {
        match self.accumulated {
            Accumulated::OffsetOnly(offset) => {
                TransformationMatrix::translation(f64::from(offset.dx), f64::from(offset.dy))
            }
            Accumulated::Matrix(matrix) => matrix,
        }
    }

    /// Move by a translation step.
    pub fn move_by(&mut self, offset: Offset, accumulate: TransformAccumulation) {
        match &mut self.accumulated {
            Accumulated::OffsetOnly(current) => *current += offset,
            Accumulated::Matrix(matrix) => {
                let (tx, ty) = (f64::from(offset.dx), f64::from(offset.dy));
                match self.direction {
                    ApplyTransformDirection::ApplyTransform => {
                        let _ = matrix.translate_right(tx, ty);
                    }
                    ApplyTransformDirection::UnapplyInverseTransform => {
                        let _ = matrix.translate(tx, ty);
                    }
                }
                if accumulate == TransformAccumulation::FlattenTransform {
                    let _ = self.flatten();
                }
            }
        }
    }

    /// Apply a transform step.
    ///
    /// A pure translation is treated as [`Self::move_by`]. Anything else
    /// promotes the state to a matrix: the pending offset becomes the
    /// matrix's translation, then the step is composed in.
    ///
    /// Returns `false` if the step had to flatten through a non-invertible
    /// matrix.
    pub fn apply_transform(
        &mut self,
        transform: &TransformationMatrix,
        accumulate: TransformAccumulation,
    ) -> bool {
        if transform.is_identity_or_translation() {
            self.move_by(transform.translation_offset(), accumulate);
            return true;
        }

        let accumulated = self.accumulated_transform();
        let composed = match self.direction {
            ApplyTransformDirection::ApplyTransform => transform.multiply(&accumulated),
            ApplyTransformDirection::UnapplyInverseTransform => accumulated.multiply(transform),
        };
        self.accumulated = Accumulated::Matrix(composed);

        if accumulate == TransformAccumulation::FlattenTransform {
            return self.flatten();
        }
        true
    }

    /// Fold the pending transform into the tracked coordinates.
    ///
    /// Offset-only state just moves the coordinates. Matrix state maps them
    /// and resets the matrix to identity, but stays matrix-accumulated.
    /// Returns `false` if the mapping fell back to identity.
    pub fn flatten(&mut self) -> bool {
        match self.accumulated {
            Accumulated::OffsetOnly(offset) => {
                let adjusted = self.directed(offset);
                self.last_planar_point += adjusted;
                for quad in [&mut self.last_planar_quad, &mut self.last_planar_second_quad]
                    .into_iter()
                    .flatten()
                {
                    *quad = quad.moved_by(adjusted);
                }
                self.accumulated = Accumulated::OffsetOnly(Offset::ZERO);
                true
            }
            Accumulated::Matrix(matrix) => {
                let (mapping, clamped) = self.mapping_matrix(&matrix);
                self.last_planar_point = mapping.map_point(self.last_planar_point);
                for quad in [&mut self.last_planar_quad, &mut self.last_planar_second_quad]
                    .into_iter()
                    .flatten()
                {
                    *quad = mapping.map_quad(quad);
                }
                self.accumulated = Accumulated::Matrix(TransformationMatrix::IDENTITY);
                self.was_clamped |= clamped;
                !clamped
            }
        }
    }

    /// The tracked point mapped through everything accumulated so far.
    #[must_use]
    pub fn mapped_point(&self) -> MappedPoint {
        match self.accumulated {
            Accumulated::OffsetOnly(offset) => MappedPoint {
                point: self.last_planar_point + self.directed(offset),
                was_clamped: self.was_clamped,
            },
            Accumulated::Matrix(matrix) => {
                let (mapping, clamped) = self.mapping_matrix(&matrix);
                MappedPoint {
                    point: mapping.map_point(self.last_planar_point),
                    was_clamped: self.was_clamped || clamped,
                }
            }
        }
    }

    /// The tracked quad mapped through everything accumulated so far, if a
    /// quad is being tracked.
    #[must_use]
    pub fn mapped_quad(&self) -> Option<MappedQuad> {
        self.last_planar_quad.map(|quad| self.map_tracked_quad(&quad))
    }

    /// The second tracked quad, mapped.
    #[must_use]
    pub fn mapped_second_quad(&self) -> Option<MappedQuad> {
        self.last_planar_second_quad
            .map(|quad| self.map_tracked_quad(&quad))
    }

    fn map_tracked_quad(&self, quad: &Quad) -> MappedQuad {
        match self.accumulated {
            Accumulated::OffsetOnly(offset) => MappedQuad {
                quad: quad.moved_by(self.directed(offset)),
                was_clamped: self.was_clamped,
            },
            Accumulated::Matrix(matrix) => {
                let (mapping, clamped) = self.mapping_matrix(&matrix);
                MappedQuad {
                    quad: mapping.map_quad(quad),
                    was_clamped: self.was_clamped || clamped,
                }
            }
        }
    }

    /// Offsets move coordinates forwards when applying and backwards when
    /// unapplying.
    fn directed(&self, offset: Offset) -> Offset {
        match self.direction {
            ApplyTransformDirection::ApplyTransform => offset,
            ApplyTransformDirection::UnapplyInverseTransform => -offset,
        }
    }

    /// The matrix coordinates actually go through, and whether it had to
    /// fall back to identity.
    fn mapping_matrix(&self, accumulated: &TransformationMatrix) -> (TransformationMatrix, bool) {
        match self.direction {
            ApplyTransformDirection::ApplyTransform => (*accumulated, false),
            ApplyTransformDirection::UnapplyInverseTransform => {
                accumulated.inverse().map_or_else(
                    || {
                        warn_once(
                            "Geometry",
                            "non-invertible transform while unmapping coordinates; using identity",
                        );
                        (TransformationMatrix::IDENTITY, true)
                    },
                    |inverse| (inverse, false),
                )
            }
        }
    }
}
