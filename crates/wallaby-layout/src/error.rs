//! Layout errors.
//!
//! Most of these are recovered inside a layout pass: the offending box is
//! clamped to a safe value, the error is recorded as a diagnostic in the
//! [`LayoutReport`](crate::engine::LayoutReport), and the walk continues.
//! Only tree-structure errors and strict-mode passes surface as `Err`.

use thiserror::Error;

use crate::tree::BoxId;

/// Errors produced by the box tree and the layout engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A box that must have a containing block has none (it is detached
    /// from the view).
    #[error("box {0} has no containing block")]
    MissingContainingBlock(BoxId),

    /// `aspect-ratio` has a zero, negative, or non-finite component.
    #[error("box {0} has an unresolvable aspect ratio")]
    UnresolvableAspectRatio(BoxId),

    /// The id does not name a live box.
    #[error("unknown box {0}")]
    UnknownBox(BoxId),

    /// An insertion would make a box its own ancestor, or a layout walk
    /// re-entered a box that was still being laid out.
    #[error("cycle detected at box {0}")]
    CycleDetected(BoxId),

    /// The tree was mutated while a layout pass held it.
    #[error("box tree mutated during layout")]
    TreeMutatedDuringLayout,

    /// The tree or scene description is structurally invalid.
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
