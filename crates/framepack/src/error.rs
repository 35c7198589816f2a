//! Error types for tree mutation and layout passes.
//!
//! Every error is returned synchronously to the caller of the mutating
//! [`Menu`](crate::Menu) method, and the tree is left exactly as it was before
//! the call.

use crate::layout::Axis;
use thiserror::Error;

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Content larger than a fixed container on an axis without a scrollbar.
    #[error("`{widget}` needs {required}px on the {axis} axis but only {available}px are available")]
    Sizing {
        widget: String,
        axis: Axis,
        required: f32,
        available: f32,
    },

    /// Top-level content does not fit the menu, regardless of frame scrolling.
    #[error("menu content overflows on the {axis} axis: {required}px needed, {available}px available")]
    Overflow {
        axis: Axis,
        required: f32,
        available: f32,
    },

    /// Too many top-level widgets for the configured column/row grid.
    #[error("menu grid holds {capacity} widgets but {count} were added")]
    GridOverflow { count: usize, capacity: usize },

    /// Packing a frame into itself or one of its descendants.
    #[error("cannot pack `{widget}` into `{frame}`: `{frame}` is `{widget}` or one of its descendants")]
    Cycle { widget: String, frame: String },

    #[error("widget id `{0}` is already used in this menu")]
    DuplicateId(String),

    #[error("invalid spacing: {0}")]
    InvalidSpacing(String),

    #[error("invalid size: {0}")]
    InvalidSize(String),

    #[error("`{0}` is already attached")]
    AlreadyAttached(String),

    #[error("`{0}` is not attached")]
    NotAttached(String),

    #[error("`{0}` is hidden, detached or not selectable")]
    NotSelectable(String),

    #[error("`{0}` is not a frame")]
    NotAFrame(String),

    #[error("unknown widget")]
    UnknownWidget,
}

impl LayoutError {
    /// Whether the solver rejected the tree (as opposed to an invalid call).
    pub fn is_layout_failure(&self) -> bool {
        matches!(
            self,
            LayoutError::Sizing { .. } | LayoutError::Overflow { .. } | LayoutError::GridOverflow { .. }
        )
    }
}
