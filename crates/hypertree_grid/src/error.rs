//! Error types for grid construction and cursor navigation.
//!
//! Cursor preconditions (descending into a leaf, climbing above the root,
//! subdividing a masked cell, ...) are reported as [`CursorError`]. Failed
//! operations leave the cursor where it was.
//!
//! Filters report [`FilterError`], which also wraps cursor failures.
//!
//! Not-found results of spatial queries are not errors: the locator returns
//! `None` for points outside the grid or hidden behind masked cells.

use thiserror::Error;

use crate::grid::TreeIndex;

/// Invalid cursor operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
  /// The cursor is not attached to a tree.
  #[error("cursor is not attached to a tree")]
  NoTree,

  /// `to_parent` was called on a cursor sitting at its root entry.
  #[error("cursor is already at its root")]
  AtRoot,

  /// Tried to descend into a leaf.
  #[error("cell at level {level} is a leaf")]
  IsLeaf { level: u32 },

  /// Child index outside `0..number_of_children`.
  #[error("child index {ichild} out of range (cell has {number_of_children} children)")]
  ChildOutOfRange {
    ichild: usize,
    number_of_children: usize,
  },

  /// Tried to descend into or subdivide a masked cell.
  #[error("cell with global index {global_index} is masked")]
  Masked { global_index: u64 },

  /// The operation would go past the grid depth limiter.
  #[error("level {level} is at the depth limiter ({depth_limiter})")]
  DepthLimitReached { level: u32, depth_limiter: u32 },

  /// Corner queries are only defined on Moore neighborhoods.
  #[error("operation requires a Moore neighborhood")]
  UnsupportedNeighborhood,

  /// Corner index outside `0..2^dimension`.
  #[error("corner {corner} out of range (cell has {number_of_corners} corners)")]
  CornerOutOfRange {
    corner: usize,
    number_of_corners: usize,
  },

  /// Neighbor cursor index outside `0..number_of_cursors`.
  #[error("neighbor index {index} out of range (super cursor has {number_of_cursors} cursors)")]
  NeighborOutOfRange {
    index: usize,
    number_of_cursors: usize,
  },

  /// `set_global_index_start` and `set_global_index_from_local` were mixed
  /// on the same tree.
  #[error("tree {tree_index} mixes implicit and explicit global indexing")]
  MixedGlobalIndexing { tree_index: TreeIndex },

  /// Tree index outside the level-zero grid.
  #[error("tree index {tree_index} out of range ({number_of_trees} level-zero cells)")]
  TreeIndexOutOfRange {
    tree_index: TreeIndex,
    number_of_trees: u64,
  },
}

/// Invalid grid description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
  /// No axis has more than one coordinate.
  #[error("grid must span at least one axis (got dimension {0})")]
  InvalidDimension(usize),

  /// Branch factor other than 2 or 3.
  #[error("branch factor must be 2 or 3 (got {0})")]
  InvalidBranchFactor(u32),

  /// An axis has no coordinates at all.
  #[error("axis {axis} has no coordinates")]
  EmptyAxis { axis: usize },

  /// Coordinates along an axis are not strictly increasing.
  #[error("coordinates along axis {axis} are not strictly increasing at position {position}")]
  NonMonotonicCoordinates { axis: usize, position: usize },

  /// Tree index outside the level-zero grid.
  #[error("tree index {tree_index} out of range ({number_of_trees} level-zero cells)")]
  TreeIndexOutOfRange {
    tree_index: TreeIndex,
    number_of_trees: u64,
  },
}

/// Failure of a filter pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
  #[error(transparent)]
  Cursor(#[from] CursorError),

  /// The cell field does not cover every global index of the grid.
  #[error("field has {len} values, grid needs {required}")]
  FieldTooShort { len: usize, required: usize },

  /// The filter does not handle grids of this dimension.
  #[error("filter does not support dimension {0}")]
  UnsupportedDimension(usize),

  /// The abort flag was raised between two trees.
  #[error("filter aborted")]
  Aborted,
}

/// Result alias for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Any failure of this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error(transparent)]
  Grid(#[from] GridError),

  #[error(transparent)]
  Cursor(#[from] CursorError),

  #[error(transparent)]
  Filter(#[from] FilterError),
}
