//! Hyper tree grids: adaptively refined Cartesian grids made of one tree per
//! level-zero cell, and the cursors that walk them.
//!
//! # Layout
//!
//! - [`grid`]: the grid, its trees and their per-level scales.
//! - [`entry`]: positional records (`tree, level, local index, origin`)
//!   that cursors are built from. The unlimited variant keeps descending
//!   past the real leaves.
//! - [`cursor`]: single-cell geometry cursors.
//! - [`super_cursor`]: cursors carrying a lazily refined Moore or Von
//!   Neumann neighborhood.
//! - [`locator`]: point search and segment intersection.
//! - [`filters`]: contouring, plane cutting, feature edges and gradients
//!   built on the cursors.
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use hypertree_grid::cursor::NonOrientedGeometryCursor;
//! use hypertree_grid::grid::{GridConfig, HyperTreeGrid};
//! use hypertree_grid::locator::HyperTreeGridLocator;
//!
//! let mut grid = HyperTreeGrid::new(GridConfig::default()).unwrap();
//! let mut cursor = NonOrientedGeometryCursor::new(&mut grid);
//! cursor.initialize_or_create(0).unwrap();
//! cursor.set_global_index_start(0).unwrap();
//! cursor.subdivide_leaf().unwrap();
//!
//! let locator = HyperTreeGridLocator::new(&grid);
//! assert_eq!(locator.search(DVec3::new(0.75, 0.25, 0.0)), Some(2));
//! ```

pub mod bounds;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod filters;
pub mod grid;
pub mod locator;
pub mod super_cursor;
pub mod tables;
pub mod test_utils;

pub use bounds::Bounds;
pub use cursor::{NonOrientedGeometryCursor, OrientedGeometryCursor, UnlimitedGeometryCursor};
pub use entry::{Entry, LevelEntry, UnlimitedLevelEntry};
pub use error::{CursorError, CursorResult, Error, FilterError, GridError};
pub use grid::{GridConfig, HyperTree, HyperTreeGrid, TreeIndex, INVALID_INDEX};
pub use locator::{HyperTreeGridLocator, LocatorConfig};
pub use super_cursor::{
  MooreSuperCursor, NeighborhoodKind, SuperCursor, UnlimitedMooreSuperCursor, VonNeumannSuperCursor,
};
