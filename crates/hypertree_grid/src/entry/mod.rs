//! Level entries: the positional records cursors are built from.
//!
//! An entry is `{tree, level, local index, origin}`. It never borrows the
//! grid. Every query takes the grid as a parameter, so entries are `Copy`
//! and can sit in flat pools.

mod level_entry;
mod unlimited_entry;

pub use level_entry::LevelEntry;
pub use unlimited_entry::UnlimitedLevelEntry;

use std::fmt::Debug;

use glam::DVec3;

use crate::bounds::Bounds;
use crate::error::CursorResult;
use crate::grid::{HyperTree, HyperTreeGrid, TreeIndex};

/// Shared contract of bounded and unlimited entries.
///
/// `Default` is the reset state: no tree, level 0.
pub trait Entry: Copy + Default + Debug {
  /// Place the entry at the root of tree `tree_index`.
  ///
  /// Returns the tree index when the tree exists. Otherwise the entry is
  /// left without a tree and `None` is returned.
  fn initialize(&mut self, grid: &HyperTreeGrid, tree_index: TreeIndex) -> Option<TreeIndex>;

  /// Detach from any tree.
  fn reset(&mut self) {
    *self = Self::default();
  }

  fn tree_index(&self) -> Option<TreeIndex>;

  fn level(&self) -> u32;

  /// Tree-local index identifying the entry's cell in its tree.
  fn vertex_id(&self) -> u64;

  fn origin(&self) -> DVec3;

  fn global_node_index(&self, grid: &HyperTreeGrid) -> Option<u64>;

  fn is_masked(&self, grid: &HyperTreeGrid) -> bool;

  fn is_leaf(&self, grid: &HyperTreeGrid) -> bool;

  /// Descend into child `ichild`. On error the entry is unchanged.
  fn to_child(&mut self, grid: &HyperTreeGrid, ichild: usize) -> CursorResult<()>;

  #[inline]
  fn has_tree(&self) -> bool {
    self.tree_index().is_some()
  }

  #[inline]
  fn tree<'g>(&self, grid: &'g HyperTreeGrid) -> Option<&'g HyperTree> {
    self.tree_index().and_then(|index| grid.tree(index))
  }

  /// Ghost flag of the entry's cell.
  #[inline]
  fn is_ghost(&self, grid: &HyperTreeGrid) -> bool {
    self
      .global_node_index(grid)
      .is_some_and(|global| grid.is_ghost_index(global))
  }

  /// Cell size at the entry's current level.
  #[inline]
  fn size(&self, grid: &HyperTreeGrid) -> DVec3 {
    self
      .tree(grid)
      .map_or(DVec3::ZERO, |tree| tree.scales().cell_size(self.level()))
  }

  #[inline]
  fn bounds(&self, grid: &HyperTreeGrid) -> Bounds {
    Bounds::from_origin_size(self.origin(), self.size(grid))
  }

  /// Cell center.
  #[inline]
  fn point(&self, grid: &HyperTreeGrid) -> DVec3 {
    self.origin() + self.size(grid) * 0.5
  }
}

/// Origin of the root of `tree_index`, or zero when out of range.
pub(crate) fn root_origin(grid: &HyperTreeGrid, tree_index: TreeIndex) -> DVec3 {
  if tree_index < grid.number_of_trees() {
    grid.level_zero_origin(tree_index)
  } else {
    DVec3::ZERO
  }
}

/// Mask lookup of an optional global index.
#[inline]
pub(crate) fn masked(grid: &HyperTreeGrid, global: Option<u64>) -> bool {
  global.is_some_and(|global| grid.is_masked_index(global))
}
