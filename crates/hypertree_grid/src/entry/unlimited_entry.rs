use glam::DVec3;

use super::{masked, root_origin, Entry};
use crate::error::{CursorError, CursorResult};
use crate::grid::{HyperTreeGrid, TreeIndex, INVALID_INDEX};

/// Level entry that keeps descending past the real depth of its tree.
///
/// Once the backing tree has no child to descend into, `index` becomes
/// [`INVALID_INDEX`] while `level` and `origin` keep following the
/// geometric subdivision. `last_real_index` / `last_real_level` remember
/// the deepest real cell on the path; mask and global index queries answer
/// for that cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnlimitedLevelEntry {
  tree: Option<TreeIndex>,
  level: u32,
  index: u64,
  origin: DVec3,
  last_real_index: u64,
  last_real_level: u32,
}

impl UnlimitedLevelEntry {
  /// Raw field assignment for a real cell, no validation.
  pub fn new(tree: Option<TreeIndex>, level: u32, index: u64, origin: DVec3) -> Self {
    Self {
      tree,
      level,
      index,
      origin,
      last_real_index: index,
      last_real_level: level,
    }
  }

  /// Tree-local index, [`INVALID_INDEX`] in virtual territory.
  #[inline]
  pub fn index(&self) -> u64 {
    self.index
  }

  #[inline]
  pub fn last_real_index(&self) -> u64 {
    self.last_real_index
  }

  #[inline]
  pub fn last_real_level(&self) -> u32 {
    self.last_real_level
  }

  /// Real cell that is a tree leaf or capped by the depth limiter.
  ///
  /// Virtual cells are never real leaves, including at the depth limiter.
  pub fn is_real_leaf(&self, grid: &HyperTreeGrid) -> bool {
    if self.index != self.last_real_index {
      return false;
    }
    self.level == grid.depth_limiter() || self.tree(grid).map_or(true, |tree| tree.is_leaf(self.index))
  }

  /// Cell below the last real cell of the path, or past the depth limiter.
  pub fn is_virtual_leaf(&self, grid: &HyperTreeGrid) -> bool {
    self.level > grid.depth_limiter() || self.index != self.last_real_index
  }

  /// Fraction of the last real cell covered by this cell.
  pub fn extensive_property_ratio(&self, grid: &HyperTreeGrid) -> f64 {
    let virtual_levels = (self.level - self.last_real_level) as i32;
    (grid.branch_factor() as f64).powi(-virtual_levels * grid.dimension() as i32)
  }
}

impl Entry for UnlimitedLevelEntry {
  fn initialize(&mut self, grid: &HyperTreeGrid, tree_index: TreeIndex) -> Option<TreeIndex> {
    let tree = grid.tree(tree_index).map(|_| tree_index);
    *self = Self::new(tree, 0, 0, root_origin(grid, tree_index));
    tree
  }

  #[inline]
  fn tree_index(&self) -> Option<TreeIndex> {
    self.tree
  }

  #[inline]
  fn level(&self) -> u32 {
    self.level
  }

  /// The last real cell, constant through virtual descent.
  #[inline]
  fn vertex_id(&self) -> u64 {
    self.last_real_index
  }

  #[inline]
  fn origin(&self) -> DVec3 {
    self.origin
  }

  #[inline]
  fn global_node_index(&self, grid: &HyperTreeGrid) -> Option<u64> {
    self.tree(grid)?.global_index_from_local(self.last_real_index)
  }

  #[inline]
  fn is_masked(&self, grid: &HyperTreeGrid) -> bool {
    masked(grid, self.global_node_index(grid))
  }

  /// Only the depth limiter stops an unlimited entry.
  #[inline]
  fn is_leaf(&self, grid: &HyperTreeGrid) -> bool {
    self.level >= grid.depth_limiter()
  }

  fn to_child(&mut self, grid: &HyperTreeGrid, ichild: usize) -> CursorResult<()> {
    let tree = self.tree(grid).ok_or(CursorError::NoTree)?;
    let number_of_children = tree.number_of_children();
    if ichild >= number_of_children {
      return Err(CursorError::ChildOutOfRange {
        ichild,
        number_of_children,
      });
    }
    let depth_limiter = grid.depth_limiter();
    if self.level >= depth_limiter {
      return Err(CursorError::DepthLimitReached {
        level: self.level,
        depth_limiter,
      });
    }
    if let Some(global_index) = tree.global_index_from_local(self.last_real_index) {
      if grid.is_masked_index(global_index) {
        return Err(CursorError::Masked { global_index });
      }
    }

    let elder_child = if self.index == INVALID_INDEX {
      INVALID_INDEX
    } else {
      tree.elder_child_index(self.index)
    };
    let child_size = tree.scales().cell_size(self.level + 1);
    self.level += 1;
    self.origin = grid.child_origin(self.origin, child_size, ichild);
    if elder_child == INVALID_INDEX {
      self.index = INVALID_INDEX;
    } else {
      self.index = elder_child + ichild as u64;
      self.last_real_index = self.index;
      self.last_real_level = self.level;
    }
    Ok(())
  }
}
