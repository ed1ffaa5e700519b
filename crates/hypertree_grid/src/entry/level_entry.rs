use glam::DVec3;

use super::{masked, root_origin, Entry};
use crate::error::{CursorError, CursorResult, GridError};
use crate::grid::{HyperTreeGrid, TreeIndex};

/// Position of one real tree cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelEntry {
  tree: Option<TreeIndex>,
  level: u32,
  index: u64,
  origin: DVec3,
}

impl LevelEntry {
  /// Raw field assignment, no validation.
  pub fn new(tree: Option<TreeIndex>, level: u32, index: u64, origin: DVec3) -> Self {
    Self {
      tree,
      level,
      index,
      origin,
    }
  }

  /// Place the entry at the root of tree `tree_index`, creating the tree
  /// when absent.
  pub fn initialize_or_create(&mut self, grid: &mut HyperTreeGrid, tree_index: TreeIndex) -> CursorResult<TreeIndex> {
    grid.get_or_create_tree(tree_index).map_err(|error| match error {
      GridError::TreeIndexOutOfRange {
        tree_index,
        number_of_trees,
      } => CursorError::TreeIndexOutOfRange {
        tree_index,
        number_of_trees,
      },
      _ => CursorError::NoTree,
    })?;
    *self = Self::new(Some(tree_index), 0, 0, grid.level_zero_origin(tree_index));
    Ok(tree_index)
  }

  /// Tree-local index.
  #[inline]
  pub fn index(&self) -> u64 {
    self.index
  }

  /// Subdivide the entry's cell if it is a leaf.
  pub fn subdivide_leaf(&self, grid: &mut HyperTreeGrid) -> CursorResult<()> {
    let tree_index = self.tree.ok_or(CursorError::NoTree)?;
    if let Some(global_index) = self.global_node_index(grid) {
      if grid.is_masked_index(global_index) {
        return Err(CursorError::Masked { global_index });
      }
    }
    let depth_limiter = grid.depth_limiter();
    if self.level >= depth_limiter {
      return Err(CursorError::DepthLimitReached {
        level: self.level,
        depth_limiter,
      });
    }
    let tree = grid.tree_mut(tree_index).ok_or(CursorError::NoTree)?;
    tree.subdivide_leaf(self.index, self.level);
    Ok(())
  }
}

impl Entry for LevelEntry {
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

  #[inline]
  fn vertex_id(&self) -> u64 {
    self.index
  }

  #[inline]
  fn origin(&self) -> DVec3 {
    self.origin
  }

  #[inline]
  fn global_node_index(&self, grid: &HyperTreeGrid) -> Option<u64> {
    self.tree(grid)?.global_index_from_local(self.index)
  }

  #[inline]
  fn is_masked(&self, grid: &HyperTreeGrid) -> bool {
    masked(grid, self.global_node_index(grid))
  }

  /// Leaf of its tree, or capped by the depth limiter.
  #[inline]
  fn is_leaf(&self, grid: &HyperTreeGrid) -> bool {
    if self.level == grid.depth_limiter() {
      return true;
    }
    self.tree(grid).map_or(true, |tree| tree.is_leaf(self.index))
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
    if tree.is_leaf(self.index) {
      return Err(CursorError::IsLeaf { level: self.level });
    }
    if let Some(global_index) = tree.global_index_from_local(self.index) {
      if grid.is_masked_index(global_index) {
        return Err(CursorError::Masked { global_index });
      }
    }

    let child_size = tree.scales().cell_size(self.level + 1);
    self.index = tree.elder_child_index(self.index) + ichild as u64;
    self.origin = grid.child_origin(self.origin, child_size, ichild);
    self.level += 1;
    Ok(())
  }
}
