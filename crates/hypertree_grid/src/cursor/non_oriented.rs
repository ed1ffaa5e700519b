use std::ops::{Deref, DerefMut};

use glam::DVec3;

use crate::bounds::Bounds;
use crate::entry::{Entry, LevelEntry};
use crate::error::{CursorError, CursorResult};
use crate::grid::{HyperTree, HyperTreeGrid, TreeIndex};

/// Cursor keeping the whole descent path, so `to_parent` is O(1).
///
/// `entries[last_valid_entry]` is the current cell. `to_parent` only moves
/// the watermark back. The stale child entry stays in place and is
/// overwritten by the next `to_child`.
#[derive(Clone, Debug)]
pub struct NonOrientedGeometryCursor<G: Deref<Target = HyperTreeGrid>> {
  grid: G,
  last_valid_entry: usize,
  entries: Vec<LevelEntry>,
}

impl<G: Deref<Target = HyperTreeGrid>> NonOrientedGeometryCursor<G> {
  /// Detached cursor. Attach it with [`Self::initialize`].
  pub fn new(grid: G) -> Self {
    Self {
      grid,
      last_valid_entry: 0,
      entries: vec![LevelEntry::default()],
    }
  }

  /// Cursor whose root is `entry`, possibly below the tree root.
  pub fn from_entry(grid: G, entry: LevelEntry) -> Self {
    Self {
      grid,
      last_valid_entry: 0,
      entries: vec![entry],
    }
  }

  /// Move to the root of tree `tree_index`. Returns `None` when the tree
  /// is absent.
  pub fn initialize(&mut self, tree_index: TreeIndex) -> Option<TreeIndex> {
    self.last_valid_entry = 0;
    self.entries[0].initialize(&self.grid, tree_index)
  }

  #[inline]
  pub fn grid(&self) -> &HyperTreeGrid {
    &self.grid
  }

  #[inline]
  pub fn entry(&self) -> &LevelEntry {
    &self.entries[self.last_valid_entry]
  }

  #[inline]
  pub fn tree_index(&self) -> Option<TreeIndex> {
    self.entry().tree_index()
  }

  #[inline]
  pub fn tree(&self) -> Option<&HyperTree> {
    self.entry().tree(&self.grid)
  }

  #[inline]
  pub fn has_tree(&self) -> bool {
    self.entry().has_tree()
  }

  #[inline]
  pub fn vertex_id(&self) -> u64 {
    self.entry().vertex_id()
  }

  #[inline]
  pub fn global_node_index(&self) -> Option<u64> {
    self.entry().global_node_index(&self.grid)
  }

  #[inline]
  pub fn level(&self) -> u32 {
    self.entry().level()
  }

  #[inline]
  pub fn origin(&self) -> DVec3 {
    self.entry().origin()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.entry().size(&self.grid)
  }

  #[inline]
  pub fn bounds(&self) -> Bounds {
    self.entry().bounds(&self.grid)
  }

  /// Cell center.
  #[inline]
  pub fn point(&self) -> DVec3 {
    self.entry().point(&self.grid)
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.entry().is_leaf(&self.grid)
  }

  #[inline]
  pub fn is_masked(&self) -> bool {
    self.entry().is_masked(&self.grid)
  }

  #[inline]
  pub fn is_ghost(&self) -> bool {
    self.entry().is_ghost(&self.grid)
  }

  /// True at the entry the cursor was initialized at.
  #[inline]
  pub fn is_root(&self) -> bool {
    self.last_valid_entry == 0
  }

  #[inline]
  pub fn number_of_children(&self) -> usize {
    self.grid.number_of_children()
  }

  pub fn to_child(&mut self, ichild: usize) -> CursorResult<()> {
    let mut child = *self.entry();
    child.to_child(&self.grid, ichild)?;
    let next = self.last_valid_entry + 1;
    if next == self.entries.len() {
      self.entries.push(child);
    } else {
      self.entries[next] = child;
    }
    self.last_valid_entry = next;
    Ok(())
  }

  pub fn to_parent(&mut self) -> CursorResult<()> {
    if self.last_valid_entry == 0 {
      return Err(CursorError::AtRoot);
    }
    self.last_valid_entry -= 1;
    Ok(())
  }

  pub fn to_root(&mut self) {
    self.last_valid_entry = 0;
  }
}

impl<G: DerefMut<Target = HyperTreeGrid>> NonOrientedGeometryCursor<G> {
  /// Move to the root of tree `tree_index`, creating the tree when absent.
  pub fn initialize_or_create(&mut self, tree_index: TreeIndex) -> CursorResult<TreeIndex> {
    self.last_valid_entry = 0;
    self.entries[0].initialize_or_create(&mut self.grid, tree_index)
  }

  /// Subdivide the current cell if it is a leaf.
  pub fn subdivide_leaf(&mut self) -> CursorResult<()> {
    let entry = *self.entry();
    entry.subdivide_leaf(&mut self.grid)
  }

  /// Implicit global indexing of the current tree.
  pub fn set_global_index_start(&mut self, start: u64) -> CursorResult<()> {
    self.current_tree_mut()?.set_global_index_start(start)
  }

  /// Explicit global index of the current cell.
  pub fn set_global_index_from_local(&mut self, global: u64) -> CursorResult<()> {
    let local = self.vertex_id();
    self.current_tree_mut()?.set_global_index_from_local(local, global)
  }

  /// Mask or unmask the current cell.
  pub fn set_mask(&mut self, masked: bool) -> CursorResult<()> {
    let global = self.global_node_index().ok_or(CursorError::NoTree)?;
    self.grid.set_masked(global, masked);
    Ok(())
  }

  fn current_tree_mut(&mut self) -> CursorResult<&mut HyperTree> {
    let tree_index = self.tree_index().ok_or(CursorError::NoTree)?;
    self.grid.tree_mut(tree_index).ok_or(CursorError::NoTree)
  }
}
