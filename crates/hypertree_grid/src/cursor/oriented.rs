use glam::DVec3;

use crate::bounds::Bounds;
use crate::entry::{Entry, LevelEntry};
use crate::error::CursorResult;
use crate::grid::{HyperTreeGrid, TreeIndex};

/// Single-entry cursor that only moves downward.
///
/// Used by point location and ray casting, where the path is never
/// walked back up.
#[derive(Clone, Debug)]
pub struct OrientedGeometryCursor<'g> {
  grid: &'g HyperTreeGrid,
  root: LevelEntry,
  entry: LevelEntry,
}

impl<'g> OrientedGeometryCursor<'g> {
  pub fn new(grid: &'g HyperTreeGrid) -> Self {
    Self {
      grid,
      root: LevelEntry::default(),
      entry: LevelEntry::default(),
    }
  }

  pub fn initialize(&mut self, tree_index: TreeIndex) -> Option<TreeIndex> {
    let tree = self.root.initialize(self.grid, tree_index);
    self.entry = self.root;
    tree
  }

  #[inline]
  pub fn grid(&self) -> &'g HyperTreeGrid {
    self.grid
  }

  #[inline]
  pub fn entry(&self) -> &LevelEntry {
    &self.entry
  }

  #[inline]
  pub fn tree_index(&self) -> Option<TreeIndex> {
    self.entry.tree_index()
  }

  #[inline]
  pub fn has_tree(&self) -> bool {
    self.entry.has_tree()
  }

  #[inline]
  pub fn vertex_id(&self) -> u64 {
    self.entry.vertex_id()
  }

  #[inline]
  pub fn global_node_index(&self) -> Option<u64> {
    self.entry.global_node_index(self.grid)
  }

  #[inline]
  pub fn level(&self) -> u32 {
    self.entry.level()
  }

  #[inline]
  pub fn origin(&self) -> DVec3 {
    self.entry.origin()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.entry.size(self.grid)
  }

  #[inline]
  pub fn bounds(&self) -> Bounds {
    self.entry.bounds(self.grid)
  }

  #[inline]
  pub fn point(&self) -> DVec3 {
    self.entry.point(self.grid)
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.entry.is_leaf(self.grid)
  }

  #[inline]
  pub fn is_masked(&self) -> bool {
    self.entry.is_masked(self.grid)
  }

  #[inline]
  pub fn is_ghost(&self) -> bool {
    self.entry.is_ghost(self.grid)
  }

  #[inline]
  pub fn is_root(&self) -> bool {
    self.entry == self.root
  }

  #[inline]
  pub fn number_of_children(&self) -> usize {
    self.grid.number_of_children()
  }

  pub fn to_child(&mut self, ichild: usize) -> CursorResult<()> {
    self.entry.to_child(self.grid, ichild)
  }

  pub fn to_root(&mut self) {
    self.entry = self.root;
  }
}
