use glam::DVec3;

use crate::bounds::Bounds;
use crate::entry::{Entry, UnlimitedLevelEntry};
use crate::error::{CursorError, CursorResult};
use crate::grid::{HyperTreeGrid, TreeIndex};

/// Cursor that keeps descending past real leaves.
///
/// Each `to_child` pushes a fresh entry on top of the path, so the real
/// ancestry (`last_real_index`, `last_real_level`) of every level stays
/// available on the way back up.
#[derive(Clone, Debug)]
pub struct UnlimitedGeometryCursor<'g> {
  grid: &'g HyperTreeGrid,
  entries: Vec<UnlimitedLevelEntry>,
}

impl<'g> UnlimitedGeometryCursor<'g> {
  pub fn new(grid: &'g HyperTreeGrid) -> Self {
    Self {
      grid,
      entries: vec![UnlimitedLevelEntry::default()],
    }
  }

  pub fn initialize(&mut self, tree_index: TreeIndex) -> Option<TreeIndex> {
    self.entries.truncate(1);
    self.entries[0].initialize(self.grid, tree_index)
  }

  #[inline]
  pub fn grid(&self) -> &'g HyperTreeGrid {
    self.grid
  }

  #[inline]
  pub fn entry(&self) -> &UnlimitedLevelEntry {
    &self.entries[self.entries.len() - 1]
  }

  #[inline]
  pub fn tree_index(&self) -> Option<TreeIndex> {
    self.entry().tree_index()
  }

  #[inline]
  pub fn has_tree(&self) -> bool {
    self.entry().has_tree()
  }

  /// Local index of the last real cell on the path.
  #[inline]
  pub fn vertex_id(&self) -> u64 {
    self.entry().vertex_id()
  }

  #[inline]
  pub fn global_node_index(&self) -> Option<u64> {
    self.entry().global_node_index(self.grid)
  }

  #[inline]
  pub fn level(&self) -> u32 {
    self.entry().level()
  }

  #[inline]
  pub fn last_real_level(&self) -> u32 {
    self.entry().last_real_level()
  }

  #[inline]
  pub fn origin(&self) -> DVec3 {
    self.entry().origin()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.entry().size(self.grid)
  }

  #[inline]
  pub fn bounds(&self) -> Bounds {
    self.entry().bounds(self.grid)
  }

  #[inline]
  pub fn point(&self) -> DVec3 {
    self.entry().point(self.grid)
  }

  /// True only at the depth limiter.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.entry().is_leaf(self.grid)
  }

  #[inline]
  pub fn is_real_leaf(&self) -> bool {
    self.entry().is_real_leaf(self.grid)
  }

  #[inline]
  pub fn is_virtual_leaf(&self) -> bool {
    self.entry().is_virtual_leaf(self.grid)
  }

  #[inline]
  pub fn is_masked(&self) -> bool {
    self.entry().is_masked(self.grid)
  }

  #[inline]
  pub fn is_root(&self) -> bool {
    self.entries.len() == 1
  }

  #[inline]
  pub fn extensive_property_ratio(&self) -> f64 {
    self.entry().extensive_property_ratio(self.grid)
  }

  pub fn to_child(&mut self, ichild: usize) -> CursorResult<()> {
    let mut child = *self.entry();
    child.to_child(self.grid, ichild)?;
    self.entries.push(child);
    Ok(())
  }

  pub fn to_parent(&mut self) -> CursorResult<()> {
    if self.is_root() {
      return Err(CursorError::AtRoot);
    }
    self.entries.pop();
    Ok(())
  }

  pub fn to_root(&mut self) {
    self.entries.truncate(1);
  }
}
