//! Per-level cell sizes of one hyper tree.

use glam::DVec3;

/// Cell size of every level of a tree.
///
/// Levels reached by subdivision are cached. Deeper (virtual) levels are
/// computed on demand, so unlimited cursors can query sizes past the
/// tree's real depth without mutating it.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperTreeScales {
  branch_factor: u32,
  cell_sizes: Vec<DVec3>,
}

impl HyperTreeScales {
  pub fn new(branch_factor: u32, root_size: DVec3) -> Self {
    Self {
      branch_factor,
      cell_sizes: vec![root_size],
    }
  }

  /// Size of the root cell.
  #[inline]
  pub fn root_size(&self) -> DVec3 {
    self.cell_sizes[0]
  }

  /// Size of a cell at `level`.
  #[inline]
  pub fn cell_size(&self, level: u32) -> DVec3 {
    match self.cell_sizes.get(level as usize) {
      Some(size) => *size,
      None => self.root_size() / (self.branch_factor as f64).powi(level as i32),
    }
  }

  /// Number of cached levels.
  #[inline]
  pub fn number_of_cached_levels(&self) -> usize {
    self.cell_sizes.len()
  }

  /// Cache levels up to and including `level`.
  pub fn compute_to(&mut self, level: u32) {
    let factor = self.branch_factor as f64;
    while self.cell_sizes.len() <= level as usize {
      let last = self.cell_sizes[self.cell_sizes.len() - 1];
      self.cell_sizes.push(last / factor);
    }
  }
}
