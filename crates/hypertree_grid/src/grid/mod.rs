//! Hyper tree grid: a Cartesian grid of independently refined trees.
//!
//! The level-zero grid is described by one coordinate array per axis. An
//! axis with a single coordinate is flat, so a grid spans `dimension` axes
//! (1 to 3) embedded in 3D space. Each level-zero cell may hold one
//! [`HyperTree`]; absent trees are holes in the grid.
//!
//! # Level-zero indexing
//!
//! ```text
//! default:    index = i + j * nx + k * nx * ny
//! transposed: index = k + j * nz + i * nz * ny
//! ```
//!
//! # Child numbering
//!
//! Children are numbered in mixed radix with `branch_factor` digits, one per
//! spanned axis, axis 0 least significant. Spanned axes map to world axes
//! through [`HyperTreeGrid::axes`].

mod scales;
mod tree;

pub use scales::HyperTreeScales;
pub use tree::HyperTree;

use glam::DVec3;

use crate::bounds::Bounds;
use crate::error::GridError;

/// Index of a level-zero cell, and so of the tree it holds.
pub type TreeIndex = u64;

/// Sentinel for unallocated / virtual local indices.
pub const INVALID_INDEX: u64 = u64::MAX;

// =============================================================================
// Configuration
// =============================================================================

/// Grid description validated by [`HyperTreeGrid::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
  /// Level-zero coordinates per axis, strictly increasing. A single
  /// coordinate makes the axis flat.
  pub coordinates: [Vec<f64>; 3],
  /// Subdivisions per axis per refinement step, 2 or 3.
  pub branch_factor: u32,
  /// Use `k + j * nz + i * nz * ny` level-zero indexing.
  pub transposed_root_indexing: bool,
  /// Deepest level cursors honor. Cells at this level report as leaves.
  pub depth_limiter: u32,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      coordinates: [vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0]],
      branch_factor: 2,
      transposed_root_indexing: false,
      depth_limiter: u32::MAX,
    }
  }
}

impl GridConfig {
  /// Evenly spaced level-zero grid of `cells` per axis over `[min, max]`.
  /// Zero cells makes the axis flat at `min`.
  pub fn uniform(cells: [usize; 3], min: DVec3, max: DVec3) -> Self {
    let axis = |a: usize| -> Vec<f64> {
      if cells[a] == 0 {
        return vec![min[a]];
      }
      let step = (max[a] - min[a]) / cells[a] as f64;
      (0..=cells[a]).map(|i| min[a] + step * i as f64).collect()
    };
    Self {
      coordinates: [axis(0), axis(1), axis(2)],
      ..Default::default()
    }
  }

  pub fn with_coordinates(mut self, axis: usize, coordinates: Vec<f64>) -> Self {
    self.coordinates[axis] = coordinates;
    self
  }

  pub fn with_branch_factor(mut self, branch_factor: u32) -> Self {
    self.branch_factor = branch_factor;
    self
  }

  pub fn with_transposed_root_indexing(mut self, transposed: bool) -> Self {
    self.transposed_root_indexing = transposed;
    self
  }

  pub fn with_depth_limiter(mut self, depth_limiter: u32) -> Self {
    self.depth_limiter = depth_limiter;
    self
  }
}

// =============================================================================
// Grid
// =============================================================================

/// Grid-wide metadata plus the sparse table of trees.
#[derive(Clone, Debug)]
pub struct HyperTreeGrid {
  coordinates: [Vec<f64>; 3],
  cell_dims: [usize; 3],
  dimension: usize,
  branch_factor: u32,
  number_of_children: usize,
  orientation: usize,
  axes: [usize; 3],
  transposed_root_indexing: bool,
  depth_limiter: u32,
  trees: Vec<Option<HyperTree>>,
  mask: Option<Vec<bool>>,
  ghost_cells: Option<Vec<bool>>,
}

impl HyperTreeGrid {
  pub fn new(config: GridConfig) -> Result<Self, GridError> {
    let GridConfig {
      coordinates,
      branch_factor,
      transposed_root_indexing,
      depth_limiter,
    } = config;

    if !(2..=3).contains(&branch_factor) {
      return Err(GridError::InvalidBranchFactor(branch_factor));
    }

    let mut cell_dims = [1; 3];
    let mut axes = [0; 3];
    let mut dimension = 0;
    for (axis, values) in coordinates.iter().enumerate() {
      if values.is_empty() {
        return Err(GridError::EmptyAxis { axis });
      }
      if let Some(position) = values.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(GridError::NonMonotonicCoordinates {
          axis,
          position: position + 1,
        });
      }
      if values.len() >= 2 {
        cell_dims[axis] = values.len() - 1;
        axes[dimension] = axis;
        dimension += 1;
      }
    }
    if dimension == 0 {
      return Err(GridError::InvalidDimension(dimension));
    }

    let orientation = match dimension {
      1 => axes[0],
      // Normal axis of the plane.
      2 => 3 - axes[0] - axes[1],
      _ => 0,
    };

    let number_of_trees = cell_dims.iter().product();
    Ok(Self {
      coordinates,
      cell_dims,
      dimension,
      branch_factor,
      number_of_children: (branch_factor as usize).pow(dimension as u32),
      orientation,
      axes,
      transposed_root_indexing,
      depth_limiter,
      trees: vec![None; number_of_trees],
      mask: None,
      ghost_cells: None,
    })
  }

  // ---------------------------------------------------------------------------
  // Topology
  // ---------------------------------------------------------------------------

  #[inline]
  pub fn dimension(&self) -> usize {
    self.dimension
  }

  #[inline]
  pub fn branch_factor(&self) -> u32 {
    self.branch_factor
  }

  /// `branch_factor ^ dimension`.
  #[inline]
  pub fn number_of_children(&self) -> usize {
    self.number_of_children
  }

  /// Line axis of a 1D grid, normal axis of a 2D grid, `0` in 3D.
  #[inline]
  pub fn orientation(&self) -> usize {
    self.orientation
  }

  /// World axes spanned by the grid, in ascending order.
  #[inline]
  pub fn axes(&self) -> &[usize] {
    &self.axes[..self.dimension]
  }

  /// Level-zero cells per axis (`1` along flat axes).
  #[inline]
  pub fn cell_dims(&self) -> [usize; 3] {
    self.cell_dims
  }

  #[inline]
  pub fn transposed_root_indexing(&self) -> bool {
    self.transposed_root_indexing
  }

  #[inline]
  pub fn coordinates(&self, axis: usize) -> &[f64] {
    &self.coordinates[axis]
  }

  #[inline]
  pub fn depth_limiter(&self) -> u32 {
    self.depth_limiter
  }

  pub fn set_depth_limiter(&mut self, depth_limiter: u32) {
    self.depth_limiter = depth_limiter;
  }

  /// Number of level-zero cells, present trees or not.
  #[inline]
  pub fn number_of_trees(&self) -> u64 {
    self.trees.len() as u64
  }

  // ---------------------------------------------------------------------------
  // Level-zero indexing
  // ---------------------------------------------------------------------------

  pub fn index_from_level_zero_coordinates(&self, ijk: [usize; 3]) -> TreeIndex {
    let [nx, ny, nz] = self.cell_dims;
    let [i, j, k] = ijk;
    let index = if self.transposed_root_indexing {
      k + j * nz + i * nz * ny
    } else {
      i + j * nx + k * nx * ny
    };
    index as TreeIndex
  }

  pub fn level_zero_coordinates_from_index(&self, index: TreeIndex) -> [usize; 3] {
    let [nx, ny, nz] = self.cell_dims;
    let index = index as usize;
    if self.transposed_root_indexing {
      let i = index / (nz * ny);
      let rest = index - i * nz * ny;
      [i, rest / nz, rest % nz]
    } else {
      let k = index / (nx * ny);
      let rest = index - k * nx * ny;
      [rest % nx, rest / nx, k]
    }
  }

  /// Index of the level-zero cell `offset` away from `index`, or `None`
  /// when it falls outside the grid.
  pub fn shifted_level_zero_index(&self, index: TreeIndex, offset: [i32; 3]) -> Option<TreeIndex> {
    let ijk = self.level_zero_coordinates_from_index(index);
    let mut shifted = [0usize; 3];
    for axis in 0..3 {
      let value = ijk[axis] as i64 + offset[axis] as i64;
      if value < 0 || value >= self.cell_dims[axis] as i64 {
        return None;
      }
      shifted[axis] = value as usize;
    }
    Some(self.index_from_level_zero_coordinates(shifted))
  }

  /// Origin of level-zero cell `index`.
  pub fn level_zero_origin(&self, index: TreeIndex) -> DVec3 {
    let ijk = self.level_zero_coordinates_from_index(index);
    DVec3::from_array([0, 1, 2].map(|axis| self.coordinates[axis][ijk[axis]]))
  }

  /// Size of level-zero cell `index`, zero along flat axes.
  pub fn level_zero_size(&self, index: TreeIndex) -> DVec3 {
    let ijk = self.level_zero_coordinates_from_index(index);
    DVec3::from_array([0, 1, 2].map(|axis| {
      let values = &self.coordinates[axis];
      if values.len() < 2 {
        0.0
      } else {
        values[ijk[axis] + 1] - values[ijk[axis]]
      }
    }))
  }

  /// Level-zero cell along `axis` containing `coord`.
  ///
  /// A coordinate on the last boundary belongs to the last cell. Flat axes
  /// always answer `0`.
  pub fn find_dichotomic(&self, axis: usize, coord: f64) -> Option<usize> {
    let values = &self.coordinates[axis];
    if values.len() < 2 {
      return Some(0);
    }
    let (first, last) = (values[0], values[values.len() - 1]);
    if !(coord >= first && coord <= last) {
      return None;
    }
    let upper = values.partition_point(|&value| value <= coord);
    Some((upper.max(1) - 1).min(values.len() - 2))
  }

  // ---------------------------------------------------------------------------
  // Children
  // ---------------------------------------------------------------------------

  /// Per-axis digits of child `ichild`, in spanned-axis order.
  #[inline]
  pub fn child_digits(&self, ichild: usize) -> [usize; 3] {
    let factor = self.branch_factor as usize;
    let mut digits = [0; 3];
    let mut rest = ichild;
    for digit in digits.iter_mut().take(self.dimension) {
      *digit = rest % factor;
      rest /= factor;
    }
    digits
  }

  /// Inverse of [`Self::child_digits`].
  #[inline]
  pub fn child_index_from_digits(&self, digits: [usize; 3]) -> usize {
    let factor = self.branch_factor as usize;
    (0..self.dimension).rev().fold(0, |acc, a| acc * factor + digits[a])
  }

  /// Origin of child `ichild` of the cell at `origin`, given the child size.
  #[inline]
  pub fn child_origin(&self, origin: DVec3, child_size: DVec3, ichild: usize) -> DVec3 {
    let digits = self.child_digits(ichild);
    let mut result = origin;
    for (a, &axis) in self.axes().iter().enumerate() {
      result[axis] += digits[a] as f64 * child_size[axis];
    }
    result
  }

  // ---------------------------------------------------------------------------
  // Trees
  // ---------------------------------------------------------------------------

  #[inline]
  pub fn tree(&self, index: TreeIndex) -> Option<&HyperTree> {
    self.trees.get(index as usize).and_then(Option::as_ref)
  }

  #[inline]
  pub fn tree_mut(&mut self, index: TreeIndex) -> Option<&mut HyperTree> {
    self.trees.get_mut(index as usize).and_then(Option::as_mut)
  }

  /// Tree at `index`, created as a single leaf when absent.
  pub fn get_or_create_tree(&mut self, index: TreeIndex) -> Result<&mut HyperTree, GridError> {
    let number_of_trees = self.number_of_trees();
    if index >= number_of_trees {
      return Err(GridError::TreeIndexOutOfRange {
        tree_index: index,
        number_of_trees,
      });
    }
    let root_size = self.level_zero_size(index);
    let (dimension, branch_factor) = (self.dimension, self.branch_factor);
    Ok(self.trees[index as usize].get_or_insert_with(|| HyperTree::new(index, dimension, branch_factor, root_size)))
  }

  /// Present trees in ascending index order.
  pub fn trees(&self) -> impl Iterator<Item = (TreeIndex, &HyperTree)> + '_ {
    self
      .trees
      .iter()
      .enumerate()
      .filter_map(|(index, tree)| tree.as_ref().map(|tree| (index as TreeIndex, tree)))
  }

  /// Indices of present trees in ascending order.
  pub fn tree_indices(&self) -> Vec<TreeIndex> {
    self.trees().map(|(index, _)| index).collect()
  }

  pub fn number_of_non_empty_trees(&self) -> usize {
    self.trees.iter().filter(|tree| tree.is_some()).count()
  }

  /// Remove the tree at `index`. Returns whether a tree was removed.
  pub fn remove_tree(&mut self, index: TreeIndex) -> bool {
    self
      .trees
      .get_mut(index as usize)
      .and_then(Option::take)
      .is_some()
  }

  /// Remove every listed tree. Returns how many were actually removed.
  pub fn remove_trees(&mut self, indices: impl IntoIterator<Item = TreeIndex>) -> usize {
    indices.into_iter().filter(|&index| self.remove_tree(index)).count()
  }

  // ---------------------------------------------------------------------------
  // Mask and ghost cells
  // ---------------------------------------------------------------------------

  #[inline]
  pub fn has_mask(&self) -> bool {
    self.mask.is_some()
  }

  #[inline]
  pub fn mask(&self) -> Option<&[bool]> {
    self.mask.as_deref()
  }

  pub fn set_mask(&mut self, mask: Option<Vec<bool>>) {
    self.mask = mask;
  }

  /// Mask a single cell, growing the mask as needed.
  pub fn set_masked(&mut self, global_index: u64, masked: bool) {
    let mask = self.mask.get_or_insert_with(Vec::new);
    let slot = global_index as usize;
    if mask.len() <= slot {
      mask.resize(slot + 1, false);
    }
    mask[slot] = masked;
  }

  /// Mask value of a global index. Missing entries are unmasked.
  #[inline]
  pub fn is_masked_index(&self, global_index: u64) -> bool {
    lookup(self.mask.as_deref(), global_index)
  }

  #[inline]
  pub fn ghost_cells(&self) -> Option<&[bool]> {
    self.ghost_cells.as_deref()
  }

  pub fn set_ghost_cells(&mut self, ghost_cells: Option<Vec<bool>>) {
    self.ghost_cells = ghost_cells;
  }

  pub fn has_any_ghost_cells(&self) -> bool {
    self.ghost_cells.as_ref().is_some_and(|ghosts| ghosts.iter().any(|&ghost| ghost))
  }

  #[inline]
  pub fn is_ghost_index(&self, global_index: u64) -> bool {
    lookup(self.ghost_cells.as_deref(), global_index)
  }

  // ---------------------------------------------------------------------------
  // Statistics
  // ---------------------------------------------------------------------------

  /// Deepest tree level count, `0` on an empty grid.
  pub fn number_of_levels(&self) -> u32 {
    self.trees().map(|(_, tree)| tree.number_of_levels()).max().unwrap_or(0)
  }

  pub fn number_of_vertices(&self) -> u64 {
    self.trees().map(|(_, tree)| tree.number_of_vertices()).sum()
  }

  pub fn number_of_leaves(&self) -> u64 {
    self.trees().map(|(_, tree)| tree.number_of_leaves()).sum()
  }

  /// Every node of every tree is a cell.
  pub fn number_of_cells(&self) -> u64 {
    self.number_of_vertices()
  }

  /// One past the largest global index assigned in any tree.
  pub fn global_index_bound(&self) -> u64 {
    self
      .trees()
      .filter_map(|(_, tree)| tree.maximum_global_index())
      .max()
      .map_or(0, |max| max + 1)
  }

  /// Box spanned by the level-zero coordinates.
  pub fn bounds(&self) -> Bounds {
    let min = DVec3::from_array([0, 1, 2].map(|axis| self.coordinates[axis][0]));
    let max = DVec3::from_array([0, 1, 2].map(|axis| {
      let values = &self.coordinates[axis];
      values[values.len() - 1]
    }));
    Bounds::new(min, max)
  }
}

#[inline]
fn lookup(values: Option<&[bool]>, global_index: u64) -> bool {
  values
    .and_then(|values| usize::try_from(global_index).ok().and_then(|slot| values.get(slot)))
    .copied()
    .unwrap_or(false)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
