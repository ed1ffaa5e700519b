//! Test utilities and grid fixtures.
//!
//! Fixtures are built through the public cursor API the same way an
//! application would: create roots, subdivide along child paths, then
//! number every tree with implicit global indices in tree order.

use glam::DVec3;

use crate::bounds::Bounds;
use crate::cursor::NonOrientedGeometryCursor;
use crate::error::{CursorResult, Error};
use crate::grid::{GridConfig, HyperTreeGrid, TreeIndex};

/// Subdivision instruction: the tree, then the child path to the cell to
/// refine (empty for the root).
pub type Refinement<'a> = (TreeIndex, &'a [usize]);

// =============================================================================
// Builders
// =============================================================================

/// Create every level-zero tree, apply `refinements` in order, then assign
/// global indices.
pub fn build_grid(config: GridConfig, refinements: &[Refinement<'_>]) -> Result<HyperTreeGrid, Error> {
  let mut grid = HyperTreeGrid::new(config)?;
  create_all_trees(&mut grid)?;
  for &(tree_index, path) in refinements {
    subdivide_path(&mut grid, tree_index, path)?;
  }
  assign_global_indices(&mut grid)?;
  Ok(grid)
}

/// Create a single-leaf tree in every level-zero cell.
pub fn create_all_trees(grid: &mut HyperTreeGrid) -> CursorResult<()> {
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  for tree_index in 0..cursor.grid().number_of_trees() {
    cursor.initialize_or_create(tree_index)?;
  }
  Ok(())
}

/// Subdivide the cell reached from the root of `tree_index` through `path`.
pub fn subdivide_path(grid: &mut HyperTreeGrid, tree_index: TreeIndex, path: &[usize]) -> CursorResult<()> {
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  cursor.initialize_or_create(tree_index)?;
  for &ichild in path {
    cursor.to_child(ichild)?;
  }
  cursor.subdivide_leaf()
}

/// Implicit global indexing, trees numbered consecutively in index order.
pub fn assign_global_indices(grid: &mut HyperTreeGrid) -> CursorResult<()> {
  let mut start = 0;
  for tree_index in grid.tree_indices() {
    if let Some(tree) = grid.tree_mut(tree_index) {
      tree.set_global_index_start(start)?;
      start += tree.number_of_vertices();
    }
  }
  Ok(())
}

/// Refine every leaf for which `predicate(bounds, level)` holds, down to
/// `max_level`, then assign global indices.
pub fn refine_where(
  config: GridConfig,
  max_level: u32,
  mut predicate: impl FnMut(Bounds, u32) -> bool,
) -> Result<HyperTreeGrid, Error> {
  let mut grid = HyperTreeGrid::new(config)?;
  create_all_trees(&mut grid)?;
  let tree_indices = grid.tree_indices();
  let mut cursor = NonOrientedGeometryCursor::new(&mut grid);
  for tree_index in tree_indices {
    cursor.initialize(tree_index);
    refine_recursively(&mut cursor, max_level, &mut predicate)?;
  }
  assign_global_indices(&mut grid)?;
  Ok(grid)
}

fn refine_recursively(
  cursor: &mut NonOrientedGeometryCursor<&mut HyperTreeGrid>,
  max_level: u32,
  predicate: &mut impl FnMut(Bounds, u32) -> bool,
) -> CursorResult<()> {
  if cursor.level() >= max_level || !predicate(cursor.bounds(), cursor.level()) {
    return Ok(());
  }
  cursor.subdivide_leaf()?;
  for ichild in 0..cursor.number_of_children() {
    cursor.to_child(ichild)?;
    refine_recursively(cursor, max_level, predicate)?;
    cursor.to_parent()?;
  }
  Ok(())
}

// =============================================================================
// Fixtures
// =============================================================================

/// 2D binary grid over `[0, 2]^2`, 2x2 trees, 7 subdivisions, 25 leaves.
///
/// ```text
/// tree 2: refined, child 1 refined    tree 3: refined
/// tree 0: refined, child 3 refined,   tree 1: refined
///         its child 0 refined
/// ```
pub fn quadtree_fixture() -> HyperTreeGrid {
  let config = GridConfig::uniform([2, 2, 0], DVec3::ZERO, DVec3::new(2.0, 2.0, 0.0));
  let refinements: [Refinement; 7] = [
    (0, &[]),
    (0, &[3]),
    (0, &[3, 0]),
    (1, &[]),
    (2, &[]),
    (2, &[1]),
    (3, &[]),
  ];
  fixture(config, &refinements)
}

/// 3D binary grid over `[0, 2] x [0, 2] x [0, 1]`, 2x2x1 trees,
/// 3 subdivisions, 25 leaves.
pub fn octree_fixture() -> HyperTreeGrid {
  let config = GridConfig::uniform([2, 2, 1], DVec3::ZERO, DVec3::new(2.0, 2.0, 1.0));
  let refinements: [Refinement; 3] = [(0, &[]), (0, &[7]), (3, &[])];
  fixture(config, &refinements)
}

/// 2D ternary grid over `[0, 3]^2`, one tree, 3 subdivisions, 25 leaves.
pub fn ternary_fixture() -> HyperTreeGrid {
  let config = GridConfig::uniform([1, 1, 0], DVec3::ZERO, DVec3::new(3.0, 3.0, 0.0)).with_branch_factor(3);
  let refinements: [Refinement; 3] = [(0, &[]), (0, &[4]), (0, &[0])];
  fixture(config, &refinements)
}

/// 1D binary grid over `[0, 4]` along x, 4 trees, trees 1 and 2 refined.
pub fn line_fixture() -> HyperTreeGrid {
  let config = GridConfig::uniform([4, 0, 0], DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0));
  let refinements: [Refinement; 3] = [(1, &[]), (2, &[]), (2, &[0])];
  fixture(config, &refinements)
}

/// Uniformly refined grid: every leaf refined down to `depth`.
pub fn uniform_fixture(config: GridConfig, depth: u32) -> HyperTreeGrid {
  match refine_where(config, depth, |_, _| true) {
    Ok(grid) => grid,
    Err(error) => panic!("uniform fixture: {}", error),
  }
}

fn fixture(config: GridConfig, refinements: &[Refinement<'_>]) -> HyperTreeGrid {
  match build_grid(config, refinements) {
    Ok(grid) => grid,
    Err(error) => panic!("fixture construction failed: {}", error),
  }
}

// =============================================================================
// Inspection
// =============================================================================

/// One leaf as seen by a depth-first traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafRecord {
  pub tree_index: TreeIndex,
  pub global_index: u64,
  pub level: u32,
  pub bounds: Bounds,
}

/// Every leaf of the grid, in tree order then depth-first order.
pub fn collect_leaves(grid: &HyperTreeGrid) -> Vec<LeafRecord> {
  let mut leaves = Vec::new();
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  for tree_index in grid.tree_indices() {
    cursor.initialize(tree_index);
    collect_recursively(&mut cursor, &mut leaves);
  }
  leaves
}

fn collect_recursively(cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>, leaves: &mut Vec<LeafRecord>) {
  if cursor.is_leaf() {
    if let (Some(tree_index), Some(global_index)) = (cursor.tree_index(), cursor.global_node_index()) {
      leaves.push(LeafRecord {
        tree_index,
        global_index,
        level: cursor.level(),
        bounds: cursor.bounds(),
      });
    }
    return;
  }
  for ichild in 0..cursor.number_of_children() {
    if cursor.to_child(ichild).is_ok() {
      collect_recursively(cursor, leaves);
      let _ = cursor.to_parent();
    }
  }
}

/// Cell field sampled at every cell center, indexed by global index.
pub fn sample_cell_field(grid: &HyperTreeGrid, field: impl Fn(DVec3) -> f64) -> Vec<f64> {
  let mut values = vec![0.0; grid.global_index_bound() as usize];
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  for tree_index in grid.tree_indices() {
    cursor.initialize(tree_index);
    sample_recursively(&mut cursor, &field, &mut values);
  }
  values
}

fn sample_recursively(
  cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>,
  field: &impl Fn(DVec3) -> f64,
  values: &mut [f64],
) {
  if let Some(global) = cursor.global_node_index() {
    values[global as usize] = field(cursor.point());
  }
  if cursor.is_leaf() {
    return;
  }
  for ichild in 0..cursor.number_of_children() {
    if cursor.to_child(ichild).is_ok() {
      sample_recursively(cursor, field, values);
      let _ = cursor.to_parent();
    }
  }
}

/// Approximate equality for points.
pub fn approx_eq(a: DVec3, b: DVec3, epsilon: f64) -> bool {
  (a - b).abs().max_element() <= epsilon
}
