//! Geometric queries against a hyper tree grid.
//!
//! [`HyperTreeGridLocator`] answers point-in-cell searches and segment
//! intersections. A search binary-searches the level-zero coordinates for
//! the containing tree, then descends one child per level by bucketing the
//! point's normalized position along each axis.
//!
//! Masked and ghost cells stop a descent. A node whose children are all
//! masked or ghost counts as a leaf.

pub mod cell;

use glam::DVec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::bounds::Bounds;
use crate::cursor::{NonOrientedGeometryCursor, OrientedGeometryCursor};
use crate::entry::{Entry, LevelEntry};
use crate::error::{CursorError, CursorResult};
use crate::grid::{HyperTreeGrid, TreeIndex};

pub use cell::{Cell, CellKind, CellLineIntersection, PositionEvaluation};

/// Locator settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocatorConfig {
  /// Points up to this far outside the grid snap onto its boundary cells.
  pub tolerance: f64,
}

impl Default for LocatorConfig {
  fn default() -> Self {
    Self { tolerance: 0.0 }
  }
}

impl LocatorConfig {
  pub fn with_tolerance(mut self, tolerance: f64) -> Self {
    self.tolerance = tolerance;
    self
  }
}

/// Leaf found by [`HyperTreeGridLocator::find_cell`].
#[derive(Clone, Debug, PartialEq)]
pub struct CellLocation {
  pub global_index: u64,
  pub cell: Cell,
  pub pcoords: DVec3,
  pub weights: SmallVec<[f64; 8]>,
  pub dist2: f64,
}

/// Nearest segment intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
  /// Parametric position along the segment.
  pub t: f64,
  pub point: DVec3,
  pub global_index: u64,
}

/// Every cell a segment crosses, sorted by parametric position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineIntersections {
  pub points: Vec<DVec3>,
  pub cell_ids: Vec<u64>,
  pub ts: Vec<f64>,
}

impl LineIntersections {
  #[inline]
  pub fn len(&self) -> usize {
    self.ts.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.ts.is_empty()
  }

  fn push(&mut self, point: DVec3, cell_id: u64, t: f64) {
    self.points.push(point);
    self.cell_ids.push(cell_id);
    self.ts.push(t);
  }

  fn truncate(&mut self, len: usize) {
    self.points.truncate(len);
    self.cell_ids.truncate(len);
    self.ts.truncate(len);
  }

  fn append(&mut self, mut other: Self) {
    self.points.append(&mut other.points);
    self.cell_ids.append(&mut other.cell_ids);
    self.ts.append(&mut other.ts);
  }

  /// Reorder by `t`, ties broken by cell id.
  fn sorted(self) -> Self {
    let mut order: Vec<usize> = (0..self.len()).collect();
    order.sort_by(|&a, &b| {
      self.ts[a]
        .total_cmp(&self.ts[b])
        .then(self.cell_ids[a].cmp(&self.cell_ids[b]))
    });
    Self {
      points: order.iter().map(|&i| self.points[i]).collect(),
      cell_ids: order.iter().map(|&i| self.cell_ids[i]).collect(),
      ts: order.iter().map(|&i| self.ts[i]).collect(),
    }
  }
}

/// Point and segment queries over one grid.
#[derive(Clone, Debug)]
pub struct HyperTreeGridLocator<'g> {
  grid: &'g HyperTreeGrid,
  config: LocatorConfig,
  /// Upper bounds of the per-axis child bins, in normalized cell
  /// coordinates.
  bins: SmallVec<[f64; 3]>,
}

impl<'g> HyperTreeGridLocator<'g> {
  pub fn new(grid: &'g HyperTreeGrid) -> Self {
    Self::with_config(grid, LocatorConfig::default())
  }

  pub fn with_config(grid: &'g HyperTreeGrid, config: LocatorConfig) -> Self {
    let factor = grid.branch_factor() as f64;
    let bins = (0..grid.branch_factor()).map(|b| (b as f64 + 1.0) / factor).collect();
    Self { grid, config, bins }
  }

  #[inline]
  pub fn grid(&self) -> &'g HyperTreeGrid {
    self.grid
  }

  #[inline]
  pub fn config(&self) -> &LocatorConfig {
    &self.config
  }

  // ---------------------------------------------------------------------------
  // Point search
  // ---------------------------------------------------------------------------

  /// Global index of the leaf containing `point`.
  ///
  /// `None` outside the grid, in an absent tree, or when the descent hits
  /// a masked or ghost cell.
  pub fn search(&self, point: DVec3) -> Option<u64> {
    let mut cursor = OrientedGeometryCursor::new(self.grid);
    self.search_with_cursor(point, &mut cursor)
  }

  /// Same as [`search`](Self::search), leaving `cursor` on the cell where
  /// the descent stopped.
  pub fn search_with_cursor(&self, point: DVec3, cursor: &mut OrientedGeometryCursor<'g>) -> Option<u64> {
    let tree_index = self.level_zero_index(point)?;
    cursor.initialize(tree_index)?;
    loop {
      if cursor.is_masked() || cursor.is_ghost() {
        return None;
      }
      if self.check_leaf_or_children_masked(cursor) {
        return cursor.global_node_index();
      }
      let ichild = self.child_containing(point, cursor.origin(), cursor.size());
      cursor.to_child(ichild).ok()?;
    }
  }

  /// Whether `cursor` is a leaf or every one of its children is masked or
  /// ghost.
  pub fn check_leaf_or_children_masked(&self, cursor: &OrientedGeometryCursor<'_>) -> bool {
    leaf_or_children_masked(self.grid, cursor.entry())
  }

  /// Leaf containing `point`, with its cell geometry and the point's
  /// parametric coordinates in it.
  ///
  /// Points outside the leaf by more than `tolerance` are rejected.
  pub fn find_cell(&self, point: DVec3, tolerance: f64) -> Option<CellLocation> {
    let mut cursor = OrientedGeometryCursor::new(self.grid);
    let global_index = self.search_with_cursor(point, &mut cursor)?;
    let cell = Cell::construct(self.grid, cursor.origin(), cursor.size());
    let evaluation = cell.evaluate_position(point);
    if !evaluation.inside && evaluation.dist2 > tolerance * tolerance {
      return None;
    }
    Some(CellLocation {
      global_index,
      cell,
      pcoords: evaluation.pcoords,
      weights: evaluation.weights,
      dist2: evaluation.dist2,
    })
  }

  fn level_zero_index(&self, point: DVec3) -> Option<TreeIndex> {
    let tolerance = self.config.tolerance;
    let mut ijk = [0usize; 3];
    for &axis in self.grid.axes() {
      let values = self.grid.coordinates(axis);
      let (first, last) = (values[0], values[values.len() - 1]);
      let coord = point[axis];
      let coord = if coord < first && first - coord <= tolerance {
        first
      } else if coord > last && coord - last <= tolerance {
        last
      } else {
        coord
      };
      ijk[axis] = self.grid.find_dichotomic(axis, coord)?;
    }
    Some(self.grid.index_from_level_zero_coordinates(ijk))
  }

  /// Child of the cell at `origin` with `size` whose bin holds `point`.
  fn child_containing(&self, point: DVec3, origin: DVec3, size: DVec3) -> usize {
    let last = self.bins.len() - 1;
    let mut digits = [0usize; 3];
    for (digit, &axis) in digits.iter_mut().zip(self.grid.axes()) {
      let normalized = (point[axis] - origin[axis]) / size[axis];
      *digit = self.bins.partition_point(|&bound| bound <= normalized).min(last);
    }
    self.grid.child_index_from_digits(digits)
  }

  // ---------------------------------------------------------------------------
  // Segment intersection
  // ---------------------------------------------------------------------------

  /// First leaf the segment `p0 p1` enters.
  ///
  /// A segment starting outside the grid is advanced just past the grid
  /// boundary before the point search. If that search lands in a masked
  /// region, every tree is searched in order of entry.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "locator::intersect_with_line"))]
  pub fn intersect_with_line(&self, p0: DVec3, p1: DVec3, tolerance: f64) -> Option<LineHit> {
    let bounds = self.grid.bounds();
    let (t_enter, _) = bounds.expanded(tolerance).intersect_segment(p0, p1)?;

    let probe = if bounds.contains_point(p0) {
      p0
    } else {
      let length = (p1 - p0).length();
      let t = if length > 0.0 {
        (t_enter + self.entry_epsilon(tolerance) / length).min(1.0)
      } else {
        t_enter
      };
      p0 + (p1 - p0) * t
    };

    if let Some(location) = self.find_cell(probe, tolerance) {
      if let Some(hit) = location.cell.intersect_with_line(p0, p1, tolerance) {
        return Some(LineHit {
          t: hit.t,
          point: hit.point,
          global_index: location.global_index,
        });
      }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(?probe, "point search failed, scanning trees");
    self.brute_force_intersection(p0, p1, tolerance)
  }

  /// Distance to step past the grid boundary: a small fraction of the
  /// finest cell diagonal, but never under twice the tolerance.
  fn entry_epsilon(&self, tolerance: f64) -> f64 {
    let levels = self.grid.number_of_levels().max(1);
    let finest = self.grid.bounds().diagonal_length() / (self.grid.branch_factor() as f64).powi(levels as i32);
    (2.0 * tolerance).max(1e-3 * finest)
  }

  fn brute_force_intersection(&self, p0: DVec3, p1: DVec3, tolerance: f64) -> Option<LineHit> {
    let grid = self.grid;
    let mut candidates: Vec<(f64, TreeIndex)> = grid
      .trees()
      .filter_map(|(tree_index, _)| {
        let root = Bounds::from_origin_size(grid.level_zero_origin(tree_index), grid.level_zero_size(tree_index));
        root
          .expanded(tolerance)
          .intersect_segment(p0, p1)
          .map(|(t, _)| (t, tree_index))
      })
      .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut cursor = NonOrientedGeometryCursor::new(grid);
    for (_, tree_index) in candidates {
      if cursor.initialize(tree_index).is_none() {
        continue;
      }
      if let Some(hit) = self.first_hit(&mut cursor, p0, p1, tolerance) {
        return Some(hit);
      }
    }
    None
  }

  /// Depth-first search for the first effective leaf along the segment,
  /// visiting children in order of entry.
  fn first_hit(
    &self,
    cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>,
    p0: DVec3,
    p1: DVec3,
    tolerance: f64,
  ) -> Option<LineHit> {
    if cursor.is_masked() || cursor.is_ghost() {
      return None;
    }
    let (t, _) = cursor.bounds().expanded(tolerance).intersect_segment(p0, p1)?;
    if leaf_or_children_masked(self.grid, cursor.entry()) {
      return cursor.global_node_index().map(|global_index| LineHit {
        t,
        point: p0 + (p1 - p0) * t,
        global_index,
      });
    }

    let grid = self.grid;
    let mut children: SmallVec<[(f64, usize); 27]> = SmallVec::new();
    for ichild in 0..grid.number_of_children() {
      let mut child = *cursor.entry();
      if child.to_child(grid, ichild).is_err() || child.is_masked(grid) || child.is_ghost(grid) {
        continue;
      }
      if let Some((t, _)) = child.bounds(grid).expanded(tolerance).intersect_segment(p0, p1) {
        children.push((t, ichild));
      }
    }
    children.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (_, ichild) in children {
      cursor.to_child(ichild).ok()?;
      if let Some(hit) = self.first_hit(cursor, p0, p1, tolerance) {
        return Some(hit);
      }
      cursor.to_parent().ok()?;
    }
    None
  }

  /// Every effective leaf the segment `p0 p1` crosses, sorted by `t`.
  ///
  /// Trees are processed in parallel. A tree whose traversal fails is
  /// left out of the result.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "locator::intersect_with_line_all"))]
  pub fn intersect_with_line_all(&self, p0: DVec3, p1: DVec3, tolerance: f64) -> LineIntersections {
    let tree_indices = self.grid.tree_indices();
    tree_indices
      .par_iter()
      .fold(
        || (NonOrientedGeometryCursor::new(self.grid), LineIntersections::default()),
        |(mut cursor, mut hits), &tree_index| {
          let start = hits.len();
          if let Err(_error) = self.collect_tree_hits(&mut cursor, tree_index, p0, p1, tolerance, &mut hits) {
            #[cfg(feature = "tracing")]
            tracing::warn!(tree_index, error = %_error, "skipping tree in line intersection");
            hits.truncate(start);
          }
          (cursor, hits)
        },
      )
      .map(|(_, hits)| hits)
      .reduce(LineIntersections::default, |mut all, hits| {
        all.append(hits);
        all
      })
      .sorted()
  }

  fn collect_tree_hits(
    &self,
    cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>,
    tree_index: TreeIndex,
    p0: DVec3,
    p1: DVec3,
    tolerance: f64,
    hits: &mut LineIntersections,
  ) -> CursorResult<()> {
    cursor.initialize(tree_index).ok_or(CursorError::NoTree)?;
    self.collect_hits(cursor, p0, p1, tolerance, hits)
  }

  fn collect_hits(
    &self,
    cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>,
    p0: DVec3,
    p1: DVec3,
    tolerance: f64,
    hits: &mut LineIntersections,
  ) -> CursorResult<()> {
    if cursor.is_masked() || cursor.is_ghost() {
      return Ok(());
    }
    let Some((t, _)) = cursor.bounds().expanded(tolerance).intersect_segment(p0, p1) else {
      return Ok(());
    };
    if leaf_or_children_masked(self.grid, cursor.entry()) {
      if let Some(global_index) = cursor.global_node_index() {
        hits.push(p0 + (p1 - p0) * t, global_index, t);
      }
      return Ok(());
    }
    for ichild in 0..cursor.number_of_children() {
      cursor.to_child(ichild)?;
      self.collect_hits(cursor, p0, p1, tolerance, hits)?;
      cursor.to_parent()?;
    }
    Ok(())
  }
}

fn leaf_or_children_masked(grid: &HyperTreeGrid, entry: &LevelEntry) -> bool {
  if entry.is_leaf(grid) {
    return true;
  }
  if !grid.has_mask() && !grid.has_any_ghost_cells() {
    return false;
  }
  (0..grid.number_of_children()).all(|ichild| {
    let mut child = *entry;
    child.to_child(grid, ichild).is_err() || child.is_masked(grid) || child.is_ghost(grid)
  })
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
