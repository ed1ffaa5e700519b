//! Cell field gradients by finite differences between leaf centers.
//!
//! Along each grid axis the gradient uses a central difference when both
//! face neighbors are usable and a one-sided difference when only one is.
//! The step is the distance between the two cell centers along that axis.
//! A neighbor is usable when it has a tree, is unmasked and has a global
//! index.
//!
//! Two neighborhoods are available:
//!
//! - [`GradientMode::Unstructured`] walks a Von Neumann super cursor and
//!   compares each leaf with its face neighbors as they are, coarser or
//!   not.
//! - [`GradientMode::Unlimited`] walks an unlimited Moore super cursor.
//!   Coarser neighbors are seen through virtual cells at the leaf's level,
//!   carrying the value of their last real cell. With
//!   [`GradientConfig::extensive`] set, those values are scaled by the
//!   fraction of the real cell the virtual cell covers.

use glam::DVec3;
use smallvec::SmallVec;

use super::{check_abort, check_field, AbortFlag};
use crate::entry::{Entry, LevelEntry, UnlimitedLevelEntry};
use crate::error::FilterError;
use crate::grid::HyperTreeGrid;
use crate::super_cursor::SuperCursor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientMode {
  #[default]
  Unstructured,
  Unlimited,
}

/// Gradient settings.
#[derive(Clone, Debug, Default)]
pub struct GradientConfig {
  pub mode: GradientMode,

  /// Treat the field as extensive (a quantity per cell rather than a
  /// density). Only affects [`GradientMode::Unlimited`].
  pub extensive: bool,

  /// Polled before each tree.
  pub abort: Option<AbortFlag>,
}

impl GradientConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_mode(mut self, mode: GradientMode) -> Self {
    self.mode = mode;
    self
  }

  pub fn with_extensive(mut self, extensive: bool) -> Self {
    self.extensive = extensive;
    self
  }

  pub fn with_abort_flag(mut self, abort: AbortFlag) -> Self {
    self.abort = Some(abort);
    self
  }
}

/// Compute the gradient of `field` at every leaf.
///
/// Returns one vector per global index. Masked cells and non-leaf cells get
/// zero.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "filters::gradient"))]
pub fn gradient(grid: &HyperTreeGrid, field: &[f64], config: &GradientConfig) -> Result<Vec<DVec3>, FilterError> {
  check_field(grid, field)?;
  let mut pass = GradientPass {
    field,
    extensive: config.extensive,
    gradients: vec![DVec3::ZERO; grid.global_index_bound() as usize],
  };
  match config.mode {
    GradientMode::Unstructured => pass.run(SuperCursor::von_neumann(grid)?, config)?,
    GradientMode::Unlimited => pass.run(SuperCursor::unlimited_moore(grid)?, config)?,
  }
  Ok(pass.gradients)
}

/// Where the gradient descent stops, and how neighbor values scale.
trait GradientEntry: Entry {
  fn is_sample(&self, grid: &HyperTreeGrid) -> bool;

  fn extensive_scale(&self, grid: &HyperTreeGrid) -> f64;
}

impl GradientEntry for LevelEntry {
  #[inline]
  fn is_sample(&self, grid: &HyperTreeGrid) -> bool {
    self.is_leaf(grid)
  }

  #[inline]
  fn extensive_scale(&self, _grid: &HyperTreeGrid) -> f64 {
    1.0
  }
}

impl GradientEntry for UnlimitedLevelEntry {
  #[inline]
  fn is_sample(&self, grid: &HyperTreeGrid) -> bool {
    self.is_real_leaf(grid)
  }

  #[inline]
  fn extensive_scale(&self, grid: &HyperTreeGrid) -> f64 {
    self.extensive_property_ratio(grid)
  }
}

/// Center and value of one neighbor.
#[derive(Clone, Copy, Debug)]
struct Sample {
  point: DVec3,
  value: f64,
}

/// Finite difference from `a` to `b` along `axis`.
#[inline]
fn difference(a: Sample, b: Sample, axis: usize) -> f64 {
  let step = b.point[axis] - a.point[axis];
  if step == 0.0 {
    return 0.0;
  }
  (b.value - a.value) / step
}

struct GradientPass<'a> {
  field: &'a [f64],
  extensive: bool,
  gradients: Vec<DVec3>,
}

impl GradientPass<'_> {
  fn run<E: GradientEntry>(&mut self, mut cursor: SuperCursor<'_, E>, config: &GradientConfig) -> Result<(), FilterError> {
    let grid = cursor.grid();

    // (axis, lower neighbor, upper neighbor) per grid axis.
    let mut sides: SmallVec<[(usize, usize, usize); 3]> = SmallVec::new();
    for (j, &axis) in grid.axes().iter().enumerate() {
      let mut offset = [0; 3];
      offset[j] = -1;
      let lower = cursor.neighborhood().index_of_offset(offset);
      offset[j] = 1;
      let upper = cursor.neighborhood().index_of_offset(offset);
      if let (Some(lower), Some(upper)) = (lower, upper) {
        sides.push((axis, lower, upper));
      }
    }

    for tree_index in grid.tree_indices() {
      check_abort(config.abort.as_ref())?;
      if cursor.initialize(tree_index).is_none() {
        continue;
      }
      self.recurse(&mut cursor, &sides)?;
    }
    Ok(())
  }

  fn recurse<E: GradientEntry>(
    &mut self,
    cursor: &mut SuperCursor<'_, E>,
    sides: &[(usize, usize, usize)],
  ) -> Result<(), FilterError> {
    let central = cursor.central_index();
    if cursor.is_masked(central) {
      return Ok(());
    }
    if cursor.central().is_sample(cursor.grid()) {
      self.process_leaf(cursor, sides);
      return Ok(());
    }
    for ichild in 0..cursor.number_of_children() {
      cursor.to_child(ichild)?;
      self.recurse(cursor, sides)?;
      cursor.to_parent()?;
    }
    Ok(())
  }

  fn process_leaf<E: GradientEntry>(&mut self, cursor: &SuperCursor<'_, E>, sides: &[(usize, usize, usize)]) {
    let central = cursor.central_index();
    let (Some(global), Some(center)) = (cursor.global_node_index(central), self.sample(cursor, central)) else {
      return;
    };

    let mut gradient = DVec3::ZERO;
    for &(axis, lower, upper) in sides {
      gradient[axis] = match (self.sample(cursor, lower), self.sample(cursor, upper)) {
        (Some(lower), Some(upper)) => difference(lower, upper, axis),
        (Some(lower), None) => difference(lower, center, axis),
        (None, Some(upper)) => difference(center, upper, axis),
        (None, None) => 0.0,
      };
    }
    self.gradients[global as usize] = gradient;
  }

  fn sample<E: GradientEntry>(&self, cursor: &SuperCursor<'_, E>, i: usize) -> Option<Sample> {
    if !cursor.has_tree(i) || cursor.is_masked(i) {
      return None;
    }
    let global = cursor.global_node_index(i)?;
    let mut value = self.field[global as usize];
    if self.extensive {
      value *= cursor.entry(i).ok()?.extensive_scale(cursor.grid());
    }
    Some(Sample {
      point: cursor.point(i),
      value,
    })
  }
}

#[cfg(test)]
#[path = "gradient_test.rs"]
mod gradient_test;
