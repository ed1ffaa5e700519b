//! Cut the leaves of a grid with a plane.
//!
//! Subtrees whose bounds lie entirely on one side of the plane are pruned
//! before descending. A box counts as cut when its signed distance range
//! `[min, max]` satisfies `min < 0 <= max`, so a face lying on the plane is
//! reported once, by the cell on its negative side.

use glam::DVec3;
use smallvec::SmallVec;

use super::{check_abort, AbortFlag};
use crate::bounds::Bounds;
use crate::cursor::NonOrientedGeometryCursor;
use crate::error::FilterError;
use crate::grid::HyperTreeGrid;

/// Oriented plane through `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub origin: DVec3,

  /// Unit normal, or zero for a degenerate plane that cuts nothing.
  pub normal: DVec3,
}

impl Plane {
  pub fn new(origin: DVec3, normal: DVec3) -> Self {
    Self {
      origin,
      normal: normal.normalize_or_zero(),
    }
  }

  #[inline]
  pub fn signed_distance(&self, point: DVec3) -> f64 {
    (point - self.origin).dot(self.normal)
  }

  /// Signed distance range of `bounds`.
  #[inline]
  fn distance_range(&self, bounds: &Bounds) -> (f64, f64) {
    let center = self.signed_distance(bounds.center());
    let radius = (self.normal.abs() * bounds.size() * 0.5).element_sum();
    (center - radius, center + radius)
  }

  #[inline]
  fn cuts(&self, bounds: &Bounds) -> bool {
    let (min, max) = self.distance_range(bounds);
    min < 0.0 && 0.0 <= max
  }
}

impl Default for Plane {
  /// The `x = 0` plane.
  fn default() -> Self {
    Self::new(DVec3::ZERO, DVec3::X)
  }
}

/// Plane cutter settings.
#[derive(Clone, Debug, Default)]
pub struct PlaneCutterConfig {
  pub plane: Plane,

  /// Polled before each tree.
  pub abort: Option<AbortFlag>,
}

impl PlaneCutterConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_plane(mut self, plane: Plane) -> Self {
    self.plane = plane;
    self
  }

  pub fn with_abort_flag(mut self, abort: AbortFlag) -> Self {
    self.abort = Some(abort);
    self
  }
}

/// Cross-section of one leaf.
///
/// Points are ordered around the polygon in 3D. A 2D grid yields a
/// two-point segment and a 1D grid a single point.
#[derive(Clone, Debug, PartialEq)]
pub struct CutPolygon {
  pub global_index: u64,
  pub points: SmallVec<[DVec3; 6]>,
}

impl CutPolygon {
  /// Area of the polygon, zero for segments and points.
  pub fn area(&self) -> f64 {
    let Some(&first) = self.points.first() else {
      return 0.0;
    };
    let mut twice_area = DVec3::ZERO;
    for pair in self.points.windows(2) {
      twice_area += (pair[0] - first).cross(pair[1] - first);
    }
    0.5 * twice_area.length()
  }
}

/// Every cut leaf, in tree order then depth-first order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaneCutOutput {
  pub polygons: Vec<CutPolygon>,
}

impl PlaneCutOutput {
  pub fn len(&self) -> usize {
    self.polygons.len()
  }

  pub fn is_empty(&self) -> bool {
    self.polygons.is_empty()
  }

  /// Global indices of the cut leaves.
  pub fn cut_leaves(&self) -> impl Iterator<Item = u64> + '_ {
    self.polygons.iter().map(|polygon| polygon.global_index)
  }
}

/// Cut every unmasked leaf of `grid` crossed by the configured plane.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "filters::cut_with_plane"))]
pub fn cut_with_plane(grid: &HyperTreeGrid, config: &PlaneCutterConfig) -> Result<PlaneCutOutput, FilterError> {
  let mut pass = CutPass {
    plane: config.plane,
    axes: grid.axes().iter().copied().collect(),
    output: PlaneCutOutput::default(),
  };
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  for tree_index in grid.tree_indices() {
    check_abort(config.abort.as_ref())?;
    if cursor.initialize(tree_index).is_none() {
      continue;
    }
    pass.recurse(&mut cursor)?;
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(polygons = pass.output.len(), "plane cut");
  Ok(pass.output)
}

struct CutPass {
  plane: Plane,
  axes: SmallVec<[usize; 3]>,
  output: PlaneCutOutput,
}

impl CutPass {
  fn recurse(&mut self, cursor: &mut NonOrientedGeometryCursor<&HyperTreeGrid>) -> Result<(), FilterError> {
    if cursor.is_masked() {
      return Ok(());
    }
    let bounds = cursor.bounds();
    if !self.plane.cuts(&bounds) {
      return Ok(());
    }
    if cursor.is_leaf() {
      if let Some(global_index) = cursor.global_node_index() {
        let points = self.cut_box(&bounds);
        if points.len() >= self.axes.len() {
          self.output.polygons.push(CutPolygon { global_index, points });
        }
      }
      return Ok(());
    }
    for ichild in 0..cursor.number_of_children() {
      cursor.to_child(ichild)?;
      self.recurse(cursor)?;
      cursor.to_parent()?;
    }
    Ok(())
  }

  /// Intersection of the plane with the box spanned over the grid axes.
  fn cut_box(&self, bounds: &Bounds) -> SmallVec<[DVec3; 6]> {
    let dimension = self.axes.len();
    let number_of_corners = 1usize << dimension;
    let corners: SmallVec<[DVec3; 8]> = (0..number_of_corners)
      .map(|corner| {
        let mut point = bounds.min;
        for (bit, &axis) in self.axes.iter().enumerate() {
          if corner & (1 << bit) != 0 {
            point[axis] = bounds.max[axis];
          }
        }
        point
      })
      .collect();
    let distances: SmallVec<[f64; 8]> = corners.iter().map(|&corner| self.plane.signed_distance(corner)).collect();

    let mut points: SmallVec<[DVec3; 6]> = SmallVec::new();
    for (corner, &distance) in corners.iter().zip(&distances) {
      if distance == 0.0 {
        points.push(*corner);
      }
    }
    for a in 0..number_of_corners {
      for bit in 0..dimension {
        let b = a | (1 << bit);
        if b == a {
          continue;
        }
        let (da, db) = (distances[a], distances[b]);
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
          let t = da / (da - db);
          points.push(corners[a] + (corners[b] - corners[a]) * t);
        }
      }
    }

    if points.len() > 2 {
      self.sort_around_normal(&mut points);
    }
    points
  }

  fn sort_around_normal(&self, points: &mut [DVec3]) {
    let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    let u = self.plane.normal.any_orthonormal_vector();
    let v = self.plane.normal.cross(u);
    let angle = |point: &DVec3| {
      let offset = *point - centroid;
      offset.dot(v).atan2(offset.dot(u))
    };
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
  }
}

#[cfg(test)]
#[path = "plane_cutter_test.rs"]
mod plane_cutter_test;
