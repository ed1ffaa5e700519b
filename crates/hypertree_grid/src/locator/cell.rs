//! Axis-aligned cell geometry: lines, pixels and voxels.

use glam::DVec3;
use smallvec::SmallVec;

use crate::bounds::Bounds;
use crate::grid::HyperTreeGrid;

/// Shape of a grid cell, by grid dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
  Line,
  Pixel,
  Voxel,
}

/// Axis-aligned cell spanning the grid's axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
  kind: CellKind,
  origin: DVec3,
  size: DVec3,
  axes: SmallVec<[usize; 3]>,
}

/// Result of [`Cell::evaluate_position`].
#[derive(Clone, Debug, PartialEq)]
pub struct PositionEvaluation {
  /// Point lies inside the cell's parametric range.
  pub inside: bool,
  /// Parametric coordinates, one per spanned axis, zero beyond.
  pub pcoords: DVec3,
  /// Multilinear interpolation weights of the cell points.
  pub weights: SmallVec<[f64; 8]>,
  /// Closest point of the cell.
  pub closest_point: DVec3,
  /// Squared distance to the closest point.
  pub dist2: f64,
}

/// Result of [`Cell::intersect_with_line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLineIntersection {
  /// Parametric position along the segment.
  pub t: f64,
  pub point: DVec3,
  pub pcoords: DVec3,
}

impl Cell {
  /// Cell at `origin` with extent `size` in `grid`'s layout.
  pub fn construct(grid: &HyperTreeGrid, origin: DVec3, size: DVec3) -> Self {
    let kind = match grid.dimension() {
      1 => CellKind::Line,
      2 => CellKind::Pixel,
      _ => CellKind::Voxel,
    };
    Self {
      kind,
      origin,
      size,
      axes: grid.axes().iter().copied().collect(),
    }
  }

  #[inline]
  pub fn kind(&self) -> CellKind {
    self.kind
  }

  #[inline]
  pub fn bounds(&self) -> Bounds {
    Bounds::from_origin_size(self.origin, self.size)
  }

  #[inline]
  pub fn number_of_points(&self) -> usize {
    1 << self.axes.len()
  }

  /// Cell points, axis 0 varying fastest.
  pub fn points(&self) -> SmallVec<[DVec3; 8]> {
    (0..self.number_of_points())
      .map(|corner| {
        let mut point = self.origin;
        for (a, &axis) in self.axes.iter().enumerate() {
          if corner & (1 << a) != 0 {
            point[axis] += self.size[axis];
          }
        }
        point
      })
      .collect()
  }

  /// World position of parametric coordinates.
  pub fn evaluate_location(&self, pcoords: DVec3) -> DVec3 {
    let mut point = self.origin;
    for (a, &axis) in self.axes.iter().enumerate() {
      point[axis] += pcoords[a] * self.size[axis];
    }
    point
  }

  /// Parametric coordinates of `x`, interpolation weights and distance to
  /// the cell.
  pub fn evaluate_position(&self, x: DVec3) -> PositionEvaluation {
    let mut pcoords = DVec3::ZERO;
    let mut inside = true;
    for (a, &axis) in self.axes.iter().enumerate() {
      let extent = self.size[axis];
      let p = if extent > 0.0 {
        (x[axis] - self.origin[axis]) / extent
      } else {
        0.0
      };
      if !(0.0..=1.0).contains(&p) {
        inside = false;
      }
      pcoords[a] = p;
    }

    let clamped = pcoords.clamp(DVec3::ZERO, DVec3::ONE);
    let mut closest_point = self.evaluate_location(clamped);
    // Off-plane distance counts too.
    for axis in 0..3 {
      if !self.axes.contains(&axis) {
        closest_point[axis] = self.origin[axis];
      }
    }

    PositionEvaluation {
      inside,
      pcoords,
      weights: self.interpolation_weights(clamped),
      closest_point,
      dist2: x.distance_squared(closest_point),
    }
  }

  /// Multilinear weights of the cell points at `pcoords`.
  pub fn interpolation_weights(&self, pcoords: DVec3) -> SmallVec<[f64; 8]> {
    (0..self.number_of_points())
      .map(|corner| {
        (0..self.axes.len())
          .map(|a| {
            if corner & (1 << a) != 0 {
              pcoords[a]
            } else {
              1.0 - pcoords[a]
            }
          })
          .product()
      })
      .collect()
  }

  /// First point of the segment `p0 p1` within `tolerance` of the cell.
  pub fn intersect_with_line(&self, p0: DVec3, p1: DVec3, tolerance: f64) -> Option<CellLineIntersection> {
    let (t, _) = self.bounds().expanded(tolerance).intersect_segment(p0, p1)?;
    let point = p0 + (p1 - p0) * t;
    Some(CellLineIntersection {
      t,
      point,
      pcoords: self.evaluate_position(point).pcoords,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::GridConfig;

  fn planar_grid() -> HyperTreeGrid {
    HyperTreeGrid::new(GridConfig::default()).unwrap()
  }

  #[test]
  fn test_kind_follows_dimension() {
    let grid = planar_grid();
    let cell = Cell::construct(&grid, DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    assert_eq!(cell.kind(), CellKind::Pixel);
    assert_eq!(cell.number_of_points(), 4);
    assert_eq!(cell.points()[3], DVec3::new(1.0, 1.0, 0.0));

    let voxel_grid = HyperTreeGrid::new(GridConfig::uniform([1, 1, 1], DVec3::ZERO, DVec3::ONE)).unwrap();
    let voxel = Cell::construct(&voxel_grid, DVec3::ZERO, DVec3::ONE);
    assert_eq!(voxel.kind(), CellKind::Voxel);
    assert_eq!(voxel.points()[5], DVec3::new(1.0, 0.0, 1.0));
  }

  #[test]
  fn test_evaluate_position_inside() {
    let grid = planar_grid();
    let cell = Cell::construct(&grid, DVec3::new(1.0, 2.0, 0.0), DVec3::new(2.0, 4.0, 0.0));
    let eval = cell.evaluate_position(DVec3::new(1.5, 5.0, 0.0));
    assert!(eval.inside);
    assert_eq!(eval.pcoords, DVec3::new(0.25, 0.75, 0.0));
    assert_eq!(eval.dist2, 0.0);
    let total: f64 = eval.weights.iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!((eval.weights[2] - 0.75 * 0.75).abs() < 1e-12);
  }

  #[test]
  fn test_evaluate_position_outside() {
    let grid = planar_grid();
    let cell = Cell::construct(&grid, DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    let eval = cell.evaluate_position(DVec3::new(2.0, 0.5, 0.0));
    assert!(!eval.inside);
    assert_eq!(eval.closest_point, DVec3::new(1.0, 0.5, 0.0));
    assert_eq!(eval.dist2, 1.0);

    let above = cell.evaluate_position(DVec3::new(0.5, 0.5, 0.5));
    assert!(above.inside, "in-plane coordinates are inside");
    assert_eq!(above.dist2, 0.25);
  }

  #[test]
  fn test_intersect_with_line() {
    let grid = planar_grid();
    let cell = Cell::construct(&grid, DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    let hit = cell
      .intersect_with_line(DVec3::new(0.25, 0.5, -1.0), DVec3::new(0.25, 0.5, 1.0), 0.0)
      .unwrap();
    assert!((hit.t - 0.5).abs() < 1e-12);
    assert_eq!(hit.point, DVec3::new(0.25, 0.5, 0.0));
    assert_eq!(hit.pcoords, DVec3::new(0.25, 0.5, 0.0));
    assert!(cell
      .intersect_with_line(DVec3::new(2.0, 0.5, -1.0), DVec3::new(2.0, 0.5, 1.0), 0.1)
      .is_none());
  }
}
