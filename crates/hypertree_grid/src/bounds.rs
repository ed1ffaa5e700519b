//! Axis-aligned cell bounds in double precision.

use glam::DVec3;

/// Double-precision axis-aligned box.
///
/// Cells of 1D and 2D grids are degenerate along their flat axes
/// (`min == max` there). Every query below accepts degenerate boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl Bounds {
  /// Create bounds from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "bounds min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Bounds of the cell `[origin, origin + size]`.
  #[inline]
  pub fn from_origin_size(origin: DVec3, size: DVec3) -> Self {
    Self {
      min: origin,
      max: origin + size,
    }
  }

  /// Grow the box by `margin` on every side.
  #[inline]
  pub fn expanded(&self, margin: f64) -> Self {
    Self {
      min: self.min - DVec3::splat(margin),
      max: self.max + DVec3::splat(margin),
    }
  }

  /// Check if two boxes share any interior or boundary point.
  #[inline]
  pub fn overlaps(&self, other: &Bounds) -> bool {
    self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
  }

  /// Check if `other` lies entirely inside this box.
  #[inline]
  pub fn contains(&self, other: &Bounds) -> bool {
    self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
  }

  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Length of the box diagonal.
  #[inline]
  pub fn diagonal_length(&self) -> f64 {
    self.size().length()
  }

  /// Clip the segment `p0 + t (p1 - p0)`, `t` in `[0, 1]`, against the box.
  ///
  /// Returns the parametric entry and exit values, or `None` when the
  /// segment misses the box.
  pub fn intersect_segment(&self, p0: DVec3, p1: DVec3) -> Option<(f64, f64)> {
    let direction = p1 - p0;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for axis in 0..3 {
      let origin = p0[axis];
      let delta = direction[axis];
      let (lo, hi) = (self.min[axis], self.max[axis]);

      if delta == 0.0 {
        if origin < lo || origin > hi {
          return None;
        }
        continue;
      }

      let inverse = 1.0 / delta;
      let mut t0 = (lo - origin) * inverse;
      let mut t1 = (hi - origin) * inverse;
      if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
      }
      t_enter = t_enter.max(t0);
      t_exit = t_exit.min(t1);
      if t_enter > t_exit {
        return None;
      }
    }

    Some((t_enter, t_exit))
  }
}
