//! Feature edges of 2D and 3D grids.
//!
//! A face of an unmasked leaf is a feature face when the cell across it is
//! absent, masked or coarser. Faces between same-level leaves are interior.
//! A refined neighbor leaves the face to its own finer leaves. Feature faces
//! emit their outline: one segment in 2D, four edges in 3D. Edges shared by
//! two feature faces are emitted by both.

use glam::DVec3;
use smallvec::SmallVec;

use super::{check_abort, AbortFlag};
use crate::bounds::Bounds;
use crate::error::FilterError;
use crate::grid::HyperTreeGrid;
use crate::super_cursor::VonNeumannSuperCursor;

#[derive(Clone, Debug, Default)]
pub struct FeatureEdgesConfig {
  /// Polled before each tree.
  pub abort: Option<AbortFlag>,
}

impl FeatureEdgesConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_abort_flag(mut self, abort: AbortFlag) -> Self {
    self.abort = Some(abort);
    self
  }
}

/// Feature edge segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureEdgesOutput {
  pub points: Vec<DVec3>,
  pub edges: Vec<[u32; 2]>,

  /// Global index of the leaf that emitted each edge.
  pub cell_ids: Vec<u64>,
}

impl FeatureEdgesOutput {
  pub fn len(&self) -> usize {
    self.edges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }

  /// Summed length of every edge.
  pub fn total_length(&self) -> f64 {
    self
      .edges
      .iter()
      .map(|&[a, b]| self.points[a as usize].distance(self.points[b as usize]))
      .sum()
  }

  fn add_edge(&mut self, a: DVec3, b: DVec3, global_index: u64) {
    let first = self.points.len() as u32;
    self.points.push(a);
    self.points.push(b);
    self.edges.push([first, first + 1]);
    self.cell_ids.push(global_index);
  }
}

/// Face of the central cell: neighbor cursor, spanned axis index and side.
#[derive(Clone, Copy, Debug)]
struct Face {
  cursor: usize,
  axis: usize,
  upper: bool,
}

/// Extract the feature edges of `grid`.
///
/// Fails with [`FilterError::UnsupportedDimension`] on 1D grids.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "filters::feature_edges"))]
pub fn feature_edges(grid: &HyperTreeGrid, config: &FeatureEdgesConfig) -> Result<FeatureEdgesOutput, FilterError> {
  let dimension = grid.dimension();
  if dimension < 2 {
    return Err(FilterError::UnsupportedDimension(dimension));
  }

  let mut cursor = VonNeumannSuperCursor::von_neumann(grid)?;
  let mut faces: SmallVec<[Face; 6]> = SmallVec::new();
  for (j, &axis) in grid.axes().iter().enumerate() {
    for upper in [false, true] {
      let mut offset = [0; 3];
      offset[j] = if upper { 1 } else { -1 };
      if let Some(index) = cursor.neighborhood().index_of_offset(offset) {
        faces.push(Face {
          cursor: index,
          axis,
          upper,
        });
      }
    }
  }

  let mut pass = EdgePass {
    axes: grid.axes().iter().copied().collect(),
    faces,
    output: FeatureEdgesOutput::default(),
  };
  for tree_index in grid.tree_indices() {
    check_abort(config.abort.as_ref())?;
    if cursor.initialize(tree_index).is_none() {
      continue;
    }
    pass.recurse(&mut cursor)?;
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(edges = pass.output.len(), "feature edges extracted");
  Ok(pass.output)
}

struct EdgePass {
  axes: SmallVec<[usize; 3]>,
  faces: SmallVec<[Face; 6]>,
  output: FeatureEdgesOutput,
}

impl EdgePass {
  fn recurse(&mut self, cursor: &mut VonNeumannSuperCursor<'_>) -> Result<(), FilterError> {
    let central = cursor.central_index();
    if cursor.is_masked(central) {
      return Ok(());
    }
    if cursor.is_leaf(central) {
      if let Some(global_index) = cursor.global_node_index(central) {
        self.process_leaf(cursor, global_index);
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

  fn process_leaf(&mut self, cursor: &VonNeumannSuperCursor<'_>, global_index: u64) {
    let central = cursor.central_index();
    let level = cursor.level(central);
    let bounds = cursor.bounds(central);
    for face in self.faces.clone() {
      let i = face.cursor;
      if cursor.has_tree(i) && !cursor.is_masked(i) && cursor.level(i) >= level {
        continue;
      }
      self.emit_face(&bounds, face, global_index);
    }
  }

  fn emit_face(&mut self, bounds: &Bounds, face: Face, global_index: u64) {
    let mut base = bounds.min;
    base[face.axis] = if face.upper {
      bounds.max[face.axis]
    } else {
      bounds.min[face.axis]
    };
    let mut tangents = self.axes.iter().copied().filter(|&axis| axis != face.axis);
    let extent = |axis: usize| {
      let mut step = DVec3::ZERO;
      step[axis] = bounds.max[axis] - bounds.min[axis];
      step
    };

    match (tangents.next(), tangents.next()) {
      (Some(u), None) => self.output.add_edge(base, base + extent(u), global_index),
      (Some(u), Some(v)) => {
        let (du, dv) = (extent(u), extent(v));
        let outline = [base, base + du, base + du + dv, base + dv];
        for k in 0..4 {
          self.output.add_edge(outline[k], outline[(k + 1) % 4], global_index);
        }
      }
      _ => {}
    }
  }
}

#[cfg(test)]
#[path = "feature_edges_test.rs"]
mod feature_edges_test;
