//! Dual-grid iso-contouring of a cell field.
//!
//! Each corner owned by a leaf (see
//! [`SuperCursor::corner_cursors`](crate::super_cursor::SuperCursor::corner_cursors))
//! defines one dual cell. Its nodes are the centers of the `2^d` leaves
//! around the corner, carrying their field values. Dual cells whose values
//! straddle an iso value emit one point in 1D, marching squares segments in
//! 2D and marching tetrahedra triangles in 3D.
//!
//! ```text
//! Dual node order (binary, axis 0 fastest):
//!
//!      2 ----- 3            6 ----- 7
//!      |       |           /|      /|
//!      |       |          4 ----- 5 |
//!      0 ----- 1          | 2 ----|-3
//!                         |/      |/
//!                         0 ----- 1
//! ```
//!
//! A node counts as above an iso value when its value is `>= iso`.

use glam::DVec3;
use smallvec::SmallVec;

use super::{check_abort, check_field, AbortFlag};
use crate::error::FilterError;
use crate::grid::HyperTreeGrid;
use crate::super_cursor::{CornerLeaves, MooreSuperCursor};

/// Square perimeter, as node pairs in winding order.
const SQUARE_EDGES: [(usize, usize); 4] = [(0, 1), (1, 3), (3, 2), (2, 0)];

/// Six tetrahedra sharing the 0-7 diagonal of a dual hexahedron.
const HEX_TETRAHEDRA: [[usize; 4]; 6] = [
  [0, 1, 3, 7],
  [0, 3, 2, 7],
  [0, 2, 6, 7],
  [0, 6, 4, 7],
  [0, 4, 5, 7],
  [0, 5, 1, 7],
];

/// Contour settings.
#[derive(Clone, Debug, Default)]
pub struct ContourConfig {
  /// Iso values to extract.
  pub iso_values: Vec<f64>,

  /// Polled before each tree.
  pub abort: Option<AbortFlag>,
}

impl ContourConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_iso_values(mut self, iso_values: impl IntoIterator<Item = f64>) -> Self {
    self.iso_values = iso_values.into_iter().collect();
    self
  }

  pub fn with_abort_flag(mut self, abort: AbortFlag) -> Self {
    self.abort = Some(abort);
    self
  }
}

/// Contour geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContourOutput {
  pub points: Vec<DVec3>,

  /// Iso value of each point.
  pub scalars: Vec<f64>,

  /// Single-point cells, from 1D grids.
  pub vertices: Vec<u32>,

  /// Line segments, from 2D grids.
  pub segments: Vec<[u32; 2]>,

  /// Triangles, from 3D grids.
  pub triangles: Vec<[u32; 3]>,

  /// Ascending global indices of the leaves whose dual cells emitted
  /// geometry.
  pub contributing_leaves: Vec<u64>,
}

impl ContourOutput {
  pub fn number_of_cells(&self) -> usize {
    self.vertices.len() + self.segments.len() + self.triangles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.number_of_cells() == 0
  }

  fn add_point(&mut self, point: DVec3, iso: f64) -> u32 {
    let index = self.points.len() as u32;
    self.points.push(point);
    self.scalars.push(iso);
    index
  }

  fn add_segment(&mut self, a: DVec3, b: DVec3, iso: f64) -> bool {
    if a == b {
      return false;
    }
    let segment = [self.add_point(a, iso), self.add_point(b, iso)];
    self.segments.push(segment);
    true
  }

  fn add_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3, iso: f64) -> bool {
    if (b - a).cross(c - a).length_squared() == 0.0 {
      return false;
    }
    let triangle = [self.add_point(a, iso), self.add_point(b, iso), self.add_point(c, iso)];
    self.triangles.push(triangle);
    true
  }
}

/// One node of a dual cell: leaf center and field value.
#[derive(Clone, Copy, Debug)]
struct DualNode {
  point: DVec3,
  value: f64,
}

#[inline]
fn crossing(a: DualNode, b: DualNode, iso: f64) -> DVec3 {
  let t = (iso - a.value) / (b.value - a.value);
  a.point + (b.point - a.point) * t
}

/// Extract iso-contours of `field` at every configured iso value.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "filters::contour"))]
pub fn contour(grid: &HyperTreeGrid, field: &[f64], config: &ContourConfig) -> Result<ContourOutput, FilterError> {
  check_field(grid, field)?;
  if config.iso_values.is_empty() {
    return Ok(ContourOutput::default());
  }

  let mut cursor = MooreSuperCursor::moore(grid)?;
  let mut pass = ContourPass {
    dimension: grid.dimension(),
    field,
    iso_values: &config.iso_values,
    leaves: CornerLeaves::new(),
    contributing: vec![false; field.len()],
    output: ContourOutput::default(),
  };

  for tree_index in grid.tree_indices() {
    check_abort(config.abort.as_ref())?;
    if cursor.initialize(tree_index).is_none() {
      continue;
    }
    pass.recurse(&mut cursor)?;
  }

  let ContourPass {
    contributing,
    mut output,
    ..
  } = pass;
  output.contributing_leaves = contributing
    .iter()
    .enumerate()
    .filter(|&(_, &flag)| flag)
    .map(|(global, _)| global as u64)
    .collect();

  #[cfg(feature = "tracing")]
  tracing::debug!(
    points = output.points.len(),
    cells = output.number_of_cells(),
    "contour extracted"
  );
  Ok(output)
}

struct ContourPass<'a> {
  dimension: usize,
  field: &'a [f64],
  iso_values: &'a [f64],
  leaves: CornerLeaves,
  contributing: Vec<bool>,
  output: ContourOutput,
}

impl ContourPass<'_> {
  fn recurse(&mut self, cursor: &mut MooreSuperCursor<'_>) -> Result<(), FilterError> {
    let central = cursor.central_index();
    if cursor.is_masked(central) {
      return Ok(());
    }
    if cursor.is_leaf(central) {
      return self.process_leaf(cursor);
    }
    for ichild in 0..cursor.number_of_children() {
      cursor.to_child(ichild)?;
      self.recurse(cursor)?;
      cursor.to_parent()?;
    }
    Ok(())
  }

  fn process_leaf(&mut self, cursor: &MooreSuperCursor<'_>) -> Result<(), FilterError> {
    for corner in 0..(1usize << self.dimension) {
      if !cursor.corner_cursors(corner, &mut self.leaves)? {
        continue;
      }

      let mut nodes: SmallVec<[DualNode; 8]> = SmallVec::new();
      let mut globals: SmallVec<[u64; 8]> = SmallVec::new();
      for &i in &self.leaves {
        let Some(global) = cursor.global_node_index(i) else {
          break;
        };
        nodes.push(DualNode {
          point: cursor.point(i),
          value: self.field[global as usize],
        });
        globals.push(global);
      }
      if nodes.len() != self.leaves.len() {
        continue;
      }

      let mut emitted = false;
      for &iso in self.iso_values {
        emitted |= match self.dimension {
          1 => self.emit_point(&nodes, iso),
          2 => self.emit_square(&nodes, iso),
          _ => self.emit_hexahedron(&nodes, iso),
        };
      }
      if emitted {
        for global in globals {
          self.contributing[global as usize] = true;
        }
      }
    }
    Ok(())
  }

  fn emit_point(&mut self, nodes: &[DualNode], iso: f64) -> bool {
    let (a, b) = (nodes[0], nodes[1]);
    if (a.value >= iso) == (b.value >= iso) {
      return false;
    }
    let index = self.output.add_point(crossing(a, b, iso), iso);
    self.output.vertices.push(index);
    true
  }

  fn emit_square(&mut self, nodes: &[DualNode], iso: f64) -> bool {
    let above = |k: usize| nodes[k].value >= iso;
    let crossings: SmallVec<[DVec3; 4]> = SQUARE_EDGES
      .iter()
      .filter(|&&(a, b)| above(a) != above(b))
      .map(|&(a, b)| crossing(nodes[a], nodes[b], iso))
      .collect();

    match crossings.len() {
      2 => self.output.add_segment(crossings[0], crossings[1], iso),
      4 => {
        // Saddle: the dual cell center decides which diagonal connects.
        let center = nodes.iter().map(|node| node.value).sum::<f64>() / 4.0;
        if (center >= iso) == above(1) {
          let first = self.output.add_segment(crossings[3], crossings[0], iso);
          self.output.add_segment(crossings[1], crossings[2], iso) | first
        } else {
          let first = self.output.add_segment(crossings[0], crossings[1], iso);
          self.output.add_segment(crossings[2], crossings[3], iso) | first
        }
      }
      _ => false,
    }
  }

  fn emit_hexahedron(&mut self, nodes: &[DualNode], iso: f64) -> bool {
    let mut emitted = false;
    for tetrahedron in HEX_TETRAHEDRA {
      let corners = tetrahedron.map(|k| nodes[k]);
      emitted |= self.emit_tetrahedron(corners, iso);
    }
    emitted
  }

  fn emit_tetrahedron(&mut self, nodes: [DualNode; 4], iso: f64) -> bool {
    let above = nodes.map(|node| node.value >= iso);
    let count = above.iter().filter(|&&flag| flag).count();
    match count {
      1 | 3 => {
        let lone_side = count == 1;
        let Some(lone) = above.iter().position(|&flag| flag == lone_side) else {
          return false;
        };
        let mut points: SmallVec<[DVec3; 3]> = SmallVec::new();
        for (k, &node) in nodes.iter().enumerate() {
          if k != lone {
            points.push(crossing(nodes[lone], node, iso));
          }
        }
        self.output.add_triangle(points[0], points[1], points[2], iso)
      }
      2 => {
        let mut up: SmallVec<[DualNode; 2]> = SmallVec::new();
        let mut down: SmallVec<[DualNode; 2]> = SmallVec::new();
        for (node, flag) in nodes.into_iter().zip(above) {
          if flag {
            up.push(node);
          } else {
            down.push(node);
          }
        }
        let quad = [
          crossing(up[0], down[0], iso),
          crossing(up[0], down[1], iso),
          crossing(up[1], down[1], iso),
          crossing(up[1], down[0], iso),
        ];
        let first = self.output.add_triangle(quad[0], quad[1], quad[2], iso);
        self.output.add_triangle(quad[0], quad[2], quad[3], iso) | first
      }
      _ => false,
    }
  }
}

#[cfg(test)]
#[path = "contour_test.rs"]
mod contour_test;
