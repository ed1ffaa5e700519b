//! Neighborhood shapes of super cursors.

use crate::tables::{
  moore_tables, von_neumann_tables, TraversalTables, VON_NEUMANN_TO_MOORE_1D, VON_NEUMANN_TO_MOORE_2D,
  VON_NEUMANN_TO_MOORE_3D,
};

/// Which neighbors a super cursor tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborhoodKind {
  /// Every cell sharing a face, edge or corner: `3^d` cursors.
  Moore,
  /// Face neighbors only: `2d + 1` cursors.
  VonNeumann,
}

/// Cursor layout and traversal tables for one (kind, dimension, branch
/// factor) combination.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood {
  kind: NeighborhoodKind,
  dimension: usize,
  number_of_cursors: usize,
  tables: TraversalTables,
}

impl Neighborhood {
  pub fn new(kind: NeighborhoodKind, dimension: usize, branch_factor: u32) -> Option<Self> {
    let (tables, number_of_cursors) = match kind {
      NeighborhoodKind::Moore => (moore_tables(dimension, branch_factor)?, 3usize.pow(dimension as u32)),
      NeighborhoodKind::VonNeumann => (von_neumann_tables(dimension, branch_factor)?, 2 * dimension + 1),
    };
    Some(Self {
      kind,
      dimension,
      number_of_cursors,
      tables,
    })
  }

  #[inline]
  pub fn kind(&self) -> NeighborhoodKind {
    self.kind
  }

  #[inline]
  pub fn number_of_cursors(&self) -> usize {
    self.number_of_cursors
  }

  #[inline]
  pub fn central_index(&self) -> usize {
    (self.number_of_cursors - 1) / 2
  }

  /// `(parent cursor, child)` the child-relative cursor `i` of child
  /// `ichild` descends from.
  #[inline]
  pub fn descent(&self, ichild: usize, i: usize) -> (usize, usize) {
    let slot = ichild * self.number_of_cursors + i;
    (
      self.tables.child_cursor_to_parent_cursor[slot] as usize,
      self.tables.child_cursor_to_child[slot] as usize,
    )
  }

  /// Moore index of cursor `i`.
  #[inline]
  pub fn moore_index(&self, i: usize) -> usize {
    match self.kind {
      NeighborhoodKind::Moore => i,
      NeighborhoodKind::VonNeumann => {
        let layout: &[u8] = match self.dimension {
          1 => &VON_NEUMANN_TO_MOORE_1D,
          2 => &VON_NEUMANN_TO_MOORE_2D,
          _ => &VON_NEUMANN_TO_MOORE_3D,
        };
        layout[i] as usize
      }
    }
  }

  /// Offset of cursor `i` from the central cell, one component per
  /// spanned axis, each in `-1..=1`.
  pub fn offset(&self, i: usize) -> [i32; 3] {
    let mut rest = self.moore_index(i);
    let mut offset = [0; 3];
    for component in offset.iter_mut().take(self.dimension) {
      *component = (rest % 3) as i32 - 1;
      rest /= 3;
    }
    offset
  }

  /// Cursor with the given offset, if the neighborhood tracks it.
  pub fn index_of_offset(&self, offset: [i32; 3]) -> Option<usize> {
    (0..self.number_of_cursors).find(|&i| self.offset(i) == offset)
  }

  /// Slot of neighbor `i` within one depth's block of reference entries.
  #[inline]
  pub(crate) fn reference_slot(&self, i: usize) -> usize {
    debug_assert_ne!(i, self.central_index());
    if i < self.central_index() {
      i
    } else {
      i - 1
    }
  }
}
