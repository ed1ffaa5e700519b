//! Precomputed super cursor traversal tables.
//!
//! A super cursor tracks the central cursor plus its neighborhood. When the
//! central cursor descends into child `ichild`, every neighbor cursor `i` of
//! the child is derived from one cursor `j` of the parent neighborhood, moved
//! into one of its children `c`:
//!
//! ```text
//! j = CHILD_CURSOR_TO_PARENT_CURSOR[ichild * number_of_cursors + i]
//! c = CHILD_CURSOR_TO_CHILD[ichild * number_of_cursors + i]
//! ```
//!
//! # Neighbor numbering
//!
//! Moore neighborhoods number the `3^d` cells around (and including) the
//! central cell in mixed radix, axis 0 least significant, offsets `-1, 0, +1`
//! mapped to digits `0, 1, 2`. The central cell is `(3^d - 1) / 2`.
//!
//! ```text
//! 2D Moore:        2D Von Neumann:
//!   6 7 8              4
//!   3 4 5            1 2 3
//!   0 1 2              0
//! ```
//!
//! Von Neumann neighborhoods keep the face neighbors only, in the same
//! relative order, so the central cell is `d` and there are `2d + 1` cursors.
//!
//! Children are numbered the same way with radix `branch_factor`.
//!
//! The values are the ones every hyper tree grid consumer expects. Changing
//! their order changes which physical neighbor a cursor index designates.

/// Borrowed pair of traversal tables for one (neighborhood, dimension,
/// branch factor) combination.
#[derive(Clone, Copy, Debug)]
pub struct TraversalTables {
  /// Parent-relative cursor each child-relative cursor descends from.
  pub child_cursor_to_parent_cursor: &'static [u8],
  /// Child of that parent cursor to descend into.
  pub child_cursor_to_child: &'static [u8],
}

/// Moore traversal tables for a (dimension, branch factor) pair.
///
/// Returns `None` for unsupported combinations.
pub fn moore_tables(dimension: usize, branch_factor: u32) -> Option<TraversalTables> {
  let (parent, child): (&'static [u8], &'static [u8]) = match (dimension, branch_factor) {
    (1, 2) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_12, &MOORE_CHILD_CURSOR_TO_CHILD_12),
    (1, 3) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_13, &MOORE_CHILD_CURSOR_TO_CHILD_13),
    (2, 2) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_22, &MOORE_CHILD_CURSOR_TO_CHILD_22),
    (2, 3) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_23, &MOORE_CHILD_CURSOR_TO_CHILD_23),
    (3, 2) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_32, &MOORE_CHILD_CURSOR_TO_CHILD_32),
    (3, 3) => (&MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_33, &MOORE_CHILD_CURSOR_TO_CHILD_33),
    _ => return None,
  };
  Some(TraversalTables {
    child_cursor_to_parent_cursor: parent,
    child_cursor_to_child: child,
  })
}

/// Von Neumann traversal tables for a (dimension, branch factor) pair.
///
/// Returns `None` for unsupported combinations.
pub fn von_neumann_tables(dimension: usize, branch_factor: u32) -> Option<TraversalTables> {
  let (parent, child): (&'static [u8], &'static [u8]) = match (dimension, branch_factor) {
    (1, 2) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_12,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_12,
    ),
    (1, 3) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_13,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_13,
    ),
    (2, 2) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_22,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_22,
    ),
    (2, 3) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_23,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_23,
    ),
    (3, 2) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_32,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_32,
    ),
    (3, 3) => (
      &VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_33,
      &VON_NEUMANN_CHILD_CURSOR_TO_CHILD_33,
    ),
    _ => return None,
  };
  Some(TraversalTables {
    child_cursor_to_parent_cursor: parent,
    child_cursor_to_child: child,
  })
}

// =============================================================================
// Neighborhood layouts
// =============================================================================

/// Moore index of each Von Neumann cursor, d = 1.
pub const VON_NEUMANN_TO_MOORE_1D: [u8; 3] = [0, 1, 2];

/// Moore index of each Von Neumann cursor, d = 2.
pub const VON_NEUMANN_TO_MOORE_2D: [u8; 5] = [1, 3, 4, 5, 7];

/// Moore index of each Von Neumann cursor, d = 3.
pub const VON_NEUMANN_TO_MOORE_3D: [u8; 7] = [4, 10, 12, 13, 14, 16, 22];

// =============================================================================
// Corner tables
// =============================================================================

/// Moore cursors touching each corner of the central cell, d = 1.
///
/// `CORNER_NEIGHBOR_CURSORS_1D[corner][leaf]`: corner 0 is the low end of the
/// cell, corner 1 the high end.
pub const CORNER_NEIGHBOR_CURSORS_1D: [[u8; 2]; 2] = [[0, 1], [1, 2]];

/// Moore cursors touching each corner of the central cell, d = 2.
pub const CORNER_NEIGHBOR_CURSORS_2D: [[u8; 4]; 4] = [
  [0, 1, 3, 4],
  [1, 2, 4, 5],
  [3, 4, 6, 7],
  [4, 5, 7, 8],
];

/// Moore cursors touching each corner of the central cell, d = 3.
pub const CORNER_NEIGHBOR_CURSORS_3D: [[u8; 8]; 8] = [
  [0, 1, 3, 4, 9, 10, 12, 13],
  [1, 2, 4, 5, 10, 11, 13, 14],
  [3, 4, 6, 7, 12, 13, 15, 16],
  [4, 5, 7, 8, 13, 14, 16, 17],
  [9, 10, 12, 13, 18, 19, 21, 22],
  [10, 11, 13, 14, 19, 20, 22, 23],
  [12, 13, 15, 16, 21, 22, 24, 25],
  [13, 14, 16, 17, 22, 23, 25, 26],
];

/// Moore cursor index of leaf `leaf` around corner `corner`.
///
/// Corners and leaves are both numbered in binary, axis 0 least significant.
#[inline]
pub fn corner_neighbor_cursor(dimension: usize, corner: usize, leaf: usize) -> Option<usize> {
  let index = match dimension {
    1 => CORNER_NEIGHBOR_CURSORS_1D.get(corner)?.get(leaf)?,
    2 => CORNER_NEIGHBOR_CURSORS_2D.get(corner)?.get(leaf)?,
    3 => CORNER_NEIGHBOR_CURSORS_3D.get(corner)?.get(leaf)?,
    _ => return None,
  };
  Some(*index as usize)
}

// =============================================================================
// Traversal tables
// =============================================================================

/// d = 1, f = 2.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_12: [u8; 6] = [
  0, 1, 1,
  1, 1, 2,
];

/// d = 1, f = 2.
pub const MOORE_CHILD_CURSOR_TO_CHILD_12: [u8; 6] = [
  1, 0, 1,
  0, 1, 0,
];

/// d = 1, f = 3.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_13: [u8; 9] = [
  0, 1, 1,
  1, 1, 1,
  1, 1, 2,
];

/// d = 1, f = 3.
pub const MOORE_CHILD_CURSOR_TO_CHILD_13: [u8; 9] = [
  2, 0, 1,
  0, 1, 2,
  1, 2, 0,
];

/// d = 2, f = 2.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_22: [u8; 36] = [
  0, 1, 1, 3, 4, 4, 3, 4, 4,
  1, 1, 2, 4, 4, 5, 4, 4, 5,
  3, 4, 4, 3, 4, 4, 6, 7, 7,
  4, 4, 5, 4, 4, 5, 7, 7, 8,
];

/// d = 2, f = 2.
pub const MOORE_CHILD_CURSOR_TO_CHILD_22: [u8; 36] = [
  3, 2, 3, 1, 0, 1, 3, 2, 3,
  2, 3, 2, 0, 1, 0, 2, 3, 2,
  1, 0, 1, 3, 2, 3, 1, 0, 1,
  0, 1, 0, 2, 3, 2, 0, 1, 0,
];

/// d = 2, f = 3.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_23: [u8; 81] = [
  0, 1, 1, 3, 4, 4, 3, 4, 4,
  1, 1, 1, 4, 4, 4, 4, 4, 4,
  1, 1, 2, 4, 4, 5, 4, 4, 5,
  3, 4, 4, 3, 4, 4, 3, 4, 4,
  4, 4, 4, 4, 4, 4, 4, 4, 4,
  4, 4, 5, 4, 4, 5, 4, 4, 5,
  3, 4, 4, 3, 4, 4, 6, 7, 7,
  4, 4, 4, 4, 4, 4, 7, 7, 7,
  4, 4, 5, 4, 4, 5, 7, 7, 8,
];

/// d = 2, f = 3.
pub const MOORE_CHILD_CURSOR_TO_CHILD_23: [u8; 81] = [
  8, 6, 7, 2, 0, 1, 5, 3, 4,
  6, 7, 8, 0, 1, 2, 3, 4, 5,
  7, 8, 6, 1, 2, 0, 4, 5, 3,
  2, 0, 1, 5, 3, 4, 8, 6, 7,
  0, 1, 2, 3, 4, 5, 6, 7, 8,
  1, 2, 0, 4, 5, 3, 7, 8, 6,
  5, 3, 4, 8, 6, 7, 2, 0, 1,
  3, 4, 5, 6, 7, 8, 0, 1, 2,
  4, 5, 3, 7, 8, 6, 1, 2, 0,
];

/// d = 3, f = 2.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_32: [u8; 216] = [
  0, 1, 1, 3, 4, 4, 3, 4, 4, 9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13,
  1, 1, 2, 4, 4, 5, 4, 4, 5, 10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14,
  3, 4, 4, 3, 4, 4, 6, 7, 7, 12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16,
  4, 4, 5, 4, 4, 5, 7, 7, 8, 13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17,
  9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13, 18, 19, 19, 21, 22, 22, 21, 22, 22,
  10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14, 19, 19, 20, 22, 22, 23, 22, 22, 23,
  12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16, 21, 22, 22, 21, 22, 22, 24, 25, 25,
  13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17, 22, 22, 23, 22, 22, 23, 25, 25, 26,
];

/// d = 3, f = 2.
pub const MOORE_CHILD_CURSOR_TO_CHILD_32: [u8; 216] = [
  7, 6, 7, 5, 4, 5, 7, 6, 7, 3, 2, 3, 1, 0, 1, 3, 2, 3, 7, 6, 7, 5, 4, 5, 7, 6, 7,
  6, 7, 6, 4, 5, 4, 6, 7, 6, 2, 3, 2, 0, 1, 0, 2, 3, 2, 6, 7, 6, 4, 5, 4, 6, 7, 6,
  5, 4, 5, 7, 6, 7, 5, 4, 5, 1, 0, 1, 3, 2, 3, 1, 0, 1, 5, 4, 5, 7, 6, 7, 5, 4, 5,
  4, 5, 4, 6, 7, 6, 4, 5, 4, 0, 1, 0, 2, 3, 2, 0, 1, 0, 4, 5, 4, 6, 7, 6, 4, 5, 4,
  3, 2, 3, 1, 0, 1, 3, 2, 3, 7, 6, 7, 5, 4, 5, 7, 6, 7, 3, 2, 3, 1, 0, 1, 3, 2, 3,
  2, 3, 2, 0, 1, 0, 2, 3, 2, 6, 7, 6, 4, 5, 4, 6, 7, 6, 2, 3, 2, 0, 1, 0, 2, 3, 2,
  1, 0, 1, 3, 2, 3, 1, 0, 1, 5, 4, 5, 7, 6, 7, 5, 4, 5, 1, 0, 1, 3, 2, 3, 1, 0, 1,
  0, 1, 0, 2, 3, 2, 0, 1, 0, 4, 5, 4, 6, 7, 6, 4, 5, 4, 0, 1, 0, 2, 3, 2, 0, 1, 0,
];

/// d = 3, f = 3.
pub const MOORE_CHILD_CURSOR_TO_PARENT_CURSOR_33: [u8; 729] = [
  0, 1, 1, 3, 4, 4, 3, 4, 4, 9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13,
  1, 1, 1, 4, 4, 4, 4, 4, 4, 10, 10, 10, 13, 13, 13, 13, 13, 13, 10, 10, 10, 13, 13, 13, 13, 13, 13,
  1, 1, 2, 4, 4, 5, 4, 4, 5, 10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14,
  3, 4, 4, 3, 4, 4, 3, 4, 4, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13,
  4, 4, 4, 4, 4, 4, 4, 4, 4, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  4, 4, 5, 4, 4, 5, 4, 4, 5, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14,
  3, 4, 4, 3, 4, 4, 6, 7, 7, 12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16,
  4, 4, 4, 4, 4, 4, 7, 7, 7, 13, 13, 13, 13, 13, 13, 16, 16, 16, 13, 13, 13, 13, 13, 13, 16, 16, 16,
  4, 4, 5, 4, 4, 5, 7, 7, 8, 13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17,
  9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13,
  10, 10, 10, 13, 13, 13, 13, 13, 13, 10, 10, 10, 13, 13, 13, 13, 13, 13, 10, 10, 10, 13, 13, 13, 13, 13, 13,
  10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14,
  12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13,
  13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14,
  12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16,
  13, 13, 13, 13, 13, 13, 16, 16, 16, 13, 13, 13, 13, 13, 13, 16, 16, 16, 13, 13, 13, 13, 13, 13, 16, 16, 16,
  13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17,
  9, 10, 10, 12, 13, 13, 12, 13, 13, 9, 10, 10, 12, 13, 13, 12, 13, 13, 18, 19, 19, 21, 22, 22, 21, 22, 22,
  10, 10, 10, 13, 13, 13, 13, 13, 13, 10, 10, 10, 13, 13, 13, 13, 13, 13, 19, 19, 19, 22, 22, 22, 22, 22, 22,
  10, 10, 11, 13, 13, 14, 13, 13, 14, 10, 10, 11, 13, 13, 14, 13, 13, 14, 19, 19, 20, 22, 22, 23, 22, 22, 23,
  12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 12, 13, 13, 21, 22, 22, 21, 22, 22, 21, 22, 22,
  13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 22, 22, 22, 22, 22, 22, 22, 22, 22,
  13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 13, 13, 14, 22, 22, 23, 22, 22, 23, 22, 22, 23,
  12, 13, 13, 12, 13, 13, 15, 16, 16, 12, 13, 13, 12, 13, 13, 15, 16, 16, 21, 22, 22, 21, 22, 22, 24, 25, 25,
  13, 13, 13, 13, 13, 13, 16, 16, 16, 13, 13, 13, 13, 13, 13, 16, 16, 16, 22, 22, 22, 22, 22, 22, 25, 25, 25,
  13, 13, 14, 13, 13, 14, 16, 16, 17, 13, 13, 14, 13, 13, 14, 16, 16, 17, 22, 22, 23, 22, 22, 23, 25, 25, 26,
];

/// d = 3, f = 3.
pub const MOORE_CHILD_CURSOR_TO_CHILD_33: [u8; 729] = [
  26, 24, 25, 20, 18, 19, 23, 21, 22, 8, 6, 7, 2, 0, 1, 5, 3, 4, 17, 15, 16, 11, 9, 10, 14, 12, 13,
  24, 25, 26, 18, 19, 20, 21, 22, 23, 6, 7, 8, 0, 1, 2, 3, 4, 5, 15, 16, 17, 9, 10, 11, 12, 13, 14,
  25, 26, 24, 19, 20, 18, 22, 23, 21, 7, 8, 6, 1, 2, 0, 4, 5, 3, 16, 17, 15, 10, 11, 9, 13, 14, 12,
  20, 18, 19, 23, 21, 22, 26, 24, 25, 2, 0, 1, 5, 3, 4, 8, 6, 7, 11, 9, 10, 14, 12, 13, 17, 15, 16,
  18, 19, 20, 21, 22, 23, 24, 25, 26, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17,
  19, 20, 18, 22, 23, 21, 25, 26, 24, 1, 2, 0, 4, 5, 3, 7, 8, 6, 10, 11, 9, 13, 14, 12, 16, 17, 15,
  23, 21, 22, 26, 24, 25, 20, 18, 19, 5, 3, 4, 8, 6, 7, 2, 0, 1, 14, 12, 13, 17, 15, 16, 11, 9, 10,
  21, 22, 23, 24, 25, 26, 18, 19, 20, 3, 4, 5, 6, 7, 8, 0, 1, 2, 12, 13, 14, 15, 16, 17, 9, 10, 11,
  22, 23, 21, 25, 26, 24, 19, 20, 18, 4, 5, 3, 7, 8, 6, 1, 2, 0, 13, 14, 12, 16, 17, 15, 10, 11, 9,
  8, 6, 7, 2, 0, 1, 5, 3, 4, 17, 15, 16, 11, 9, 10, 14, 12, 13, 26, 24, 25, 20, 18, 19, 23, 21, 22,
  6, 7, 8, 0, 1, 2, 3, 4, 5, 15, 16, 17, 9, 10, 11, 12, 13, 14, 24, 25, 26, 18, 19, 20, 21, 22, 23,
  7, 8, 6, 1, 2, 0, 4, 5, 3, 16, 17, 15, 10, 11, 9, 13, 14, 12, 25, 26, 24, 19, 20, 18, 22, 23, 21,
  2, 0, 1, 5, 3, 4, 8, 6, 7, 11, 9, 10, 14, 12, 13, 17, 15, 16, 20, 18, 19, 23, 21, 22, 26, 24, 25,
  0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
  1, 2, 0, 4, 5, 3, 7, 8, 6, 10, 11, 9, 13, 14, 12, 16, 17, 15, 19, 20, 18, 22, 23, 21, 25, 26, 24,
  5, 3, 4, 8, 6, 7, 2, 0, 1, 14, 12, 13, 17, 15, 16, 11, 9, 10, 23, 21, 22, 26, 24, 25, 20, 18, 19,
  3, 4, 5, 6, 7, 8, 0, 1, 2, 12, 13, 14, 15, 16, 17, 9, 10, 11, 21, 22, 23, 24, 25, 26, 18, 19, 20,
  4, 5, 3, 7, 8, 6, 1, 2, 0, 13, 14, 12, 16, 17, 15, 10, 11, 9, 22, 23, 21, 25, 26, 24, 19, 20, 18,
  17, 15, 16, 11, 9, 10, 14, 12, 13, 26, 24, 25, 20, 18, 19, 23, 21, 22, 8, 6, 7, 2, 0, 1, 5, 3, 4,
  15, 16, 17, 9, 10, 11, 12, 13, 14, 24, 25, 26, 18, 19, 20, 21, 22, 23, 6, 7, 8, 0, 1, 2, 3, 4, 5,
  16, 17, 15, 10, 11, 9, 13, 14, 12, 25, 26, 24, 19, 20, 18, 22, 23, 21, 7, 8, 6, 1, 2, 0, 4, 5, 3,
  11, 9, 10, 14, 12, 13, 17, 15, 16, 20, 18, 19, 23, 21, 22, 26, 24, 25, 2, 0, 1, 5, 3, 4, 8, 6, 7,
  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 0, 1, 2, 3, 4, 5, 6, 7, 8,
  10, 11, 9, 13, 14, 12, 16, 17, 15, 19, 20, 18, 22, 23, 21, 25, 26, 24, 1, 2, 0, 4, 5, 3, 7, 8, 6,
  14, 12, 13, 17, 15, 16, 11, 9, 10, 23, 21, 22, 26, 24, 25, 20, 18, 19, 5, 3, 4, 8, 6, 7, 2, 0, 1,
  12, 13, 14, 15, 16, 17, 9, 10, 11, 21, 22, 23, 24, 25, 26, 18, 19, 20, 3, 4, 5, 6, 7, 8, 0, 1, 2,
  13, 14, 12, 16, 17, 15, 10, 11, 9, 22, 23, 21, 25, 26, 24, 19, 20, 18, 4, 5, 3, 7, 8, 6, 1, 2, 0,
];

/// d = 1, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_12: [u8; 6] = [
  0, 1, 1,
  1, 1, 2,
];

/// d = 1, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_12: [u8; 6] = [
  1, 0, 1,
  0, 1, 0,
];

/// d = 1, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_13: [u8; 9] = [
  0, 1, 1,
  1, 1, 1,
  1, 1, 2,
];

/// d = 1, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_13: [u8; 9] = [
  2, 0, 1,
  0, 1, 2,
  1, 2, 0,
];

/// d = 2, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_22: [u8; 20] = [
  0, 1, 2, 2, 2,
  0, 2, 2, 3, 2,
  2, 1, 2, 2, 4,
  2, 2, 2, 3, 4,
];

/// d = 2, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_22: [u8; 20] = [
  2, 1, 0, 1, 2,
  3, 0, 1, 0, 3,
  0, 3, 2, 3, 0,
  1, 2, 3, 2, 1,
];

/// d = 2, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_23: [u8; 45] = [
  0, 1, 2, 2, 2,
  0, 2, 2, 2, 2,
  0, 2, 2, 3, 2,
  2, 1, 2, 2, 2,
  2, 2, 2, 2, 2,
  2, 2, 2, 3, 2,
  2, 1, 2, 2, 4,
  2, 2, 2, 2, 4,
  2, 2, 2, 3, 4,
];

/// d = 2, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_23: [u8; 45] = [
  6, 2, 0, 1, 3,
  7, 0, 1, 2, 4,
  8, 1, 2, 0, 5,
  0, 5, 3, 4, 6,
  1, 3, 4, 5, 7,
  2, 4, 5, 3, 8,
  3, 8, 6, 7, 0,
  4, 6, 7, 8, 1,
  5, 7, 8, 6, 2,
];

/// d = 3, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_32: [u8; 56] = [
  0, 1, 2, 3, 3, 3, 3,
  0, 1, 3, 3, 4, 3, 3,
  0, 3, 2, 3, 3, 5, 3,
  0, 3, 3, 3, 4, 5, 3,
  3, 1, 2, 3, 3, 3, 6,
  3, 1, 3, 3, 4, 3, 6,
  3, 3, 2, 3, 3, 5, 6,
  3, 3, 3, 3, 4, 5, 6,
];

/// d = 3, f = 2.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_32: [u8; 56] = [
  4, 2, 1, 0, 1, 2, 4,
  5, 3, 0, 1, 0, 3, 5,
  6, 0, 3, 2, 3, 0, 6,
  7, 1, 2, 3, 2, 1, 7,
  0, 6, 5, 4, 5, 6, 0,
  1, 7, 4, 5, 4, 7, 1,
  2, 4, 7, 6, 7, 4, 2,
  3, 5, 6, 7, 6, 5, 3,
];

/// d = 3, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_PARENT_CURSOR_33: [u8; 189] = [
  0, 1, 2, 3, 3, 3, 3,
  0, 1, 3, 3, 3, 3, 3,
  0, 1, 3, 3, 4, 3, 3,
  0, 3, 2, 3, 3, 3, 3,
  0, 3, 3, 3, 3, 3, 3,
  0, 3, 3, 3, 4, 3, 3,
  0, 3, 2, 3, 3, 5, 3,
  0, 3, 3, 3, 3, 5, 3,
  0, 3, 3, 3, 4, 5, 3,
  3, 1, 2, 3, 3, 3, 3,
  3, 1, 3, 3, 3, 3, 3,
  3, 1, 3, 3, 4, 3, 3,
  3, 3, 2, 3, 3, 3, 3,
  3, 3, 3, 3, 3, 3, 3,
  3, 3, 3, 3, 4, 3, 3,
  3, 3, 2, 3, 3, 5, 3,
  3, 3, 3, 3, 3, 5, 3,
  3, 3, 3, 3, 4, 5, 3,
  3, 1, 2, 3, 3, 3, 6,
  3, 1, 3, 3, 3, 3, 6,
  3, 1, 3, 3, 4, 3, 6,
  3, 3, 2, 3, 3, 3, 6,
  3, 3, 3, 3, 3, 3, 6,
  3, 3, 3, 3, 4, 3, 6,
  3, 3, 2, 3, 3, 5, 6,
  3, 3, 3, 3, 3, 5, 6,
  3, 3, 3, 3, 4, 5, 6,
];

/// d = 3, f = 3.
pub const VON_NEUMANN_CHILD_CURSOR_TO_CHILD_33: [u8; 189] = [
  18, 6, 2, 0, 1, 3, 9,
  19, 7, 0, 1, 2, 4, 10,
  20, 8, 1, 2, 0, 5, 11,
  21, 0, 5, 3, 4, 6, 12,
  22, 1, 3, 4, 5, 7, 13,
  23, 2, 4, 5, 3, 8, 14,
  24, 3, 8, 6, 7, 0, 15,
  25, 4, 6, 7, 8, 1, 16,
  26, 5, 7, 8, 6, 2, 17,
  0, 15, 11, 9, 10, 12, 18,
  1, 16, 9, 10, 11, 13, 19,
  2, 17, 10, 11, 9, 14, 20,
  3, 9, 14, 12, 13, 15, 21,
  4, 10, 12, 13, 14, 16, 22,
  5, 11, 13, 14, 12, 17, 23,
  6, 12, 17, 15, 16, 9, 24,
  7, 13, 15, 16, 17, 10, 25,
  8, 14, 16, 17, 15, 11, 26,
  9, 24, 20, 18, 19, 21, 0,
  10, 25, 18, 19, 20, 22, 1,
  11, 26, 19, 20, 18, 23, 2,
  12, 18, 23, 21, 22, 24, 3,
  13, 19, 21, 22, 23, 25, 4,
  14, 20, 22, 23, 21, 26, 5,
  15, 21, 26, 24, 25, 18, 6,
  16, 22, 24, 25, 26, 19, 7,
  17, 23, 25, 26, 24, 20, 8,
];

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;
