use super::*;

fn digits(mut value: usize, radix: usize, dimension: usize) -> [usize; 3] {
  let mut out = [0; 3];
  for digit in out.iter_mut().take(dimension) {
    *digit = value % radix;
    value /= radix;
  }
  out
}

fn from_digits(digits: [usize; 3], radix: usize, dimension: usize) -> usize {
  (0..dimension).rev().fold(0, |acc, axis| acc * radix + digits[axis])
}

fn von_neumann_to_moore(dimension: usize) -> &'static [u8] {
  match dimension {
    1 => &VON_NEUMANN_TO_MOORE_1D,
    2 => &VON_NEUMANN_TO_MOORE_2D,
    _ => &VON_NEUMANN_TO_MOORE_3D,
  }
}

/// Rebuild the expected (parent cursor, child) pair for a child-relative
/// Moore offset by working at child resolution.
fn expected_moore(ichild: usize, moore_index: usize, dimension: usize, f: usize) -> (usize, usize) {
  let child = digits(ichild, f, dimension);
  let offset = digits(moore_index, 3, dimension);
  let mut parent = [0; 3];
  let mut sub = [0; 3];
  for axis in 0..dimension {
    // Shift by one cell so the value stays non-negative.
    let q = child[axis] + f + offset[axis] - 1;
    parent[axis] = q / f;
    sub[axis] = q % f;
  }
  (from_digits(parent, 3, dimension), from_digits(sub, f, dimension))
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn test_table_lengths() {
  for dimension in 1..=3 {
    for f in [2u32, 3] {
      let children = (f as usize).pow(dimension as u32);

      let moore = moore_tables(dimension, f).unwrap();
      let n = 3usize.pow(dimension as u32);
      assert_eq!(moore.child_cursor_to_parent_cursor.len(), children * n);
      assert_eq!(moore.child_cursor_to_child.len(), children * n);

      let von_neumann = von_neumann_tables(dimension, f).unwrap();
      let n = 2 * dimension + 1;
      assert_eq!(von_neumann.child_cursor_to_parent_cursor.len(), children * n);
      assert_eq!(von_neumann.child_cursor_to_child.len(), children * n);
    }
  }
}

#[test]
fn test_unsupported_combinations() {
  assert!(moore_tables(0, 2).is_none());
  assert!(moore_tables(4, 2).is_none());
  assert!(moore_tables(2, 4).is_none());
  assert!(von_neumann_tables(3, 1).is_none());
}

#[test]
fn test_central_cursor_maps_to_itself() {
  for dimension in 1..=3 {
    for f in [2u32, 3] {
      let children = (f as usize).pow(dimension as u32);
      for (tables, n) in [
        (moore_tables(dimension, f).unwrap(), 3usize.pow(dimension as u32)),
        (von_neumann_tables(dimension, f).unwrap(), 2 * dimension + 1),
      ] {
        let central = (n - 1) / 2;
        for ichild in 0..children {
          assert_eq!(tables.child_cursor_to_parent_cursor[ichild * n + central] as usize, central);
          assert_eq!(tables.child_cursor_to_child[ichild * n + central] as usize, ichild);
        }
      }
    }
  }
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_moore_tables_match_geometry() {
  for dimension in 1..=3 {
    for f in [2usize, 3] {
      let tables = moore_tables(dimension, f as u32).unwrap();
      let n = 3usize.pow(dimension as u32);
      for ichild in 0..f.pow(dimension as u32) {
        for i in 0..n {
          let (parent, child) = expected_moore(ichild, i, dimension, f);
          assert_eq!(
            tables.child_cursor_to_parent_cursor[ichild * n + i] as usize,
            parent,
            "parent mismatch d={} f={} ichild={} i={}",
            dimension,
            f,
            ichild,
            i
          );
          assert_eq!(
            tables.child_cursor_to_child[ichild * n + i] as usize,
            child,
            "child mismatch d={} f={} ichild={} i={}",
            dimension,
            f,
            ichild,
            i
          );
        }
      }
    }
  }
}

#[test]
fn test_von_neumann_tables_match_geometry() {
  for dimension in 1..=3 {
    let layout = von_neumann_to_moore(dimension);
    for f in [2usize, 3] {
      let tables = von_neumann_tables(dimension, f as u32).unwrap();
      let n = layout.len();
      for ichild in 0..f.pow(dimension as u32) {
        for (i, &moore_index) in layout.iter().enumerate() {
          let (parent, child) = expected_moore(ichild, moore_index as usize, dimension, f);
          let parent_vn = tables.child_cursor_to_parent_cursor[ichild * n + i] as usize;
          assert_eq!(
            layout[parent_vn] as usize, parent,
            "parent mismatch d={} f={} ichild={} i={}",
            dimension, f, ichild, i
          );
          assert_eq!(tables.child_cursor_to_child[ichild * n + i] as usize, child);
        }
      }
    }
  }
}

#[test]
fn test_von_neumann_layout_is_face_neighbors() {
  for dimension in 1..=3 {
    for &moore_index in von_neumann_to_moore(dimension) {
      let offset = digits(moore_index as usize, 3, dimension);
      let off_center = (0..dimension).filter(|&axis| offset[axis] != 1).count();
      assert!(off_center <= 1, "{} is not a face neighbor", moore_index);
    }
  }
}

// =============================================================================
// Corners
// =============================================================================

#[test]
fn test_corner_tables_contain_central() {
  for dimension in 1..=3 {
    let central = (3usize.pow(dimension as u32) - 1) / 2;
    let corners = 1 << dimension;
    for corner in 0..corners {
      let leaves: Vec<usize> = (0..corners)
        .map(|leaf| corner_neighbor_cursor(dimension, corner, leaf).unwrap())
        .collect();
      assert!(leaves.contains(&central));
      // The central cell sits at the mirror position of the corner.
      assert_eq!(leaves[corners - 1 - corner], central);
    }
  }
}

#[test]
fn test_corner_out_of_range() {
  assert_eq!(corner_neighbor_cursor(2, 4, 0), None);
  assert_eq!(corner_neighbor_cursor(2, 0, 4), None);
  assert_eq!(corner_neighbor_cursor(0, 0, 0), None);
  assert_eq!(corner_neighbor_cursor(3, 7, 7), Some(26));
}
