use super::*;

fn grid_4x4() -> HyperTreeGrid {
  HyperTreeGrid::new(GridConfig::uniform([4, 4, 0], DVec3::ZERO, DVec3::new(4.0, 4.0, 0.0))).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_dimension_and_axes() {
  let grid = grid_4x4();
  assert_eq!(grid.dimension(), 2);
  assert_eq!(grid.axes(), &[0, 1]);
  assert_eq!(grid.orientation(), 2);
  assert_eq!(grid.cell_dims(), [4, 4, 1]);
  assert_eq!(grid.number_of_trees(), 16);
  assert_eq!(grid.number_of_children(), 4);

  let xz = HyperTreeGrid::new(
    GridConfig::default()
      .with_coordinates(1, vec![3.0])
      .with_coordinates(2, vec![0.0, 1.0, 2.0])
      .with_branch_factor(3),
  )
  .unwrap();
  assert_eq!(xz.axes(), &[0, 2]);
  assert_eq!(xz.orientation(), 1);
  assert_eq!(xz.number_of_children(), 9);

  let line = HyperTreeGrid::new(
    GridConfig::default()
      .with_coordinates(0, vec![0.0])
      .with_coordinates(1, vec![0.0, 1.0]),
  )
  .unwrap();
  assert_eq!(line.dimension(), 1);
  assert_eq!(line.axes(), &[1]);
  assert_eq!(line.orientation(), 1);
}

#[test]
fn test_invalid_configs() {
  assert_eq!(
    HyperTreeGrid::new(GridConfig::default().with_branch_factor(4)).unwrap_err(),
    GridError::InvalidBranchFactor(4)
  );
  assert_eq!(
    HyperTreeGrid::new(GridConfig::default().with_coordinates(1, vec![])).unwrap_err(),
    GridError::EmptyAxis { axis: 1 }
  );
  assert_eq!(
    HyperTreeGrid::new(GridConfig::default().with_coordinates(0, vec![0.0, 1.0, 1.0])).unwrap_err(),
    GridError::NonMonotonicCoordinates { axis: 0, position: 2 }
  );
  assert_eq!(
    HyperTreeGrid::new(
      GridConfig::default()
        .with_coordinates(0, vec![0.0])
        .with_coordinates(1, vec![0.0])
    )
    .unwrap_err(),
    GridError::InvalidDimension(0)
  );
}

// =============================================================================
// Level-zero indexing
// =============================================================================

#[test]
fn test_level_zero_index_round_trip() {
  for transposed in [false, true] {
    let grid = HyperTreeGrid::new(
      GridConfig::uniform([3, 4, 2], DVec3::ZERO, DVec3::new(3.0, 4.0, 2.0))
        .with_transposed_root_indexing(transposed),
    )
    .unwrap();
    for index in 0..grid.number_of_trees() {
      let ijk = grid.level_zero_coordinates_from_index(index);
      assert_eq!(grid.index_from_level_zero_coordinates(ijk), index, "transposed={}", transposed);
    }
  }
}

#[test]
fn test_transposed_indexing_order() {
  let grid = HyperTreeGrid::new(
    GridConfig::uniform([3, 4, 2], DVec3::ZERO, DVec3::new(3.0, 4.0, 2.0)).with_transposed_root_indexing(true),
  )
  .unwrap();
  // k + j * nz + i * nz * ny
  assert_eq!(grid.index_from_level_zero_coordinates([1, 2, 1]), 1 + 2 * 2 + 2 * 4);

  let grid = HyperTreeGrid::new(GridConfig::uniform([3, 4, 2], DVec3::ZERO, DVec3::new(3.0, 4.0, 2.0))).unwrap();
  assert_eq!(grid.index_from_level_zero_coordinates([1, 2, 1]), 1 + 2 * 3 + 3 * 4);
}

#[test]
fn test_shifted_level_zero_index() {
  let grid = grid_4x4();
  assert_eq!(grid.shifted_level_zero_index(5, [1, 0, 0]), Some(6));
  assert_eq!(grid.shifted_level_zero_index(5, [-1, -1, 0]), Some(0));
  assert_eq!(grid.shifted_level_zero_index(3, [1, 0, 0]), None, "no wrap around rows");
  assert_eq!(grid.shifted_level_zero_index(0, [0, -1, 0]), None);
  assert_eq!(grid.shifted_level_zero_index(0, [0, 0, 1]), None);
}

#[test]
fn test_level_zero_geometry() {
  let grid = HyperTreeGrid::new(
    GridConfig::default()
      .with_coordinates(0, vec![0.0, 1.0, 3.0])
      .with_coordinates(1, vec![-1.0, 1.0])
      .with_coordinates(2, vec![5.0]),
  )
  .unwrap();
  assert_eq!(grid.level_zero_origin(1), DVec3::new(1.0, -1.0, 5.0));
  assert_eq!(grid.level_zero_size(1), DVec3::new(2.0, 2.0, 0.0));
  assert_eq!(grid.bounds(), Bounds::new(DVec3::new(0.0, -1.0, 5.0), DVec3::new(3.0, 1.0, 5.0)));
}

#[test]
fn test_find_dichotomic() {
  let grid = HyperTreeGrid::new(GridConfig::default().with_coordinates(0, vec![0.0, 1.0, 3.0, 4.0])).unwrap();
  assert_eq!(grid.find_dichotomic(0, 0.0), Some(0));
  assert_eq!(grid.find_dichotomic(0, 0.99), Some(0));
  assert_eq!(grid.find_dichotomic(0, 1.0), Some(1));
  assert_eq!(grid.find_dichotomic(0, 3.5), Some(2));
  assert_eq!(grid.find_dichotomic(0, 4.0), Some(2), "upper boundary belongs to the last cell");
  assert_eq!(grid.find_dichotomic(0, -0.1), None);
  assert_eq!(grid.find_dichotomic(0, 4.1), None);
  assert_eq!(grid.find_dichotomic(0, f64::NAN), None);
  assert_eq!(grid.find_dichotomic(2, 12.0), Some(0), "flat axis");
}

// =============================================================================
// Children
// =============================================================================

#[test]
fn test_child_digits_round_trip() {
  let grid = HyperTreeGrid::new(
    GridConfig::uniform([1, 1, 1], DVec3::ZERO, DVec3::ONE).with_branch_factor(3),
  )
  .unwrap();
  for ichild in 0..grid.number_of_children() {
    assert_eq!(grid.child_index_from_digits(grid.child_digits(ichild)), ichild);
  }
  assert_eq!(grid.child_digits(5), [2, 1, 0]);
}

#[test]
fn test_child_origin_uses_spanned_axes() {
  let grid = HyperTreeGrid::new(
    GridConfig::default()
      .with_coordinates(1, vec![0.0])
      .with_coordinates(2, vec![0.0, 1.0]),
  )
  .unwrap();
  // Child 3 of an xz quadtree: +x and +z.
  let origin = grid.child_origin(DVec3::ZERO, DVec3::new(0.5, 0.0, 0.5), 3);
  assert_eq!(origin, DVec3::new(0.5, 0.0, 0.5));
}

// =============================================================================
// Trees
// =============================================================================

#[test]
fn test_get_or_create_tree() {
  let mut grid = grid_4x4();
  assert!(grid.tree(3).is_none());
  let tree = grid.get_or_create_tree(3).unwrap();
  assert_eq!(tree.tree_index(), 3);
  assert_eq!(tree.scales().root_size(), DVec3::new(1.0, 1.0, 0.0));
  assert_eq!(grid.number_of_non_empty_trees(), 1);
  assert_eq!(
    grid.get_or_create_tree(16).unwrap_err(),
    GridError::TreeIndexOutOfRange {
      tree_index: 16,
      number_of_trees: 16
    }
  );
}

#[test]
fn test_remove_trees_scenario() {
  let mut grid = grid_4x4();
  for index in [0, 1, 3, 5, 8, 12] {
    grid.get_or_create_tree(index).unwrap();
  }

  assert!(!grid.remove_tree(2), "absent tree");
  assert_eq!(grid.remove_trees([3, 5, 12, 12]), 3);
  assert_eq!(grid.tree_indices(), vec![0, 1, 8]);
  assert_eq!(grid.remove_trees([3]), 0, "already removed");
  assert!(!grid.remove_tree(99), "out of range");
}

#[test]
fn test_statistics() {
  let mut grid = grid_4x4();
  assert_eq!(grid.number_of_levels(), 0);
  grid.get_or_create_tree(0).unwrap().subdivide_leaf(0, 0);
  grid.get_or_create_tree(7).unwrap();
  assert_eq!(grid.number_of_levels(), 2);
  assert_eq!(grid.number_of_vertices(), 6);
  assert_eq!(grid.number_of_cells(), 6);
  assert_eq!(grid.number_of_leaves(), 5);

  grid.tree_mut(0).unwrap().set_global_index_start(0).unwrap();
  grid.tree_mut(7).unwrap().set_global_index_start(5).unwrap();
  assert_eq!(grid.global_index_bound(), 6);
}

// =============================================================================
// Mask and ghosts
// =============================================================================

#[test]
fn test_mask_lookup() {
  let mut grid = grid_4x4();
  assert!(!grid.has_mask());
  assert!(!grid.is_masked_index(0));

  grid.set_masked(3, true);
  assert!(grid.has_mask());
  assert_eq!(grid.mask(), Some(&[false, false, false, true][..]));
  assert!(grid.is_masked_index(3));
  assert!(!grid.is_masked_index(100), "past the end is unmasked");
}

#[test]
fn test_ghost_lookup() {
  let mut grid = grid_4x4();
  assert!(!grid.has_any_ghost_cells());
  grid.set_ghost_cells(Some(vec![false, false]));
  assert!(!grid.has_any_ghost_cells());
  grid.set_ghost_cells(Some(vec![false, true]));
  assert!(grid.has_any_ghost_cells());
  assert!(grid.is_ghost_index(1));
  assert!(!grid.is_ghost_index(2));
}
