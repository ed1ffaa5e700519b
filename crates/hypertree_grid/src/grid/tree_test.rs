use super::*;

fn quad_tree() -> HyperTree {
  HyperTree::new(0, 2, 2, DVec3::new(1.0, 1.0, 0.0))
}

// =============================================================================
// Subdivision
// =============================================================================

#[test]
fn test_new_tree_is_single_leaf() {
  let tree = quad_tree();
  assert!(tree.is_leaf(0));
  assert_eq!(tree.number_of_vertices(), 1);
  assert_eq!(tree.number_of_leaves(), 1);
  assert_eq!(tree.number_of_levels(), 1);
  assert_eq!(tree.elder_child_index(0), INVALID_INDEX);
  assert!(tree.elder_child_index_array().is_empty());
}

#[test]
fn test_subdivide_allocates_contiguous_children() {
  let mut tree = quad_tree();
  tree.subdivide_leaf(0, 0);
  assert!(!tree.is_leaf(0));
  assert_eq!(tree.elder_child_index(0), 1);
  assert_eq!(tree.number_of_vertices(), 5);
  assert_eq!(tree.number_of_leaves(), 4);
  assert_eq!(tree.number_of_levels(), 2);

  tree.subdivide_leaf(3, 1);
  assert_eq!(tree.elder_child_index(3), 5);
  assert_eq!(tree.number_of_vertices(), 9);
  assert_eq!(tree.number_of_leaves(), 7);
  assert_eq!(tree.number_of_levels(), 3);
  assert_eq!(tree.elder_child_index_array().len(), 4);

  // Siblings before the refined one stay leaves.
  assert!(tree.is_leaf(1));
  assert!(tree.is_leaf(2));
  assert!(tree.is_leaf(8));
}

#[test]
fn test_subdivide_twice_is_noop() {
  let mut tree = quad_tree();
  tree.subdivide_leaf(0, 0);
  tree.subdivide_leaf(0, 0);
  assert_eq!(tree.number_of_vertices(), 5);
  assert_eq!(tree.number_of_leaves(), 4);
}

#[test]
fn test_scales_follow_subdivision() {
  let mut tree = HyperTree::new(0, 3, 3, DVec3::splat(9.0));
  tree.subdivide_leaf(0, 0);
  tree.subdivide_leaf(1, 1);
  assert_eq!(tree.number_of_children(), 27);
  assert_eq!(tree.scales().number_of_cached_levels(), 3);
  assert_eq!(tree.scales().cell_size(2), DVec3::ONE);
}

// =============================================================================
// Global indexing
// =============================================================================

#[test]
fn test_unset_global_indexing() {
  let tree = quad_tree();
  assert_eq!(tree.global_index_from_local(0), None);
  assert_eq!(tree.maximum_global_index(), None);
}

#[test]
fn test_implicit_global_indexing() {
  let mut tree = quad_tree();
  tree.subdivide_leaf(0, 0);
  tree.set_global_index_start(10).unwrap();
  assert_eq!(tree.global_index_from_local(0), Some(10));
  assert_eq!(tree.global_index_from_local(4), Some(14));
  assert_eq!(tree.global_index_from_local(INVALID_INDEX), None);
  assert_eq!(tree.maximum_global_index(), Some(14));
}

#[test]
fn test_explicit_global_indexing() {
  let mut tree = quad_tree();
  tree.set_global_index_from_local(0, 42).unwrap();
  tree.set_global_index_from_local(3, 7).unwrap();
  assert_eq!(tree.global_index_from_local(0), Some(42));
  assert_eq!(tree.global_index_from_local(1), None, "gap in the table is unassigned");
  assert_eq!(tree.global_index_from_local(3), Some(7));
  assert_eq!(tree.global_index_from_local(9), None);
  assert_eq!(tree.maximum_global_index(), Some(42));
}

#[test]
fn test_mixed_global_indexing_is_rejected() {
  let mut tree = HyperTree::new(5, 2, 2, DVec3::ONE);
  tree.set_global_index_start(0).unwrap();
  assert_eq!(
    tree.set_global_index_from_local(0, 1),
    Err(CursorError::MixedGlobalIndexing { tree_index: 5 })
  );

  let mut tree = HyperTree::new(6, 2, 2, DVec3::ONE);
  tree.set_global_index_from_local(0, 1).unwrap();
  assert_eq!(
    tree.set_global_index_start(0),
    Err(CursorError::MixedGlobalIndexing { tree_index: 6 })
  );
}
