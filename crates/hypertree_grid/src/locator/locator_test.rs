use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::grid::GridConfig;
use crate::test_utils::*;

fn random_grid(seed: u64, config: GridConfig, max_level: u32) -> HyperTreeGrid {
  let mut rng = StdRng::seed_from_u64(seed);
  refine_where(config, max_level, |_, level| rng.random_bool(0.6 / (level as f64 + 1.0)))
    .expect("random refinement")
}

fn global_at(grid: &HyperTreeGrid, tree_index: TreeIndex, path: &[usize]) -> u64 {
  let mut cursor = NonOrientedGeometryCursor::new(grid);
  cursor.initialize(tree_index).unwrap();
  for &ichild in path {
    cursor.to_child(ichild).unwrap();
  }
  cursor.global_node_index().unwrap()
}

fn crossed_leaves(grid: &HyperTreeGrid, p0: DVec3, p1: DVec3) -> Vec<u64> {
  let mut ids: Vec<u64> = collect_leaves(grid)
    .into_iter()
    .filter(|leaf| leaf.bounds.intersect_segment(p0, p1).is_some())
    .map(|leaf| leaf.global_index)
    .collect();
  ids.sort_unstable();
  ids
}

fn assert_sorted_by_t(hits: &LineIntersections) {
  assert_eq!(hits.points.len(), hits.len());
  assert_eq!(hits.cell_ids.len(), hits.len());
  for pair in hits.ts.windows(2) {
    assert!(pair[0] <= pair[1], "hits out of order: {:?}", hits.ts);
  }
}

// =============================================================================
// Point search
// =============================================================================

#[test]
fn test_search_finds_every_leaf_center() {
  for (name, grid) in [
    ("quadtree", quadtree_fixture()),
    ("octree", octree_fixture()),
    ("ternary", ternary_fixture()),
    ("line", line_fixture()),
  ] {
    let locator = HyperTreeGridLocator::new(&grid);
    for leaf in collect_leaves(&grid) {
      assert_eq!(
        locator.search(leaf.bounds.center()),
        Some(leaf.global_index),
        "{} leaf at {:?}",
        name,
        leaf.bounds
      );
    }
  }
}

#[test]
fn test_search_random_grids() {
  for seed in 0..6 {
    for branch_factor in [2, 3] {
      let config = GridConfig::uniform([3, 2, 2], DVec3::new(-1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 4.0))
        .with_branch_factor(branch_factor);
      let grid = random_grid(seed, config, 3);
      let locator = HyperTreeGridLocator::new(&grid);
      for leaf in collect_leaves(&grid) {
        assert_eq!(locator.search(leaf.bounds.center()), Some(leaf.global_index), "seed {}", seed);
      }
    }
  }
}

#[test]
fn test_search_outside_grid() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  assert_eq!(locator.search(DVec3::new(-0.1, 0.5, 0.0)), None);
  assert_eq!(locator.search(DVec3::new(0.5, 2.1, 0.0)), None);
}

#[test]
fn test_search_upper_boundary_belongs_to_last_cell() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let corner = DVec3::new(2.0, 2.0, 0.0);
  let last = collect_leaves(&grid)
    .into_iter()
    .find(|leaf| leaf.bounds.max == corner)
    .unwrap();
  assert_eq!(locator.search(corner), Some(last.global_index));
}

#[test]
fn test_search_leaves_cursor_on_found_leaf() {
  let grid = octree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let mut cursor = OrientedGeometryCursor::new(&grid);
  let point = DVec3::new(0.9, 0.9, 0.9);
  let found = locator.search_with_cursor(point, &mut cursor).unwrap();
  assert_eq!(cursor.global_node_index(), Some(found));
  assert_eq!(cursor.level(), 2);
  assert!(cursor.bounds().contains_point(point));
  assert!(locator.check_leaf_or_children_masked(&cursor));
}

#[test]
fn test_search_absent_tree() {
  let mut grid = quadtree_fixture();
  grid.remove_tree(3);
  let locator = HyperTreeGridLocator::new(&grid);
  assert_eq!(locator.search(DVec3::new(1.5, 1.5, 0.0)), None);
  assert!(locator.search(DVec3::new(0.5, 1.5, 0.0)).is_some());
}

// =============================================================================
// Masks and ghosts
// =============================================================================

#[test]
fn test_search_masked_leaf() {
  let mut grid = quadtree_fixture();
  let masked = global_at(&grid, 1, &[2]);
  grid.set_masked(masked, true);
  let locator = HyperTreeGridLocator::new(&grid);
  assert_eq!(locator.search(DVec3::new(1.25, 0.75, 0.0)), None);
  assert_eq!(locator.search(DVec3::new(1.75, 0.75, 0.0)), Some(global_at(&grid, 1, &[3])));
}

#[test]
fn test_search_all_children_masked_counts_as_leaf() {
  let mut grid = quadtree_fixture();
  for ichild in 0..4 {
    let global = global_at(&grid, 1, &[ichild]);
    grid.set_masked(global, true);
  }
  let root = global_at(&grid, 1, &[]);
  let locator = HyperTreeGridLocator::new(&grid);
  assert_eq!(locator.search(DVec3::new(1.25, 0.25, 0.0)), Some(root));
  assert_eq!(locator.search(DVec3::new(1.75, 0.75, 0.0)), Some(root));
}

#[test]
fn test_search_ghost_cell() {
  let mut grid = quadtree_fixture();
  let ghost = global_at(&grid, 3, &[0]);
  let mut ghosts = vec![false; grid.global_index_bound() as usize];
  ghosts[ghost as usize] = true;
  grid.set_ghost_cells(Some(ghosts));
  let locator = HyperTreeGridLocator::new(&grid);
  assert_eq!(locator.search(DVec3::new(1.25, 1.25, 0.0)), None);
  assert!(locator.search(DVec3::new(1.75, 1.25, 0.0)).is_some());
}

#[test]
fn test_search_random_masks() {
  let mut rng = StdRng::seed_from_u64(11);
  for seed in 0..4 {
    let mut grid = random_grid(seed, GridConfig::uniform([2, 2, 0], DVec3::ZERO, DVec3::new(2.0, 2.0, 0.0)), 4);
    let leaves = collect_leaves(&grid);
    let mut masked = Vec::new();
    for leaf in &leaves {
      if rng.random_bool(0.3) {
        grid.set_masked(leaf.global_index, true);
        masked.push(leaf.global_index);
      }
    }
    let locator = HyperTreeGridLocator::new(&grid);
    for leaf in &leaves {
      let found = locator.search(leaf.bounds.center());
      if masked.contains(&leaf.global_index) {
        assert_ne!(found, Some(leaf.global_index), "masked leaf located");
      } else {
        assert_eq!(found, Some(leaf.global_index));
      }
    }
  }
}

// =============================================================================
// Find cell
// =============================================================================

#[test]
fn test_find_cell_parametric_coordinates() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let location = locator.find_cell(DVec3::new(0.125, 0.375, 0.0), 0.0).unwrap();
  assert_eq!(location.global_index, global_at(&grid, 0, &[0]));
  assert_eq!(location.cell.kind(), CellKind::Pixel);
  assert!(approx_eq(location.pcoords, DVec3::new(0.25, 0.75, 0.0), 1e-12));
  let total: f64 = location.weights.iter().sum();
  assert!((total - 1.0).abs() < 1e-12);
  assert_eq!(location.dist2, 0.0);
}

#[test]
fn test_find_cell_voxel() {
  let grid = octree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let location = locator.find_cell(DVec3::new(1.5, 0.5, 0.5), 0.0).unwrap();
  assert_eq!(location.cell.kind(), CellKind::Voxel);
  assert_eq!(location.weights.len(), 8);
  assert!(approx_eq(location.pcoords, DVec3::new(0.5, 0.5, 0.5), 1e-12));
}

#[test]
fn test_tolerance_snaps_to_boundary() {
  let grid = quadtree_fixture();
  let point = DVec3::new(-1e-6, 0.3, 0.0);
  assert_eq!(HyperTreeGridLocator::new(&grid).search(point), None);

  let locator = HyperTreeGridLocator::with_config(&grid, LocatorConfig::default().with_tolerance(1e-5));
  assert_eq!(locator.search(point), Some(global_at(&grid, 0, &[0])));
  assert!(locator.find_cell(point, 1e-5).is_some());
  assert!(locator.find_cell(point, 0.0).is_none());
}

// =============================================================================
// First intersection
// =============================================================================

#[test]
fn test_line_from_outside_enters_first_leaf() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let hit = locator
    .intersect_with_line(DVec3::new(-1.0, 0.3, 0.0), DVec3::new(3.0, 0.3, 0.0), 0.0)
    .unwrap();
  assert!((hit.t - 0.25).abs() < 1e-12);
  assert!(approx_eq(hit.point, DVec3::new(0.0, 0.3, 0.0), 1e-12));
  assert_eq!(hit.global_index, global_at(&grid, 0, &[0]));
}

#[test]
fn test_line_starting_inside() {
  let grid = octree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let p0 = DVec3::new(0.9, 0.9, 0.9);
  let hit = locator.intersect_with_line(p0, DVec3::new(5.0, 0.9, 0.9), 0.0).unwrap();
  assert_eq!(hit.t, 0.0);
  assert_eq!(hit.point, p0);
  assert_eq!(Some(hit.global_index), locator.search(p0));
}

#[test]
fn test_line_crossing_plane() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let hit = locator
    .intersect_with_line(DVec3::new(0.6, 0.1, -1.0), DVec3::new(0.6, 0.1, 1.0), 0.0)
    .unwrap();
  assert!((hit.t - 0.5).abs() < 1e-12);
  assert_eq!(hit.global_index, global_at(&grid, 0, &[1]));
}

#[test]
fn test_line_missing_grid() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let (p0, p1) = (DVec3::new(-1.0, 3.0, 0.0), DVec3::new(3.0, 3.0, 0.0));
  assert!(locator.intersect_with_line(p0, p1, 0.0).is_none());
  assert!(locator.intersect_with_line_all(p0, p1, 0.0).is_empty());
}

#[test]
fn test_masked_entry_falls_back_to_next_leaf() {
  let mut grid = quadtree_fixture();
  let masked = global_at(&grid, 0, &[0]);
  grid.set_masked(masked, true);
  let locator = HyperTreeGridLocator::new(&grid);
  let hit = locator
    .intersect_with_line(DVec3::new(-1.0, 0.3, 0.0), DVec3::new(3.0, 0.3, 0.0), 0.0)
    .unwrap();
  assert!((hit.t - 0.375).abs() < 1e-12);
  assert_eq!(hit.global_index, global_at(&grid, 0, &[1]));
}

#[test]
fn test_fallback_backtracks_out_of_masked_branch() {
  // Along y = 0.6 every leaf of tree 0 that the line crosses is masked,
  // although tree 0 child 3 keeps unmasked descendants elsewhere.
  let mut grid = quadtree_fixture();
  for path in [&[2][..], &[3, 0, 0], &[3, 0, 1], &[3, 1]] {
    let global = global_at(&grid, 0, path);
    grid.set_masked(global, true);
  }
  let locator = HyperTreeGridLocator::new(&grid);
  let hit = locator
    .intersect_with_line(DVec3::new(-1.0, 0.6, 0.0), DVec3::new(3.0, 0.6, 0.0), 0.0)
    .unwrap();
  assert!((hit.t - 0.5).abs() < 1e-12);
  assert_eq!(hit.global_index, global_at(&grid, 1, &[2]));
}

#[test]
fn test_line_on_line_grid() {
  let grid = line_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let (p0, p1) = (DVec3::new(-1.0, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0));
  let hit = locator.intersect_with_line(p0, p1, 0.0).unwrap();
  assert!((hit.t - 1.0 / 6.0).abs() < 1e-12);
  assert_eq!(hit.global_index, global_at(&grid, 0, &[]));

  let all = locator.intersect_with_line_all(p0, p1, 0.0);
  assert_eq!(all.len(), 7);
  assert_sorted_by_t(&all);
}

// =============================================================================
// All intersections
// =============================================================================

#[test]
fn test_all_intersections_along_row() {
  let grid = quadtree_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let all = locator.intersect_with_line_all(DVec3::new(-1.0, 0.3, 0.0), DVec3::new(3.0, 0.3, 0.0), 0.0);
  assert_eq!(all.ts, vec![0.25, 0.375, 0.5, 0.625]);
  assert_eq!(
    all.cell_ids,
    vec![
      global_at(&grid, 0, &[0]),
      global_at(&grid, 0, &[1]),
      global_at(&grid, 1, &[0]),
      global_at(&grid, 1, &[1]),
    ]
  );
  assert!(approx_eq(all.points[2], DVec3::new(1.0, 0.3, 0.0), 1e-12));
}

#[test]
fn test_all_intersections_match_brute_force() {
  let mut rng = StdRng::seed_from_u64(5);
  for seed in 0..4 {
    for (config, planar) in [
      (GridConfig::uniform([3, 2, 0], DVec3::ZERO, DVec3::new(3.0, 2.0, 0.0)), true),
      (GridConfig::uniform([2, 2, 2], DVec3::ZERO, DVec3::splat(2.0)), false),
    ] {
      let grid = random_grid(seed, config, 3);
      let locator = HyperTreeGridLocator::new(&grid);
      for _ in 0..10 {
        let z = |rng: &mut StdRng| if planar { 0.0 } else { rng.random_range(-0.5..2.5) };
        let p0 = DVec3::new(-1.0, rng.random_range(-0.5..2.5), z(&mut rng));
        let p1 = DVec3::new(4.0, rng.random_range(-0.5..2.5), z(&mut rng));

        let all = locator.intersect_with_line_all(p0, p1, 0.0);
        assert_sorted_by_t(&all);
        let mut ids = all.cell_ids.clone();
        ids.sort_unstable();
        assert_eq!(ids, crossed_leaves(&grid, p0, p1), "seed {} segment {:?} {:?}", seed, p0, p1);

        let hit = locator.intersect_with_line(p0, p1, 0.0);
        assert_eq!(hit.is_some(), !all.is_empty());
        if let Some(hit) = hit {
          assert!(hit.t >= all.ts[0] - 1e-12 && hit.t - all.ts[0] <= 1e-3, "first hit t {}", hit.t);
          assert!(all.cell_ids.contains(&hit.global_index));
        }
      }
    }
  }
}

#[test]
fn test_all_intersections_skip_masked_cells() {
  let mut grid = quadtree_fixture();
  let masked = global_at(&grid, 0, &[1]);
  grid.set_masked(masked, true);
  let locator = HyperTreeGridLocator::new(&grid);
  let all = locator.intersect_with_line_all(DVec3::new(-1.0, 0.3, 0.0), DVec3::new(3.0, 0.3, 0.0), 0.0);
  assert_eq!(all.ts, vec![0.25, 0.5, 0.625]);
  assert!(!all.cell_ids.contains(&masked));
}

#[test]
fn test_all_intersections_diagonal_order() {
  let grid = ternary_fixture();
  let locator = HyperTreeGridLocator::new(&grid);
  let (p0, p1) = (DVec3::new(3.5, 3.5, 0.0), DVec3::new(-0.5, -0.5, 0.0));
  let all = locator.intersect_with_line_all(p0, p1, 1e-9);
  assert_sorted_by_t(&all);
  assert!(!all.is_empty());
  for (point, &t) in all.points.iter().zip(&all.ts) {
    assert!(approx_eq(*point, p0 + (p1 - p0) * t, 1e-12));
  }
}
