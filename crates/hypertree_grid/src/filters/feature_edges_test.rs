use std::sync::atomic::Ordering;

use glam::DVec3;

use super::*;
use crate::grid::GridConfig;
use crate::test_utils::*;

fn unit_square(cells: usize, depth: u32) -> HyperTreeGrid {
  uniform_fixture(GridConfig::uniform([cells, cells, 0], DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)), depth)
}

fn run(grid: &HyperTreeGrid) -> FeatureEdgesOutput {
  feature_edges(grid, &FeatureEdgesConfig::new()).unwrap()
}

#[test]
fn test_single_cell_outline() {
  let output = run(&unit_square(1, 0));
  assert_eq!(output.len(), 4);
  assert!((output.total_length() - 4.0).abs() < 1e-12);
  assert_eq!(output.points.len(), 8);
}

#[test]
fn test_uniform_grid_keeps_only_boundary() {
  for (cells, depth) in [(4, 0), (2, 1), (1, 2)] {
    let output = run(&unit_square(cells, depth));
    assert_eq!(output.len(), 16, "cells {} depth {}", cells, depth);
    assert!((output.total_length() - 4.0).abs() < 1e-12);
    for &[a, b] in &output.edges {
      let (p, q) = (output.points[a as usize], output.points[b as usize]);
      let on_boundary = |point: DVec3| point.x == 0.0 || point.x == 1.0 || point.y == 0.0 || point.y == 1.0;
      assert!(on_boundary((p + q) * 0.5), "interior edge {:?} {:?}", p, q);
    }
  }
}

#[test]
fn test_level_changes_emit_from_finer_side() {
  let grid = quadtree_fixture();
  let output = run(&grid);
  assert!((output.total_length() - 11.5).abs() < 1e-12);

  let levels: std::collections::HashMap<u64, u32> = collect_leaves(&grid)
    .into_iter()
    .map(|leaf| (leaf.global_index, leaf.level))
    .collect();
  // Interior feature edges all come from leaves finer than level 1.
  for (k, &[a, b]) in output.edges.iter().enumerate() {
    let middle = (output.points[a as usize] + output.points[b as usize]) * 0.5;
    let on_boundary = middle.x == 0.0 || middle.x == 2.0 || middle.y == 0.0 || middle.y == 2.0;
    if !on_boundary {
      assert!(levels[&output.cell_ids[k]] >= 2);
    }
  }
}

#[test]
fn test_cube_outline() {
  let grid = uniform_fixture(GridConfig::uniform([1, 1, 1], DVec3::ZERO, DVec3::ONE), 0);
  let output = run(&grid);
  assert_eq!(output.len(), 24);
  assert!((output.total_length() - 24.0).abs() < 1e-12);
  assert!(output.cell_ids.iter().all(|&global| global == 0));
}

#[test]
fn test_refined_cube_keeps_outer_faces() {
  let grid = uniform_fixture(GridConfig::uniform([1, 1, 1], DVec3::ZERO, DVec3::ONE), 1);
  let output = run(&grid);
  // 6 faces, 4 quarter faces each, 4 edges per quarter face.
  assert_eq!(output.len(), 96);
  assert!((output.total_length() - 48.0).abs() < 1e-12);
}

#[test]
fn test_masked_leaf_opens_a_notch() {
  let mut grid = unit_square(2, 0);
  grid.set_masked(3, true);
  let output = run(&grid);
  assert_eq!(output.len(), 8);
  assert!((output.total_length() - 4.0).abs() < 1e-12);
  assert!(!output.cell_ids.contains(&3));
}

#[test]
fn test_line_grid_is_unsupported() {
  let grid = line_fixture();
  assert_eq!(
    feature_edges(&grid, &FeatureEdgesConfig::new()),
    Err(FilterError::UnsupportedDimension(1))
  );
}

#[test]
fn test_abort_flag_stops_feature_edges() {
  let grid = unit_square(2, 0);
  let flag = AbortFlag::default();
  flag.store(true, Ordering::Relaxed);
  let config = FeatureEdgesConfig::new().with_abort_flag(flag);
  assert_eq!(feature_edges(&grid, &config), Err(FilterError::Aborted));
}
