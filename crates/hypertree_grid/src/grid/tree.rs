//! Compact storage of one hyper tree.
//!
//! Nodes are addressed by a tree-local index. The root is `0`. Subdividing a
//! leaf appends `number_of_children` consecutive vertices and records the
//! first one as the leaf's elder child:
//!
//! ```text
//! elder_child[local] = first child local index, or INVALID_INDEX
//! child(local, i)    = elder_child[local] + i
//! ```
//!
//! Nodes that were never subdivided either hold `INVALID_INDEX` or lie past
//! the end of `elder_child`.

use glam::DVec3;

use super::{HyperTreeScales, TreeIndex, INVALID_INDEX};
use crate::error::{CursorError, CursorResult};

/// How local indices map to grid-wide global indices.
#[derive(Clone, Debug, PartialEq)]
enum GlobalIndexing {
  Unset,
  /// `global = start + local`.
  Implicit(u64),
  /// Explicit table indexed by local index, `INVALID_INDEX` for unassigned.
  Explicit(Vec<u64>),
}

/// One adaptively refined tree of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperTree {
  tree_index: TreeIndex,
  number_of_children: usize,
  elder_child: Vec<u64>,
  number_of_vertices: u64,
  number_of_leaves: u64,
  number_of_levels: u32,
  global_indexing: GlobalIndexing,
  scales: HyperTreeScales,
}

impl HyperTree {
  /// Create a single-leaf tree whose root cell has size `root_size`.
  pub fn new(tree_index: TreeIndex, dimension: usize, branch_factor: u32, root_size: DVec3) -> Self {
    Self {
      tree_index,
      number_of_children: (branch_factor as usize).pow(dimension as u32),
      elder_child: Vec::new(),
      number_of_vertices: 1,
      number_of_leaves: 1,
      number_of_levels: 1,
      global_indexing: GlobalIndexing::Unset,
      scales: HyperTreeScales::new(branch_factor, root_size),
    }
  }

  #[inline]
  pub fn tree_index(&self) -> TreeIndex {
    self.tree_index
  }

  #[inline]
  pub fn number_of_children(&self) -> usize {
    self.number_of_children
  }

  /// Total number of nodes, leaves and refined nodes alike.
  #[inline]
  pub fn number_of_vertices(&self) -> u64 {
    self.number_of_vertices
  }

  #[inline]
  pub fn number_of_leaves(&self) -> u64 {
    self.number_of_leaves
  }

  /// Number of levels, `1` for a tree made of its root only.
  #[inline]
  pub fn number_of_levels(&self) -> u32 {
    self.number_of_levels
  }

  #[inline]
  pub fn scales(&self) -> &HyperTreeScales {
    &self.scales
  }

  /// True when `local` has never been subdivided.
  #[inline]
  pub fn is_leaf(&self, local: u64) -> bool {
    self.elder_child_index(local) == INVALID_INDEX
  }

  /// First child of `local`, or `INVALID_INDEX` when it has none.
  #[inline]
  pub fn elder_child_index(&self, local: u64) -> u64 {
    usize::try_from(local)
      .ok()
      .and_then(|local| self.elder_child.get(local))
      .copied()
      .unwrap_or(INVALID_INDEX)
  }

  /// Raw elder child array. Its length bounds the local indices that may
  /// have children.
  #[inline]
  pub fn elder_child_index_array(&self) -> &[u64] {
    &self.elder_child
  }

  /// Subdivide leaf `local` sitting at `level`. Does nothing if `local` is
  /// already refined.
  pub fn subdivide_leaf(&mut self, local: u64, level: u32) {
    debug_assert!(local < self.number_of_vertices, "subdividing a node that does not exist");
    if !self.is_leaf(local) {
      return;
    }

    let slot = local as usize;
    if self.elder_child.len() <= slot {
      self.elder_child.resize(slot + 1, INVALID_INDEX);
    }
    self.elder_child[slot] = self.number_of_vertices;

    let children = self.number_of_children as u64;
    self.number_of_vertices += children;
    self.number_of_leaves += children - 1;
    self.number_of_levels = self.number_of_levels.max(level + 2);
    self.scales.compute_to(level + 1);
  }

  /// Use implicit global indexing: `global = start + local`.
  pub fn set_global_index_start(&mut self, start: u64) -> CursorResult<()> {
    match self.global_indexing {
      GlobalIndexing::Explicit(_) => Err(CursorError::MixedGlobalIndexing {
        tree_index: self.tree_index,
      }),
      _ => {
        self.global_indexing = GlobalIndexing::Implicit(start);
        Ok(())
      }
    }
  }

  /// Assign an explicit global index to node `local`.
  pub fn set_global_index_from_local(&mut self, local: u64, global: u64) -> CursorResult<()> {
    match &mut self.global_indexing {
      GlobalIndexing::Implicit(_) => Err(CursorError::MixedGlobalIndexing {
        tree_index: self.tree_index,
      }),
      GlobalIndexing::Explicit(table) => {
        Self::store(table, local, global);
        Ok(())
      }
      GlobalIndexing::Unset => {
        let mut table = Vec::new();
        Self::store(&mut table, local, global);
        self.global_indexing = GlobalIndexing::Explicit(table);
        Ok(())
      }
    }
  }

  fn store(table: &mut Vec<u64>, local: u64, global: u64) {
    let slot = local as usize;
    if table.len() <= slot {
      table.resize(slot + 1, INVALID_INDEX);
    }
    table[slot] = global;
  }

  /// Global index of node `local`, `None` when unassigned.
  #[inline]
  pub fn global_index_from_local(&self, local: u64) -> Option<u64> {
    if local == INVALID_INDEX {
      return None;
    }
    match &self.global_indexing {
      GlobalIndexing::Unset => None,
      GlobalIndexing::Implicit(start) => Some(start + local),
      GlobalIndexing::Explicit(table) => usize::try_from(local)
        .ok()
        .and_then(|local| table.get(local))
        .copied()
        .filter(|&global| global != INVALID_INDEX),
    }
  }

  /// Largest global index assigned to this tree, if any.
  pub fn maximum_global_index(&self) -> Option<u64> {
    match &self.global_indexing {
      GlobalIndexing::Unset => None,
      GlobalIndexing::Implicit(start) => Some(start + self.number_of_vertices - 1),
      GlobalIndexing::Explicit(table) => table.iter().copied().filter(|&g| g != INVALID_INDEX).max(),
    }
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
