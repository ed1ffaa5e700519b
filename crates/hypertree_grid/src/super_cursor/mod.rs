//! Super cursors: a central cursor plus its neighborhood.
//!
//! A super cursor walks one tree like a non-oriented cursor and keeps every
//! neighbor of the current cell available, across tree boundaries. Neighbors
//! are refined lazily: on `to_child`, only neighbors that are themselves
//! subdivided get a new entry. Coarser neighbors keep pointing at the entry
//! they had at the previous depth.
//!
//! # Storage
//!
//! ```text
//! entries             pool of neighbor states, grown on demand, never freed
//! first_non_valid_entry_by_level[d]
//!                     one past the last pool slot used up to depth d
//! reference_entries[d * (n - 1) + k]
//!                     pool slot of neighbor i at depth d, where
//!                     k = i for i < central, i - 1 for i > central
//! ```
//!
//! `to_child` writes new neighbor states from the parent watermark on, so
//! slots left behind by an abandoned sibling branch are reused.
//! `to_parent` and `to_root` only move counters.

mod neighborhood;

pub use neighborhood::{Neighborhood, NeighborhoodKind};

use glam::DVec3;
use smallvec::SmallVec;

use crate::bounds::Bounds;
use crate::entry::{Entry, LevelEntry, UnlimitedLevelEntry};
use crate::error::{CursorError, CursorResult};
use crate::grid::{HyperTreeGrid, TreeIndex};
use crate::tables::corner_neighbor_cursor;

/// Bounded super cursor over a Moore neighborhood.
pub type MooreSuperCursor<'g> = SuperCursor<'g, LevelEntry>;

/// Bounded super cursor over a Von Neumann neighborhood.
pub type VonNeumannSuperCursor<'g> = SuperCursor<'g, LevelEntry>;

/// Unlimited super cursor over a Moore neighborhood.
pub type UnlimitedMooreSuperCursor<'g> = SuperCursor<'g, UnlimitedLevelEntry>;

/// Cursor indices of the leaves around one corner.
pub type CornerLeaves = SmallVec<[usize; 8]>;

/// Central cursor plus lazily refined neighbors.
#[derive(Clone, Debug)]
pub struct SuperCursor<'g, E: Entry> {
  grid: &'g HyperTreeGrid,
  neighborhood: Neighborhood,
  depth: usize,
  central: Vec<E>,
  entries: Vec<E>,
  first_non_valid_entry_by_level: Vec<usize>,
  reference_entries: Vec<usize>,
}

impl<'g> SuperCursor<'g, LevelEntry> {
  /// Detached Moore super cursor.
  pub fn moore(grid: &'g HyperTreeGrid) -> CursorResult<Self> {
    Self::new(grid, NeighborhoodKind::Moore)
  }

  /// Detached Von Neumann super cursor.
  pub fn von_neumann(grid: &'g HyperTreeGrid) -> CursorResult<Self> {
    Self::new(grid, NeighborhoodKind::VonNeumann)
  }
}

impl<'g> SuperCursor<'g, UnlimitedLevelEntry> {
  /// Detached unlimited Moore super cursor.
  pub fn unlimited_moore(grid: &'g HyperTreeGrid) -> CursorResult<Self> {
    Self::new(grid, NeighborhoodKind::Moore)
  }

  /// True when neighbor `i` is a real cell that is a leaf or sits at the
  /// depth limiter.
  pub fn is_real_leaf(&self, i: usize) -> bool {
    self.neighbor(i).is_real_leaf(self.grid)
  }

  pub fn is_virtual_leaf(&self, i: usize) -> bool {
    self.neighbor(i).is_virtual_leaf(self.grid)
  }

  pub fn last_real_level(&self, i: usize) -> u32 {
    self.neighbor(i).last_real_level()
  }

  /// Fraction of its last real cell that neighbor `i` covers.
  pub fn extensive_property_ratio(&self, i: usize) -> f64 {
    self.neighbor(i).extensive_property_ratio(self.grid)
  }
}

impl<'g, E: Entry> SuperCursor<'g, E> {
  /// Detached super cursor. Attach it with [`Self::initialize`].
  pub fn new(grid: &'g HyperTreeGrid, kind: NeighborhoodKind) -> CursorResult<Self> {
    let neighborhood =
      Neighborhood::new(kind, grid.dimension(), grid.branch_factor()).ok_or(CursorError::UnsupportedNeighborhood)?;
    let span = neighborhood.number_of_cursors() - 1;
    Ok(Self {
      grid,
      neighborhood,
      depth: 0,
      central: vec![E::default()],
      entries: vec![E::default(); span],
      first_non_valid_entry_by_level: vec![span],
      reference_entries: (0..span).collect(),
    })
  }

  /// Move to the root of `tree_index` and rebuild the root neighborhood
  /// from the level-zero topology.
  ///
  /// Returns `None` when the central tree is absent. Neighbors outside the
  /// grid, or in empty level-zero cells, have no tree.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "super_cursor::initialize"))]
  pub fn initialize(&mut self, tree_index: TreeIndex) -> Option<TreeIndex> {
    let span = self.span();
    self.depth = 0;
    self.central.truncate(1);
    self.entries.clear();
    self.entries.resize(span, E::default());
    self.reference_entries.clear();
    self.reference_entries.extend(0..span);
    self.first_non_valid_entry_by_level.clear();
    self.first_non_valid_entry_by_level.push(span);

    let grid = self.grid;
    let tree = self.central[0].initialize(grid, tree_index);
    if tree_index >= grid.number_of_trees() {
      return tree;
    }

    let central = self.central_index();
    for i in (0..self.number_of_cursors()).filter(|&i| i != central) {
      let local = self.neighborhood.offset(i);
      let mut offset = [0; 3];
      for (a, &axis) in grid.axes().iter().enumerate() {
        offset[axis] = local[a];
      }
      let slot = self.neighborhood.reference_slot(i);
      if let Some(neighbor) = grid.shifted_level_zero_index(tree_index, offset) {
        self.entries[slot].initialize(grid, neighbor);
      }
    }
    tree
  }

  #[inline]
  pub fn grid(&self) -> &'g HyperTreeGrid {
    self.grid
  }

  #[inline]
  pub fn neighborhood(&self) -> &Neighborhood {
    &self.neighborhood
  }

  #[inline]
  pub fn number_of_cursors(&self) -> usize {
    self.neighborhood.number_of_cursors()
  }

  #[inline]
  pub fn central_index(&self) -> usize {
    self.neighborhood.central_index()
  }

  #[inline]
  pub fn number_of_children(&self) -> usize {
    self.grid.number_of_children()
  }

  /// Descent depth below the tree root.
  #[inline]
  pub fn depth(&self) -> usize {
    self.depth
  }

  #[inline]
  pub fn is_root(&self) -> bool {
    self.depth == 0
  }

  /// Current central entry.
  #[inline]
  pub fn central(&self) -> &E {
    &self.central[self.depth]
  }

  /// Entry of cursor `i`, where `central_index()` is the central cell.
  ///
  /// Checked counterpart of the per-cursor accessors.
  pub fn entry(&self, i: usize) -> CursorResult<&E> {
    let number_of_cursors = self.number_of_cursors();
    if i >= number_of_cursors {
      return Err(CursorError::NeighborOutOfRange {
        index: i,
        number_of_cursors,
      });
    }
    Ok(self.neighbor(i))
  }

  /// Number of pool entries in use along the current path.
  #[inline]
  pub fn number_of_live_entries(&self) -> usize {
    self.first_non_valid_entry_by_level[self.depth]
  }

  /// Unchecked in release builds. Callers pass `i < number_of_cursors()`.
  #[inline]
  fn neighbor(&self, i: usize) -> &E {
    debug_assert!(i < self.number_of_cursors(), "neighbor index {} out of range", i);
    if i == self.central_index() {
      return &self.central[self.depth];
    }
    let block = self.depth * self.span();
    &self.entries[self.reference_entries[block + self.neighborhood.reference_slot(i)]]
  }

  #[inline]
  fn span(&self) -> usize {
    self.neighborhood.number_of_cursors() - 1
  }

  // ---------------------------------------------------------------------------
  // Navigation
  // ---------------------------------------------------------------------------

  /// Descend into child `ichild` of the central cell.
  ///
  /// Fails, leaving the cursor in place, when the central cell cannot be
  /// descended (leaf, masked, at the depth limiter, no tree).
  pub fn to_child(&mut self, ichild: usize) -> CursorResult<()> {
    let grid = self.grid;
    let parent = self.central[self.depth];
    let mut central_child = parent;
    central_child.to_child(grid, ichild)?;

    let span = self.span();
    let central = self.central_index();
    let previous_block = self.depth * span;
    let depth = self.depth + 1;
    let block = depth * span;
    if self.reference_entries.len() < block + span {
      self.reference_entries.resize(block + span, 0);
    }

    let mut watermark = self.first_non_valid_entry_by_level[self.depth];
    for i in (0..self.number_of_cursors()).filter(|&i| i != central) {
      let (j, child) = self.neighborhood.descent(ichild, i);
      let reference = if j == central {
        let mut entry = parent;
        entry.to_child(grid, child)?;
        store(&mut self.entries, &mut watermark, entry)
      } else {
        let previous = self.reference_entries[previous_block + self.neighborhood.reference_slot(j)];
        let entry = self.entries[previous];
        if entry.has_tree() && !entry.is_masked(grid) && !entry.is_leaf(grid) {
          let mut refined = entry;
          match refined.to_child(grid, child) {
            Ok(()) => store(&mut self.entries, &mut watermark, refined),
            Err(_) => previous,
          }
        } else {
          previous
        }
      };
      self.reference_entries[block + self.neighborhood.reference_slot(i)] = reference;
    }

    if self.first_non_valid_entry_by_level.len() == depth {
      self.first_non_valid_entry_by_level.push(watermark);
    } else {
      self.first_non_valid_entry_by_level[depth] = watermark;
    }
    if self.central.len() == depth {
      self.central.push(central_child);
    } else {
      self.central[depth] = central_child;
    }
    self.depth = depth;
    Ok(())
  }

  pub fn to_parent(&mut self) -> CursorResult<()> {
    if self.depth == 0 {
      return Err(CursorError::AtRoot);
    }
    self.depth -= 1;
    Ok(())
  }

  pub fn to_root(&mut self) {
    self.depth = 0;
  }

  // ---------------------------------------------------------------------------
  // Per-cursor accessors
  //
  // `i` ranges over `0..number_of_cursors()`; `central_index()` is the
  // central cell. These expect an in-range `i` and only debug-assert it.
  // `entry` is the checked path and returns `NeighborOutOfRange`.
  // ---------------------------------------------------------------------------

  pub fn has_tree(&self, i: usize) -> bool {
    self.neighbor(i).has_tree()
  }

  pub fn tree_index(&self, i: usize) -> Option<TreeIndex> {
    self.neighbor(i).tree_index()
  }

  pub fn level(&self, i: usize) -> u32 {
    self.neighbor(i).level()
  }

  pub fn vertex_id(&self, i: usize) -> u64 {
    self.neighbor(i).vertex_id()
  }

  pub fn global_node_index(&self, i: usize) -> Option<u64> {
    self.neighbor(i).global_node_index(self.grid)
  }

  pub fn is_masked(&self, i: usize) -> bool {
    self.neighbor(i).is_masked(self.grid)
  }

  pub fn is_ghost(&self, i: usize) -> bool {
    self.neighbor(i).is_ghost(self.grid)
  }

  pub fn is_leaf(&self, i: usize) -> bool {
    self.neighbor(i).is_leaf(self.grid)
  }

  pub fn origin(&self, i: usize) -> DVec3 {
    self.neighbor(i).origin()
  }

  pub fn size(&self, i: usize) -> DVec3 {
    self.neighbor(i).size(self.grid)
  }

  pub fn bounds(&self, i: usize) -> Bounds {
    self.neighbor(i).bounds(self.grid)
  }

  /// Center of cursor `i`'s cell.
  pub fn point(&self, i: usize) -> DVec3 {
    self.neighbor(i).point(self.grid)
  }

  // ---------------------------------------------------------------------------
  // Corners
  // ---------------------------------------------------------------------------

  /// Collect the cursors of the `2^d` leaves around corner `corner` of the
  /// central cell into `leaves`, in corner-leaf order.
  ///
  /// Returns whether the central cell owns the corner. Exactly one leaf
  /// owns each interior corner: a neighbor that is absent, masked or
  /// refined takes ownership away, as does a same-level neighbor with a
  /// larger cursor index.
  pub fn corner_cursors(&self, corner: usize, leaves: &mut CornerLeaves) -> CursorResult<bool> {
    if self.neighborhood.kind() != NeighborhoodKind::Moore {
      return Err(CursorError::UnsupportedNeighborhood);
    }
    let dimension = self.grid.dimension();
    let number_of_corners = 1 << dimension;
    if corner >= number_of_corners {
      return Err(CursorError::CornerOutOfRange {
        corner,
        number_of_corners,
      });
    }

    leaves.clear();
    let central = self.central_index();
    let level = self.level(central);
    let mut owner = true;
    for leaf in 0..number_of_corners {
      let index = corner_neighbor_cursor(dimension, corner, leaf).ok_or(CursorError::CornerOutOfRange {
        corner,
        number_of_corners,
      })?;
      if index != central {
        let entry = self.neighbor(index);
        if !entry.has_tree()
          || !entry.is_leaf(self.grid)
          || entry.is_masked(self.grid)
          || (central < index && entry.level() == level)
        {
          owner = false;
        }
      }
      leaves.push(index);
    }
    Ok(owner)
  }
}

/// Write `entry` at the watermark and advance it. Returns the slot.
#[inline]
fn store<E: Entry>(entries: &mut Vec<E>, watermark: &mut usize, entry: E) -> usize {
  let slot = *watermark;
  if slot == entries.len() {
    entries.push(entry);
  } else {
    entries[slot] = entry;
  }
  *watermark += 1;
  slot
}
