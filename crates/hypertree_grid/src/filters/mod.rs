//! Grid algorithms built on the cursors.
//!
//! Every filter walks the non-empty trees in ascending index order, running
//! one recursive pass per tree. An optional abort flag is polled before each
//! tree. Once it is raised the filter stops and returns
//! [`FilterError::Aborted`].
//!
//! Cell fields are slices indexed by global index. They must cover
//! [`HyperTreeGrid::global_index_bound`] values.

pub mod contour;
pub mod feature_edges;
pub mod gradient;
pub mod plane_cutter;

pub use contour::{contour, ContourConfig, ContourOutput};
pub use feature_edges::{feature_edges, FeatureEdgesConfig, FeatureEdgesOutput};
pub use gradient::{gradient, GradientConfig, GradientMode};
pub use plane_cutter::{cut_with_plane, CutPolygon, Plane, PlaneCutOutput, PlaneCutterConfig};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::FilterError;
use crate::grid::HyperTreeGrid;

/// Cooperative abort flag shared with a running filter.
pub type AbortFlag = Arc<AtomicBool>;

#[inline]
pub(crate) fn check_abort(flag: Option<&AbortFlag>) -> Result<(), FilterError> {
  match flag {
    Some(flag) if flag.load(Ordering::Relaxed) => {
      #[cfg(feature = "tracing")]
      tracing::debug!("filter aborted");
      Err(FilterError::Aborted)
    }
    _ => Ok(()),
  }
}

pub(crate) fn check_field(grid: &HyperTreeGrid, field: &[f64]) -> Result<(), FilterError> {
  let required = grid.global_index_bound() as usize;
  if field.len() < required {
    return Err(FilterError::FieldTooShort {
      len: field.len(),
      required,
    });
  }
  Ok(())
}
