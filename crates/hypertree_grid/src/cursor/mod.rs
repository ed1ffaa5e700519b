//! Geometry cursors over a single tree.
//!
//! | Cursor | Entries | Moves |
//! |--------|---------|-------|
//! | [`OrientedGeometryCursor`] | one [`LevelEntry`](crate::entry::LevelEntry) | `to_child`, `to_root` |
//! | [`NonOrientedGeometryCursor`] | stack of level entries | `to_child`, `to_parent`, `to_root` |
//! | [`UnlimitedGeometryCursor`] | stack of unlimited entries | same, past the real depth |
//!
//! Cursors borrow the grid. A non-oriented cursor over `&mut HyperTreeGrid`
//! also builds trees: it creates roots, subdivides leaves and assigns global
//! indices.

mod non_oriented;
mod oriented;
mod unlimited;

pub use non_oriented::NonOrientedGeometryCursor;
pub use oriented::OrientedGeometryCursor;
pub use unlimited::UnlimitedGeometryCursor;
