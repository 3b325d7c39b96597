//! Terrain accessibility analysis for RTS-style computer players.
//!
//! The game world is discretized into a [grid::TerrainGrid] of fixed-size
//! cells, each holding a [grid::CellCategory] derived from the host engine's
//! obstruction data by the [raster] pass. Two longer-lived structures answer
//! planning queries over it:
//!
//! * [regions::RegionLabels] - a flood-filled accessibility index. Every
//!   cell gets a region ID in one `O(cells)` pass, after which "can X reach
//!   Y" is two array lookups
//! * [search::PathSearch] - an interruptible best-first search that produces
//!   a concrete polyline between two world points, resumable across ticks
//!   under an iteration budget
//!
//! ```text
//!  _________________________________
//! |__|__|__|__|__|xx|__|__|__|__|__|
//! |__|__|__|__|__|xx|__|__|__|__|__|
//! |__|__|__|__|s_|xx|__|__|__|__|__|
//! |__|__|__|__|__|xx|__|__|g_|__|__|
//! |__|__|__|__|__|xx|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|__|
//! ```
//!
//! A route from `s` to `g` detours under the wall; the region labeler knows
//! both sides are one region without running any search at all.
//!
//! Both anchor their queries through the [resolver], which snaps arbitrary
//! world points (possibly inside an obstruction) to the nearest cell a unit
//! can actually stand on.
//!

pub mod grid;
pub mod raster;
pub mod regions;
pub mod resolver;
pub mod search;
pub mod utilities;
