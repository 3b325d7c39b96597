//! Groups the components of one analysis session so it can be spawned as a
//! single entity. Each session owns its own snapshot, grid, label map and
//! caches - there are no hidden process-wide singletons
//!

use crate::prelude::*;
use bevy::prelude::*;

/// All the state one terrain analysis session needs. Spawn one per computer
/// player (or per shared analysis if players pool their view of the map)
#[derive(Bundle)]
pub struct TerrainAnalysisBundle {
	/// The host passability bitmap the session was built from, kept so
	/// destroy events can restore base cell categories
	snapshot: PassabilitySnapshot,
	/// Navigability model rasterized from the snapshot and entity list
	grid: TerrainGrid,
	/// Accessibility index over the grid
	labels: RegionLabels,
	/// In-flight resumable searches
	active_searches: ActiveSearches,
	/// Finished routes planners can read
	path_cache: PathCache,
	/// Per-tick iteration throttle for search work
	budget: SearchBudget,
}

impl TerrainAnalysisBundle {
	/// Create a new instance of [TerrainAnalysisBundle] by rasterizing a host
	/// snapshot and entity list and labeling the result
	pub fn new(snapshot: PassabilitySnapshot, entities: &[ObstructionEntity]) -> Self {
		let grid = TerrainGrid::from_snapshot(&snapshot, entities);
		let labels = RegionLabels::new(&grid);
		TerrainAnalysisBundle {
			snapshot,
			grid,
			labels,
			active_searches: ActiveSearches::default(),
			path_cache: PathCache::default(),
			budget: SearchBudget::default(),
		}
	}
	/// Create a new instance of [TerrainAnalysisBundle] where the
	/// [PassabilitySnapshot] is derived from disk
	#[cfg(feature = "ron")]
	pub fn new_from_disk(path: &str, entities: &[ObstructionEntity]) -> Self {
		let snapshot = PassabilitySnapshot::from_ron(path.to_string());
		Self::new(snapshot, entities)
	}
	/// Override the default per-tick search budget
	pub fn with_budget(mut self, iterations_per_tick: usize) -> Self {
		self.budget = SearchBudget::new(iterations_per_tick);
		self
	}
}
