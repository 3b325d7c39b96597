//! Defines the Bevy [Plugin] for terrain analysis
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod grid_layer;
pub mod path_layer;

/// Ensures cache tidying runs before any fresh calculation each tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Purge stale cached paths
	Tidy,
	/// Apply obstruction updates, relabel regions and advance searches
	Calculate,
}

/// Adds the terrain analysis systems and events to an [App]. Sessions are
/// spawned as [TerrainAnalysisBundle]s, one per computer-player analysis -
/// there is no process-wide shared state
pub struct TerrainAnalysisPlugin;

impl Plugin for TerrainAnalysisPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<GridCell>()
			.register_type::<CellCategory>()
			.register_type::<Medium>()
			.register_type::<ObstructionSource>()
			.add_event::<grid_layer::EventObstructionUpdate>()
			.add_event::<path_layer::EventPathRequest>()
			.configure_sets(Update, (OrderingSet::Tidy, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					path_layer::cleanup_old_paths.in_set(OrderingSet::Tidy),
					(
						grid_layer::process_obstruction_updates,
						grid_layer::relabel_regions,
						path_layer::event_insert_search_queue,
						path_layer::advance_active_searches,
					)
						.chain()
						.in_set(OrderingSet::Calculate),
				),
			);
	}
}
