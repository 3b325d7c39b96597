//! Logic for applying host obstruction create/destroy events to a
//! [TerrainGrid] and relabeling [RegionLabels] once the grid has settled
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Whether an obstruction entered or left the world
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObstructionEventKind {
	/// The entity now obstructs the grid
	Created,
	/// The entity no longer obstructs the grid
	Destroyed,
}

/// Host announcement that an obstructing entity was created or destroyed.
/// Only the cells touched by the entity's footprint are rewritten - the grid
/// is never rebuilt wholesale mid-session
#[derive(Event)]
pub struct EventObstructionUpdate {
	/// The entity whose footprint changed
	entity: ObstructionEntity,
	/// Whether the entity entered or left the world
	kind: ObstructionEventKind,
}

impl EventObstructionUpdate {
	/// Create a new instance of [EventObstructionUpdate]
	pub fn new(entity: ObstructionEntity, kind: ObstructionEventKind) -> Self {
		EventObstructionUpdate { entity, kind }
	}
	/// The entity whose footprint changed
	pub fn get_entity(&self) -> &ObstructionEntity {
		&self.entity
	}
	/// Whether the entity entered or left the world
	pub fn get_kind(&self) -> ObstructionEventKind {
		self.kind
	}
}

/// Read [EventObstructionUpdate] and patch the touched footprint cells of the
/// [TerrainGrid], flagging the [RegionLabels] as stale for relabeling
#[cfg(not(tarpaulin_include))]
pub fn process_obstruction_updates(
	mut events: EventReader<EventObstructionUpdate>,
	mut query: Query<(&mut TerrainGrid, &PassabilitySnapshot, &mut RegionLabels)>,
) {
	for event in events.read() {
		for (mut grid, snapshot, mut labels) in query.iter_mut() {
			match event.get_kind() {
				ObstructionEventKind::Created => grid.stamp_obstruction(event.get_entity()),
				ObstructionEventKind::Destroyed => {
					grid.clear_obstruction(snapshot, event.get_entity())
				}
			}
			debug!("Applied {:?} obstruction update", event.get_kind());
			labels.mark_stale();
		}
	}
}

/// Rebuild stale [RegionLabels] from the grid. Deferred while any search is
/// mid-flight - rebuilds happen only between completed or abandoned queries,
/// never under a live resumable handle
#[cfg(not(tarpaulin_include))]
pub fn relabel_regions(mut query: Query<(&TerrainGrid, &mut RegionLabels, &ActiveSearches)>) {
	for (grid, mut labels, searches) in query.iter_mut() {
		if labels.is_stale() && searches.is_empty() {
			trace!("Relabeling regions");
			*labels = RegionLabels::new(grid);
		}
	}
}
