//! Logic for queueing path requests, advancing resumable searches under the
//! per-tick iteration budget and caching finished [TerrainPath]s
//!

use std::collections::BTreeMap;
use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Describes the properties of a path request
#[derive(Clone, Copy, Debug)]
pub struct PathMetadata {
	/// Cell the route starts from
	source_cell: GridCell,
	/// Cell the route ends at
	target_cell: GridCell,
	/// Medium of the unit the route is for
	medium: Medium,
	//? If a game is running for 136 years bad things will start happening here
	/// Marks the request based on time elapsed since app start, used to enable
	/// automatic cleardown of long lived paths that are probably not needed anymore
	time_generated: Duration,
}

// we don't want to compare `time_generated` so manually impl PartialEq
impl PartialEq for PathMetadata {
	fn eq(&self, other: &Self) -> bool {
		self.source_cell == other.source_cell
			&& self.target_cell == other.target_cell
			&& self.medium == other.medium
	}
}
impl Eq for PathMetadata {}

impl Ord for PathMetadata {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		(self.source_cell, self.target_cell, self.medium == Medium::Water).cmp(&(
			other.source_cell,
			other.target_cell,
			other.medium == Medium::Water,
		))
	}
}

impl PartialOrd for PathMetadata {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PathMetadata {
	/// Create a new instance of [PathMetadata]
	pub fn new(
		source_cell: GridCell,
		target_cell: GridCell,
		medium: Medium,
		time_generated: Duration,
	) -> Self {
		PathMetadata {
			source_cell,
			target_cell,
			medium,
			time_generated,
		}
	}
	/// Get the cell the route starts from
	pub fn get_source_cell(&self) -> GridCell {
		self.source_cell
	}
	/// Get the cell the route ends at
	pub fn get_target_cell(&self) -> GridCell {
		self.target_cell
	}
	/// Get the medium of the unit the route is for
	pub fn get_medium(&self) -> Medium {
		self.medium
	}
	/// Get when the request was made
	pub fn get_time_generated(&self) -> Duration {
		self.time_generated
	}
}

/// A request to queue up a path query from one world point to another
#[derive(Event)]
pub struct EventPathRequest {
	/// World `(x, z)` point the route starts from
	from: Vec2,
	/// World `(x, z)` point the route ends at
	to: Vec2,
	/// Medium of the unit asking
	medium: Medium,
}

impl EventPathRequest {
	/// Create a new instance of [EventPathRequest]
	pub fn new(from: Vec2, to: Vec2, medium: Medium) -> Self {
		EventPathRequest { from, to, medium }
	}
	/// World `(x, z)` point the route starts from
	pub fn get_from(&self) -> Vec2 {
		self.from
	}
	/// World `(x, z)` point the route ends at
	pub fn get_to(&self) -> Vec2 {
		self.to
	}
	/// Medium of the unit asking
	pub fn get_medium(&self) -> Medium {
		self.medium
	}
}

/// In-flight resumable [PathSearch] handles, advanced one at a time under the
/// session's [SearchBudget]. One logical caller advances one query at a time
/// so there is no locking of any kind here
#[derive(Component, Default)]
pub struct ActiveSearches(BTreeMap<PathMetadata, PathSearch>);

impl ActiveSearches {
	/// Get a reference to the map of in-flight searches
	pub fn get(&self) -> &BTreeMap<PathMetadata, PathSearch> {
		&self.0
	}
	/// Get a mutable reference to the map of in-flight searches
	pub fn get_mut(&mut self) -> &mut BTreeMap<PathMetadata, PathSearch> {
		&mut self.0
	}
	/// Whether any search is mid-flight
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Each finished [TerrainPath] is placed into this cache so planners can read
/// the same route repeatedly without re-running the search
#[derive(Component, Default)]
pub struct PathCache(BTreeMap<PathMetadata, TerrainPath>);

impl PathCache {
	/// Get a reference to the map of cached paths
	pub fn get(&self) -> &BTreeMap<PathMetadata, TerrainPath> {
		&self.0
	}
	/// Get a mutable reference to the map of cached paths
	pub fn get_mut(&mut self) -> &mut BTreeMap<PathMetadata, TerrainPath> {
		&mut self.0
	}
	/// Get a cached path. Returns [None] if it doesn't exist yet
	pub fn get_path(
		&self,
		source_cell: GridCell,
		target_cell: GridCell,
		medium: Medium,
	) -> Option<&TerrainPath> {
		let metadata = PathMetadata::new(source_cell, target_cell, medium, Duration::default());
		let path = self.0.get(&metadata);
		trace!("Path: {:?}", path);
		path
	}
	/// Insert a finished path into the cache
	pub fn insert_path(&mut self, metadata: PathMetadata, path: TerrainPath) {
		self.0.insert(metadata, path);
	}
	/// Remove a path from the cache
	pub fn remove_path(&mut self, metadata: PathMetadata) {
		self.0.remove(&metadata);
	}
}

/// Iteration budget one session grants its searches per tick - the caller's
/// only throttle, there is no internal timeout
#[derive(Component, Clone, Copy)]
pub struct SearchBudget(usize);

impl Default for SearchBudget {
	fn default() -> Self {
		SearchBudget(250)
	}
}

impl SearchBudget {
	/// Create a new instance of [SearchBudget]
	pub fn new(iterations_per_tick: usize) -> Self {
		SearchBudget(iterations_per_tick)
	}
	/// Iterations granted per tick
	pub fn get(&self) -> usize {
		self.0
	}
}

/// Snap a request's endpoints to usable cells and check they share a region.
/// This is the cheap reject applied before any search budget is spent, so it
/// must agree with [PathSearch::new] on which requests are satisfiable - both
/// snap through the same spiral with the same radius. Returns the snapped
/// cell pair, or [None] when no search could succeed
pub fn resolve_request_endpoints(
	grid: &TerrainGrid,
	labels: &RegionLabels,
	from: Vec2,
	to: Vec2,
	medium: Medium,
	config: &PathSearchConfig,
) -> Option<(GridCell, GridCell)> {
	let from_cell = grid.get_map_pos_from_xz(from)?;
	let to_cell = grid.get_map_pos_from_xz(to)?;
	let source_cell = find_closest_passable(grid, from_cell, medium, config.snap_radius)?;
	let target_cell = find_closest_passable(grid, to_cell, medium, config.snap_radius)?;
	let label = labels.get_label(source_cell);
	if label == 0 || label != labels.get_label(target_cell) {
		return None;
	}
	Some((source_cell, target_cell))
}

/// Process [EventPathRequest] and seed [PathSearch] handles into
/// [ActiveSearches]
#[cfg(not(tarpaulin_include))]
pub fn event_insert_search_queue(
	mut events: EventReader<EventPathRequest>,
	mut query: Query<(
		&TerrainGrid,
		&RegionLabels,
		&mut ActiveSearches,
		&PathCache,
	)>,
	time: Res<Time>,
) {
	for event in events.read() {
		for (grid, labels, mut searches, cache) in query.iter_mut() {
			let config = PathSearchConfig::default();
			// the accessibility index rejects unsatisfiable requests without
			// spending any search budget on them
			let Some((source_cell, target_cell)) = resolve_request_endpoints(
				grid,
				labels,
				event.get_from(),
				event.get_to(),
				event.get_medium(),
				&config,
			) else {
				debug!(
					"No path available between {:?} and {:?}, request dropped",
					event.get_from(),
					event.get_to()
				);
				continue;
			};
			let metadata = PathMetadata::new(
				source_cell,
				target_cell,
				event.get_medium(),
				time.elapsed(),
			);
			// several actors may ask for the same route at once, only seed a
			// fresh request - this is critical to perf
			if cache.get().contains_key(&metadata) || searches.get().contains_key(&metadata) {
				continue;
			}
			if let Some(search) = PathSearch::new(
				grid,
				event.get_from(),
				event.get_to(),
				event.get_medium(),
				config,
			) {
				searches.get_mut().insert(metadata, search);
			}
		}
	}
}

/// Advance the front in-flight search by the session's per-tick budget.
/// Finished searches promote their path into the [PathCache], exhausted ones
/// are dropped, suspended ones stay queued for the next tick
#[cfg(not(tarpaulin_include))]
pub fn advance_active_searches(
	mut query: Query<(
		&TerrainGrid,
		&mut ActiveSearches,
		&mut PathCache,
		&SearchBudget,
	)>,
) {
	for (grid, mut searches, mut cache, budget) in query.iter_mut() {
		if let Some(mut entry) = searches.get_mut().first_entry() {
			match entry.get_mut().advance(grid, budget.get()) {
				SearchProgress::Found(path) => {
					let (metadata, _) = entry.remove_entry();
					cache.insert_path(metadata, path);
				}
				SearchProgress::Exhausted => {
					let (metadata, _) = entry.remove_entry();
					debug!(
						"No path exists between {:?} and {:?}",
						metadata.get_source_cell(),
						metadata.get_target_cell()
					);
				}
				SearchProgress::Suspended => {
					trace!("Search suspended, resuming next tick");
				}
			}
		}
	}
}

/// Purge any cached paths older than 15 minutes
#[cfg(not(tarpaulin_include))]
pub fn cleanup_old_paths(mut query: Query<&mut PathCache>, time: Res<Time>) {
	for mut cache in query.iter_mut() {
		let mut paths_to_purge = Vec::new();
		for metadata in cache.get().keys() {
			let elapsed = time.elapsed();
			let diff = elapsed.saturating_sub(metadata.get_time_generated());
			if diff.as_secs() > 900 {
				paths_to_purge.push(*metadata);
			}
		}
		for purge in paths_to_purge.iter() {
			cache.remove_path(*purge);
		}
	}
}
