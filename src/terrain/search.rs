//! An incremental, interruptible best-first search over a [TerrainGrid]
//! producing a routable polyline between two world points.
//!
//! A [PathSearch] is a resumable handle: each call to [PathSearch::advance]
//! consumes an iteration budget and either finishes with a [TerrainPath],
//! reports that no path exists, or suspends with all open/closed state
//! preserved so the caller can resume it on a later tick. Full-map searches
//! must never stall the host's per-frame budget so suspension is realised by
//! returning control with saved state, never by blocking.
//!
//! Expansion samples neighbours at a variable stride - wide hops through
//! open terrain to cut iteration counts, single steps near clutter - and
//! every strided hop is validated cell-by-cell along a Bresenham line so a
//! hop can never tunnel through a wall. Switching medium mid-route (a land
//! path entering deep water or a ship path beaching) costs a large one-off
//! penalty, discouraging unnecessary amphibious detours while still allowing
//! them when no single-medium route exists.
//!

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::prelude::*;
use bevy::prelude::*;

/// Tunable knobs of the search. None of the defaults are load-bearing, they
/// are starting points a game balances for its own maps
#[derive(Clone, Copy, Debug)]
pub struct PathSearchConfig {
	/// Neighbour sampling stride used in open unobstructed terrain
	pub open_terrain_stride: usize,
	/// Lower clamp on the sampling stride
	pub min_stride: usize,
	/// One-off cost of switching medium along a route
	pub medium_switch_penalty: i64,
	/// Extra cost per near-obstruction tier of an entered cell
	pub near_obstruction_cost: i64,
	/// A waypoint is emitted every this many cells of the reconstructed chain
	pub waypoint_spacing: usize,
	/// Cost stacked onto a suppressed blocking point when carving distinct
	/// alternate routes
	pub blocking_penalty: i64,
	/// Upper bound on the number of alternate routes carved by
	/// [calculate_distinct_paths]
	pub max_distinct_paths: usize,
	/// Spiral radius cap when snapping endpoints to usable cells
	pub snap_radius: usize,
}

impl Default for PathSearchConfig {
	fn default() -> Self {
		PathSearchConfig {
			open_terrain_stride: 3,
			min_stride: 1,
			medium_switch_penalty: 1000,
			near_obstruction_cost: 3,
			waypoint_spacing: 6,
			blocking_penalty: 100_000,
			max_distinct_paths: 3,
			snap_radius: 16,
		}
	}
}

/// Lifecycle of a [PathSearch]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchState {
	/// Endpoints snapped and the open set seeded, no work done yet
	Initialised,
	/// At least one budgeted call has been made without a terminal outcome
	Searching,
	/// A path was found and reconstructed
	Found,
	/// The open set drained without reaching the goal, no path exists
	Exhausted,
}

/// Outcome of one budgeted call to [PathSearch::advance]. `Suspended` and
/// `Exhausted` are deliberately distinct - callers must not conflate "try
/// again next tick" with "no path exists"
#[derive(Clone, PartialEq, Debug)]
pub enum SearchProgress {
	/// The goal was reached, the route is ready
	Found(TerrainPath),
	/// Budget ran out first, resume later with another call
	Suspended,
	/// The open set drained, there is no path
	Exhausted,
}

/// An ordered sequence of world-space waypoints from start to goal. Waypoints
/// are sparse - one every few grid steps - to bound memory and smooth the
/// route
#[derive(Clone, PartialEq, Debug)]
pub struct TerrainPath {
	/// World `(x, z)` waypoints ordered start to goal
	waypoints: Vec<Vec2>,
	/// Whether following the route requires crossing into a foreign medium,
	/// e.g. a land column needing naval transport
	requires_water_crossing: bool,
}

impl TerrainPath {
	/// World `(x, z)` waypoints ordered start to goal
	pub fn get_waypoints(&self) -> &Vec<Vec2> {
		&self.waypoints
	}
	/// Whether following the route requires crossing into a foreign medium
	pub fn requires_water_crossing(&self) -> bool {
		self.requires_water_crossing
	}
}

/// Transient per-cell search state, allocated fresh per query and discarded
/// on completion
#[derive(Clone, Copy)]
struct NodeRecord {
	/// Cumulative cost of the best route found to this cell so far
	g_cost: i64,
	/// Flat index of the previous cell on that route
	parent: usize,
	/// Whether the cell has been expanded, expanded cells are final
	closed: bool,
	/// Whether the route to this cell has already paid the medium switch
	crossed_water: bool,
}

/// Sentinel parent of the start cell
const NO_PARENT: usize = usize::MAX;

impl Default for NodeRecord {
	fn default() -> Self {
		NodeRecord {
			g_cost: i64::MAX,
			parent: NO_PARENT,
			closed: false,
			crossed_water: false,
		}
	}
}

/// Open set entry ordered by lowest f-cost with ties broken by insertion
/// order for determinism
#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
	/// `g + heuristic` of the cell when pushed
	f_cost: i64,
	/// Monotonic push counter, FIFO tie break
	sequence: u64,
	/// Flat index of the cell
	index: usize,
}

impl Ord for OpenEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		// reversed so the std max-heap pops the lowest f-cost first
		other
			.f_cost
			.cmp(&self.f_cost)
			.then(other.sequence.cmp(&self.sequence))
	}
}

impl PartialOrd for OpenEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// A resumable path query between two world points. Holds all open/closed
/// state across budgeted invocations; the grid it was created against must
/// not be rebuilt while the handle is live (dimensions are asserted on every
/// call), abandoning the query is simply dropping the handle
pub struct PathSearch {
	/// Column count of the grid searched, asserted against on every call
	width: usize,
	/// Row count of the grid searched, asserted against on every call
	height: usize,
	/// Snapped start cell
	start: GridCell,
	/// Snapped goal cell
	goal: GridCell,
	/// Medium of the unit the route is for
	medium: Medium,
	/// Lifecycle state
	state: SearchState,
	/// Open set, lowest f-cost first
	open: BinaryHeap<OpenEntry>,
	/// Per-cell search records
	nodes: Vec<NodeRecord>,
	/// Monotonic push counter feeding [OpenEntry::sequence]
	sequence: u64,
	/// Permanent penalty overlay used to carve distinct alternate routes,
	/// survives [PathSearch::reset]
	penalties: HashMap<usize, i64>,
	/// Tunable knobs
	config: PathSearchConfig,
	/// The reconstructed path once found, so repeat calls stay cheap
	found: Option<TerrainPath>,
}

impl PathSearch {
	/// Create a new instance of [PathSearch] between two world points,
	/// snapping both endpoints to the nearest usable cell for the medium.
	/// Returns [None] when either endpoint cannot be resolved - callers must
	/// treat that as "give up on this destination"
	pub fn new(
		grid: &TerrainGrid,
		from: Vec2,
		to: Vec2,
		medium: Medium,
		config: PathSearchConfig,
	) -> Option<Self> {
		let from_cell = grid.get_map_pos_from_xz(from)?;
		let to_cell = grid.get_map_pos_from_xz(to)?;
		let start = find_closest_passable(grid, from_cell, medium, config.snap_radius)?;
		let goal = find_closest_passable(grid, to_cell, medium, config.snap_radius)?;
		let mut search = PathSearch {
			width: grid.get_width(),
			height: grid.get_height(),
			start,
			goal,
			medium,
			state: SearchState::Initialised,
			open: BinaryHeap::new(),
			nodes: vec![NodeRecord::default(); grid.get_width() * grid.get_height()],
			sequence: 0,
			penalties: HashMap::new(),
			config,
			found: None,
		};
		search.seed();
		Some(search)
	}
	/// Lifecycle state of the query
	pub fn get_state(&self) -> SearchState {
		self.state
	}
	/// The start cell the query was snapped to
	pub fn get_start(&self) -> GridCell {
		self.start
	}
	/// The goal cell the query was snapped to
	pub fn get_goal(&self) -> GridCell {
		self.goal
	}
	/// Push the start cell into the open set at g-cost zero
	fn seed(&mut self) {
		let index = self.index_of(self.start);
		self.nodes[index].g_cost = 0;
		self.nodes[index].parent = NO_PARENT;
		let f_cost = self.heuristic(self.start);
		self.push_open(f_cost, index);
	}
	/// Flat index of a cell within the search arrays
	fn index_of(&self, cell: GridCell) -> usize {
		cell.get_column() + cell.get_row() * self.width
	}
	/// Cell of a flat index within the search arrays
	fn cell_of(&self, index: usize) -> GridCell {
		GridCell::new(index % self.width, index / self.width)
	}
	/// Octile distance to the goal, admissible for 10/14 step costs
	fn heuristic(&self, cell: GridCell) -> i64 {
		let d_col = (cell.get_column() as i64 - self.goal.get_column() as i64).abs();
		let d_row = (cell.get_row() as i64 - self.goal.get_row() as i64).abs();
		let shorter = d_col.min(d_row);
		let longer = d_col.max(d_row);
		DIAGONAL_STEP_COST * shorter + ORTHOGONAL_STEP_COST * (longer - shorter)
	}
	/// Push a cell into the open set preserving FIFO tie order
	fn push_open(&mut self, f_cost: i64, index: usize) {
		self.open.push(OpenEntry {
			f_cost,
			sequence: self.sequence,
			index,
		});
		self.sequence += 1;
	}
	/// Pop the best open cell, skipping entries staled by a cheaper re-push
	fn pop_open(&mut self) -> Option<usize> {
		while let Some(entry) = self.open.pop() {
			if !self.nodes[entry.index].closed {
				return Some(entry.index);
			}
		}
		None
	}
	/// Run the search for up to `budget` expansions. Returns
	/// [SearchProgress::Suspended] when the budget drains first - call again
	/// on a later tick to resume exactly where this left off
	pub fn advance(&mut self, grid: &TerrainGrid, budget: usize) -> SearchProgress {
		assert_eq!(
			(self.width, self.height),
			(grid.get_width(), grid.get_height()),
			"TerrainGrid was rebuilt with different dimensions while a PathSearch held a resumable reference to it"
		);
		match self.state {
			SearchState::Found => {
				return SearchProgress::Found(
					self.found.clone().expect("Found state always stores a path"),
				)
			}
			SearchState::Exhausted => return SearchProgress::Exhausted,
			_ => self.state = SearchState::Searching,
		}
		let goal_index = self.index_of(self.goal);
		for _ in 0..budget {
			let Some(current) = self.pop_open() else {
				self.state = SearchState::Exhausted;
				return SearchProgress::Exhausted;
			};
			self.nodes[current].closed = true;
			if current == goal_index {
				let path = self.reconstruct(grid);
				self.found = Some(path.clone());
				self.state = SearchState::Found;
				return SearchProgress::Found(path);
			}
			self.expand(grid, current);
		}
		SearchProgress::Suspended
	}
	/// Sampling stride for expanding from a cell: single steps anywhere near
	/// clutter, wider hops across open terrain, never overstepping the goal
	fn stride_at(&self, grid: &TerrainGrid, cell: GridCell) -> usize {
		let stride = match grid.get_cell_value(cell) {
			CellCategory::Land | CellCategory::DeepWater => self.config.open_terrain_stride,
			_ => self.config.min_stride,
		};
		let stride = stride.max(self.config.min_stride).max(1);
		let d_col = (cell.get_column() as i64 - self.goal.get_column() as i64).abs();
		let d_row = (cell.get_row() as i64 - self.goal.get_row() as i64).abs();
		if d_col.max(d_row) <= stride as i64 {
			self.config.min_stride.max(1)
		} else {
			stride
		}
	}
	/// Expand the up-to-8 strided neighbours of a cell, pushing any neighbour
	/// reached at an improved cost
	fn expand(&mut self, grid: &TerrainGrid, current: usize) {
		let current_cell = self.cell_of(current);
		let stride = self.stride_at(grid, current_cell) as i64;
		for ordinal in Ordinal::ALL.iter() {
			let (d_col, d_row) = ordinal.get_offset();
			let target_col = current_cell.get_column() as i64 + d_col * stride;
			let target_row = current_cell.get_row() as i64 + d_row * stride;
			if target_col < 0
				|| target_row < 0
				|| target_col >= self.width as i64
				|| target_row >= self.height as i64
			{
				continue;
			}
			let target_cell = GridCell::new(target_col as usize, target_row as usize);
			let target = self.index_of(target_cell);
			if self.nodes[target].closed {
				continue;
			}
			// every cell along the hop must be navigable, costs accumulate
			// per entered cell so strided hops pay the same as single steps
			let Some((hop_cost, crossed_water)) =
				self.walk_hop(grid, current_cell, target_cell, self.nodes[current].crossed_water)
			else {
				continue;
			};
			let tentative = self.nodes[current].g_cost.saturating_add(hop_cost);
			if tentative < self.nodes[target].g_cost {
				self.nodes[target].g_cost = tentative;
				self.nodes[target].parent = current;
				self.nodes[target].crossed_water = crossed_water;
				let f_cost = tentative.saturating_add(self.heuristic(target_cell));
				self.push_open(f_cost, target);
			}
		}
	}
	/// Walk the Bresenham chain of a hop accumulating step costs, obstruction
	/// surcharges, the one-off medium switch penalty and any blocking-point
	/// penalties. Returns [None] if the hop would pass through a
	/// non-navigable cell
	fn walk_hop(
		&self,
		grid: &TerrainGrid,
		from: GridCell,
		to: GridCell,
		mut crossed_water: bool,
	) -> Option<(i64, bool)> {
		let chain = from.get_cells_between_points(&to);
		let mut cost = 0i64;
		let mut previous = chain[0];
		for cell in chain.iter().skip(1) {
			let category = grid.get_cell_value(*cell);
			if !category.is_navigable() {
				return None;
			}
			let diagonal = cell.get_column() != previous.get_column()
				&& cell.get_row() != previous.get_row();
			cost += if diagonal {
				DIAGONAL_STEP_COST
			} else {
				ORTHOGONAL_STEP_COST
			};
			cost += category.get_near_obstruction_tier() as i64 * self.config.near_obstruction_cost;
			// first step into a foreign medium pays the switch penalty, after
			// that the route is committed to requiring it
			if !category.is_passable(self.medium) && !crossed_water {
				cost += self.config.medium_switch_penalty;
				crossed_water = true;
			}
			if let Some(penalty) = self.penalties.get(&self.index_of(*cell)) {
				cost += penalty;
			}
			previous = *cell;
		}
		Some((cost, crossed_water))
	}
	/// Walk parent pointers from the goal expanding every strided hop into
	/// its full cell chain, then emit sparse world-space waypoints in
	/// start-to-goal order
	fn reconstruct(&self, grid: &TerrainGrid) -> TerrainPath {
		let goal_index = self.index_of(self.goal);
		let mut cells = vec![self.goal];
		let mut current = goal_index;
		while self.nodes[current].parent != NO_PARENT {
			let parent = self.nodes[current].parent;
			let segment = self
				.cell_of(current)
				.get_cells_between_points(&self.cell_of(parent));
			for cell in segment.iter().skip(1) {
				cells.push(*cell);
			}
			current = parent;
		}
		cells.reverse();
		let spacing = self.config.waypoint_spacing.max(1);
		let mut waypoints = Vec::new();
		for (i, cell) in cells.iter().enumerate() {
			if i % spacing == 0 || i == cells.len() - 1 {
				if let Some(position) = grid.get_xz_from_map_pos(*cell) {
					waypoints.push(position);
				}
			}
		}
		TerrainPath {
			waypoints,
			requires_water_crossing: self.nodes[goal_index].crossed_water,
		}
	}
	/// Permanently penalize a blocking point so re-running the search carves
	/// a route that avoids it
	pub fn suppress_route_point(&mut self, cell: GridCell) {
		if cell.get_column() >= self.width || cell.get_row() >= self.height {
			return;
		}
		let index = self.index_of(cell);
		*self.penalties.entry(index).or_insert(0) += self.config.blocking_penalty;
	}
	/// Discard all open/closed state and reseed the start, keeping the
	/// penalty overlay so suppressed blocking points stay suppressed
	pub fn reset(&mut self) {
		self.nodes = vec![NodeRecord::default(); self.width * self.height];
		self.open.clear();
		self.sequence = 0;
		self.found = None;
		self.state = SearchState::Initialised;
		self.seed();
	}
}

/// Find up to `max_distinct_paths` non-overlapping routes between the same
/// two points for flanking or multi-column movement: after each find a
/// blocking point sampled midway along the route is permanently penalized and
/// the search re-run, until no further distinct route exists or the count
/// limit is hit
pub fn calculate_distinct_paths(
	grid: &TerrainGrid,
	from: Vec2,
	to: Vec2,
	medium: Medium,
	config: PathSearchConfig,
) -> Vec<TerrainPath> {
	let Some(mut search) = PathSearch::new(grid, from, to, medium, config) else {
		return Vec::new();
	};
	// each expansion closes a cell so this budget always runs to a terminal
	// outcome
	let exhaustive_budget = grid.get_width() * grid.get_height();
	let mut paths: Vec<TerrainPath> = Vec::new();
	while paths.len() < config.max_distinct_paths {
		match search.advance(grid, exhaustive_budget) {
			SearchProgress::Found(path) => {
				if paths.contains(&path) {
					break;
				}
				let blocking_point = path.get_waypoints()[path.get_waypoints().len() / 2];
				paths.push(path);
				let Some(blocking_cell) = grid.get_map_pos_from_xz(blocking_point) else {
					break;
				};
				search.suppress_route_point(blocking_cell);
				search.reset();
			}
			SearchProgress::Exhausted => break,
			SearchProgress::Suspended => continue,
		}
	}
	paths
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// 10x10 all land grid with an impassable vertical wall at column 5,
	/// rows 0-8, leaving row 9 open unless `block_gap`
	fn walled_grid(block_gap: bool) -> TerrainGrid {
		let mut grid = TerrainGrid::new(10, 10, 1.0);
		let last_row = if block_gap { 9 } else { 8 };
		for row in 0..=last_row {
			grid.set_cell_value(CellCategory::Impassable, GridCell::new(5, row));
		}
		grid
	}
	/// Config with single stepping and dense waypoints so tests can inspect
	/// the full cell chain
	fn dense_config() -> PathSearchConfig {
		PathSearchConfig {
			open_terrain_stride: 1,
			waypoint_spacing: 1,
			..Default::default()
		}
	}
	#[test]
	fn detours_through_the_gap() {
		let grid = walled_grid(false);
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 9.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let SearchProgress::Found(path) = search.advance(&grid, 1000) else {
			panic!("expected a path through the gap at row 9");
		};
		assert_eq!(SearchState::Found, search.get_state());
		assert!(!path.requires_water_crossing());
		// the route must pass through the open row to cross the wall
		let crosses_gap = path
			.get_waypoints()
			.iter()
			.any(|w| grid.get_map_pos_from_xz(*w).unwrap() == GridCell::new(5, 9));
		assert!(crosses_gap);
	}
	#[test]
	fn blocked_wall_exhausts() {
		let grid = walled_grid(true);
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 0.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let result = search.advance(&grid, 10_000);
		assert_eq!(SearchProgress::Exhausted, result);
		assert_eq!(SearchState::Exhausted, search.get_state());
		// repeat calls stay terminal
		assert_eq!(SearchProgress::Exhausted, search.advance(&grid, 10));
	}
	#[test]
	fn path_cells_are_connected_and_passable() {
		let grid = walled_grid(false);
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 0.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let SearchProgress::Found(path) = search.advance(&grid, 1000) else {
			panic!("expected a path");
		};
		// with spacing 1 the waypoints are the full cell chain
		let cells: Vec<GridCell> = path
			.get_waypoints()
			.iter()
			.map(|w| grid.get_map_pos_from_xz(*w).unwrap())
			.collect();
		for pair in cells.windows(2) {
			let d_col = (pair[0].get_column() as i64 - pair[1].get_column() as i64).abs();
			let d_row = (pair[0].get_row() as i64 - pair[1].get_row() as i64).abs();
			assert!(d_col <= 1 && d_row <= 1, "waypoints {:?} are not adjacent", pair);
			assert!(grid.get_cell_value(pair[0]).is_navigable());
			assert!(grid.get_cell_value(pair[1]).is_navigable());
		}
	}
	#[test]
	fn resumed_search_matches_single_run() {
		let grid = walled_grid(false);
		let from = Vec2::new(0.5, 0.5);
		let to = Vec2::new(9.5, 9.5);
		let mut single = PathSearch::new(&grid, from, to, Medium::Land, dense_config()).unwrap();
		let SearchProgress::Found(single_path) = single.advance(&grid, 10_000) else {
			panic!("expected a path");
		};
		let mut resumed = PathSearch::new(&grid, from, to, Medium::Land, dense_config()).unwrap();
		let mut outcome = SearchProgress::Suspended;
		let mut calls = 0;
		while outcome == SearchProgress::Suspended {
			outcome = resumed.advance(&grid, 7);
			calls += 1;
			assert!(calls < 10_000, "resumable search failed to terminate");
		}
		assert!(calls > 1, "budget of 7 should have forced suspensions");
		let SearchProgress::Found(resumed_path) = outcome else {
			panic!("expected the resumed search to find the same outcome");
		};
		assert_eq!(single_path, resumed_path);
	}
	#[test]
	fn suspended_is_not_exhausted() {
		let grid = walled_grid(false);
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 9.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		assert_eq!(SearchProgress::Suspended, search.advance(&grid, 1));
		assert_eq!(SearchState::Searching, search.get_state());
	}
	#[test]
	fn prefers_ford_over_deep_water() {
		//  _____________________
		// |__|__|__|D_|__|__|__|
		// |__|__|__|D_|__|__|__| a river of deep water splitting the map,
		// |__|__|__|D_|__|__|__| with a shallow ford at row 5
		// |__|__|__|D_|__|__|__|
		// |__|__|__|D_|__|__|__|
		// |__|__|__|S_|__|__|__|
		let mut grid = TerrainGrid::new(7, 6, 1.0);
		for row in 0..5 {
			grid.set_cell_value(CellCategory::DeepWater, GridCell::new(3, row));
		}
		grid.set_cell_value(CellCategory::ShallowWater, GridCell::new(3, 5));
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(6.5, 0.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let SearchProgress::Found(path) = search.advance(&grid, 1000) else {
			panic!("expected a path over the ford");
		};
		// wading the ford avoids the medium switch entirely
		assert!(!path.requires_water_crossing());
		let fords = path
			.get_waypoints()
			.iter()
			.any(|w| grid.get_map_pos_from_xz(*w).unwrap() == GridCell::new(3, 5));
		assert!(fords);
	}
	#[test]
	fn crosses_deep_water_when_no_land_route_exists() {
		// the river has no ford at all
		let mut grid = TerrainGrid::new(7, 6, 1.0);
		for row in 0..6 {
			grid.set_cell_value(CellCategory::DeepWater, GridCell::new(3, row));
		}
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(6.5, 0.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let SearchProgress::Found(path) = search.advance(&grid, 1000) else {
			panic!("expected an amphibious path");
		};
		assert!(path.requires_water_crossing());
	}
	#[test]
	fn strided_hops_never_tunnel_walls() {
		// wide stride across a map with a thin wall, the hop validation must
		// force the same detour a single-step search takes
		let grid = walled_grid(true);
		let config = PathSearchConfig {
			open_terrain_stride: 4,
			waypoint_spacing: 1,
			..Default::default()
		};
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 0.5),
			Medium::Land,
			config,
		)
		.unwrap();
		assert_eq!(SearchProgress::Exhausted, search.advance(&grid, 10_000));
	}
	#[test]
	fn distinct_paths_diverge() {
		//  _____________________
		// |__|__|x_|__|__| two corridors around a central block
		// |__|__|x_|__|__|
		// |__|__|__|__|__|
		let mut grid = TerrainGrid::new(9, 9, 1.0);
		for row in 3..6 {
			for col in 3..6 {
				grid.set_cell_value(CellCategory::Impassable, GridCell::new(col, row));
			}
		}
		let config = PathSearchConfig {
			open_terrain_stride: 1,
			waypoint_spacing: 2,
			max_distinct_paths: 2,
			..Default::default()
		};
		let paths =
			calculate_distinct_paths(&grid, Vec2::new(0.5, 4.5), Vec2::new(8.5, 4.5), Medium::Land, config);
		assert_eq!(2, paths.len());
		assert_ne!(paths[0], paths[1]);
	}
	#[test]
	fn unresolvable_endpoint_gives_no_search() {
		let mut grid = TerrainGrid::new(6, 6, 1.0);
		for row in 0..6 {
			for col in 0..6 {
				grid.set_cell_value(CellCategory::Impassable, GridCell::new(col, row));
			}
		}
		let search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(5.5, 5.5),
			Medium::Land,
			PathSearchConfig {
				snap_radius: 2,
				..Default::default()
			},
		);
		assert!(search.is_none());
	}
	#[test]
	#[should_panic]
	fn rebuilt_grid_dimension_mismatch_fails_loudly() {
		let grid = walled_grid(false);
		let mut search = PathSearch::new(
			&grid,
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 9.5),
			Medium::Land,
			dense_config(),
		)
		.unwrap();
		let rebuilt = TerrainGrid::new(12, 12, 1.0);
		search.advance(&rebuilt, 10);
	}
}
