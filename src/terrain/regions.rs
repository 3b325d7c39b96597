//! Labels every cell of a [TerrainGrid] with a region ID such that two cells
//! share an ID iff they are mutually reachable through cells of compatible
//! medium via a 4-connected flood fill. After the one-off `O(cells)` labeling
//! pass "can X reach Y" queries are a pair of array lookups.
//!
//! Impassable cells are flooded into their own separately-labeled partitions
//! so every cell carries some well-defined ID - querying a point inside a
//! cliff yields the cliff's region, conceptually "unreachable", rather than
//! garbage.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// The medium compatibility a flood fill is locked to, fixed by its seed cell
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FillClass {
	/// Flood through cells a land unit can occupy
	Land,
	/// Flood through cells a ship can occupy
	Water,
	/// Flood through blocked cells so they too get labeled
	Impassable,
}

impl FillClass {
	/// The class a fill seeded at a cell of this category locks to. Shallow
	/// water is passable for both mediums and seeds as a land fill
	fn of_seed(category: CellCategory) -> FillClass {
		if !category.is_navigable() {
			FillClass::Impassable
		} else if category.is_passable(Medium::Land) {
			FillClass::Land
		} else {
			FillClass::Water
		}
	}
	/// Whether a fill of this class may spread into a cell of this category
	fn admits(&self, category: CellCategory) -> bool {
		match self {
			FillClass::Land => category.is_passable(Medium::Land),
			FillClass::Water => category.is_passable(Medium::Water),
			FillClass::Impassable => !category.is_navigable(),
		}
	}
}

/// Region ID per cell of a [TerrainGrid], plus cell counts per region.
/// Region `0` means unprocessed and is never assigned
#[derive(Component, Clone)]
pub struct RegionLabels {
	/// Number of cell columns, matches the grid labeled
	width: usize,
	/// Number of cell rows, matches the grid labeled
	height: usize,
	/// Region ID per cell, row-major `column + row * width`
	labels: Vec<u32>,
	/// Cell count per region ID, populated monotonically during labeling and
	/// never shrunk
	region_sizes: Vec<usize>,
	/// Set when obstruction updates have touched the grid since labeling
	stale: bool,
}

impl RegionLabels {
	/// Label every cell of the grid. Iterates cells in index order and runs
	/// an iterative vertical span fill from each unlabeled cell, so stack
	/// usage stays bounded on large grids
	pub fn new(grid: &TerrainGrid) -> Self {
		let width = grid.get_width();
		let height = grid.get_height();
		let index_of = |column: usize, row: usize| column + row * width;
		let mut labels = vec![0u32; width * height];
		// region 0 is invalid so sizes are indexed directly by ID
		let mut region_sizes = vec![0usize];
		let mut next_region = 1u32;
		for seed_index in 0..width * height {
			if labels[seed_index] != 0 {
				continue;
			}
			let seed_cell = grid.cell_of(seed_index);
			let class = FillClass::of_seed(grid.get_cell_value(seed_cell));
			let mut count = 0usize;
			let mut seeds = vec![(seed_cell.get_column(), seed_cell.get_row())];
			while let Some((column, row)) = seeds.pop() {
				if labels[index_of(column, row)] != 0
					|| !class.admits(grid.get_cell_value(GridCell::new(column, row)))
				{
					continue;
				}
				// rewind to the top of this vertical run
				let mut top = row;
				while top > 0
					&& labels[index_of(column, top - 1)] == 0
					&& class.admits(grid.get_cell_value(GridCell::new(column, top - 1)))
				{
					top -= 1;
				}
				// fill the run downwards, seeding the adjacent columns only at
				// the boundary of each adjacent fillable run
				let mut left_open = false;
				let mut right_open = false;
				let mut current = top;
				while current < height
					&& labels[index_of(column, current)] == 0
					&& class.admits(grid.get_cell_value(GridCell::new(column, current)))
				{
					labels[index_of(column, current)] = next_region;
					count += 1;
					if column > 0 {
						let fillable = labels[index_of(column - 1, current)] == 0
							&& class.admits(grid.get_cell_value(GridCell::new(column - 1, current)));
						if fillable && !left_open {
							seeds.push((column - 1, current));
						}
						left_open = fillable;
					}
					if column < width - 1 {
						let fillable = labels[index_of(column + 1, current)] == 0
							&& class.admits(grid.get_cell_value(GridCell::new(column + 1, current)));
						if fillable && !right_open {
							seeds.push((column + 1, current));
						}
						right_open = fillable;
					}
					current += 1;
				}
			}
			region_sizes.push(count);
			next_region += 1;
		}
		RegionLabels {
			width,
			height,
			labels,
			region_sizes,
			stale: false,
		}
	}
	/// Number of regions assigned, excluding the invalid region `0`
	pub fn get_region_count(&self) -> usize {
		self.region_sizes.len() - 1
	}
	/// Retrieve the region ID of a cell
	pub fn get_label(&self, cell: GridCell) -> u32 {
		if cell.get_column() >= self.width || cell.get_row() >= self.height {
			panic!(
				"Cannot get a RegionLabels value, index out of bounds. Asked for column {}, row {}, label map is {} columns by {} rows",
				cell.get_column(), cell.get_row(), self.width, self.height
			);
		}
		self.labels[cell.get_column() + cell.get_row() * self.width]
	}
	/// Cell count of a region by ID, `0` for the invalid region
	pub fn get_region_size_from_label(&self, label: u32) -> usize {
		self.region_sizes.get(label as usize).copied().unwrap_or(0)
	}
	/// Region ID of the cell a world position falls in, `0` when the position
	/// is outside the world
	pub fn get_access_value(&self, grid: &TerrainGrid, position: Vec2) -> u32 {
		self.assert_dimensions(grid);
		match grid.get_map_pos_from_xz(position) {
			Some(cell) => self.get_label(cell),
			None => 0,
		}
	}
	/// Cell count of the region a world position falls in, `0` when the
	/// position is outside the world. Callers use this to discard pockets too
	/// small to matter
	pub fn get_region_size(&self, grid: &TerrainGrid, position: Vec2) -> usize {
		self.get_region_size_from_label(self.get_access_value(grid, position))
	}
	/// Whether two world points are mutually reachable. In `strict` mode the
	/// endpoint must additionally clear the local connectivity score so that
	/// nominally-labeled single-cell pockets are rejected
	pub fn path_available(&self, grid: &TerrainGrid, start: Vec2, end: Vec2, strict: bool) -> bool {
		self.assert_dimensions(grid);
		let (Some(start_cell), Some(end_cell)) =
			(grid.get_map_pos_from_xz(start), grid.get_map_pos_from_xz(end))
		else {
			return false;
		};
		let start_category = grid.get_cell_value(start_cell);
		let end_category = grid.get_cell_value(end_cell);
		// points inside the impassable partition are unreachable even from
		// each other
		if !start_category.is_navigable() || !end_category.is_navigable() {
			return false;
		}
		let start_label = self.get_label(start_cell);
		if start_label == 0 || start_label != self.get_label(end_cell) {
			return false;
		}
		if strict {
			let medium = if end_category.is_passable(Medium::Land) {
				Medium::Land
			} else {
				Medium::Water
			};
			if connectivity_score(grid, end_cell, medium) < CONNECTIVITY_THRESHOLD {
				return false;
			}
		}
		true
	}
	/// Flag the labels as out of date with respect to the grid
	pub fn mark_stale(&mut self) {
		self.stale = true;
	}
	/// Whether obstruction updates have touched the grid since labeling
	pub fn is_stale(&self) -> bool {
		self.stale
	}
	/// Reused label maps must match the grid they are queried against,
	/// anything else silently corrupts indices so fail loudly
	fn assert_dimensions(&self, grid: &TerrainGrid) {
		assert_eq!(
			(self.width, self.height),
			(grid.get_width(), grid.get_height()),
			"RegionLabels dimensions do not match the TerrainGrid being queried"
		);
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// 10x10 all land grid with an impassable vertical wall at column 5,
	/// rows 0-8, leaving row 9 open
	fn walled_grid(block_gap: bool) -> TerrainGrid {
		let mut grid = TerrainGrid::new(10, 10, 1.0);
		let last_row = if block_gap { 9 } else { 8 };
		for row in 0..=last_row {
			grid.set_cell_value(CellCategory::Impassable, GridCell::new(5, row));
		}
		grid
	}
	#[test]
	fn wall_with_gap_is_one_region() {
		//  _____________________
		// |__|__|__|__|__|x_|__|...
		// |__|__|__|__|__|x_|__|...
		// |  ...rows 0-8 blocked at column 5...
		// |__|__|__|__|__|__|__|... row 9 open
		let grid = walled_grid(false);
		let labels = RegionLabels::new(&grid);
		let west = labels.get_access_value(&grid, Vec2::new(0.5, 0.5));
		let east = labels.get_access_value(&grid, Vec2::new(9.5, 0.5));
		assert_eq!(west, east);
		assert!(labels.path_available(&grid, Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), false));
	}
	#[test]
	fn blocked_wall_splits_regions() {
		let grid = walled_grid(true);
		let labels = RegionLabels::new(&grid);
		let west = labels.get_access_value(&grid, Vec2::new(0.5, 0.5));
		let east = labels.get_access_value(&grid, Vec2::new(9.5, 0.5));
		assert_ne!(west, east);
		assert!(west != 0 && east != 0);
		assert!(!labels.path_available(&grid, Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), false));
	}
	#[test]
	fn path_available_is_symmetric() {
		let grid = walled_grid(true);
		let labels = RegionLabels::new(&grid);
		let points = vec![
			Vec2::new(0.5, 0.5),
			Vec2::new(9.5, 0.5),
			Vec2::new(2.5, 9.5),
			Vec2::new(8.5, 9.5),
		];
		for a in points.iter() {
			for b in points.iter() {
				assert_eq!(
					labels.path_available(&grid, *a, *b, false),
					labels.path_available(&grid, *b, *a, false)
				);
			}
		}
	}
	#[test]
	fn impassable_points_are_never_reachable() {
		let grid = walled_grid(true);
		let labels = RegionLabels::new(&grid);
		// both points inside the wall share its partition label yet remain
		// unreachable
		let a = Vec2::new(5.5, 0.5);
		let b = Vec2::new(5.5, 8.5);
		assert_eq!(
			labels.get_access_value(&grid, a),
			labels.get_access_value(&grid, b)
		);
		assert!(!labels.path_available(&grid, a, b, false));
	}
	#[test]
	fn land_and_water_label_separately() {
		// land on the west half, deep water on the east half
		let mut grid = TerrainGrid::new(8, 8, 1.0);
		for row in 0..8 {
			for col in 4..8 {
				grid.set_cell_value(CellCategory::DeepWater, GridCell::new(col, row));
			}
		}
		let labels = RegionLabels::new(&grid);
		let land = labels.get_access_value(&grid, Vec2::new(1.5, 1.5));
		let water = labels.get_access_value(&grid, Vec2::new(6.5, 1.5));
		assert_ne!(land, water);
		assert!(!labels.path_available(&grid, Vec2::new(1.5, 1.5), Vec2::new(6.5, 1.5), false));
	}
	#[test]
	fn labeling_is_idempotent() {
		// the same grid labeled twice yields the same equivalence classes of
		// cells even if the IDs themselves were to differ
		let grid = walled_grid(false);
		let first = RegionLabels::new(&grid);
		let second = RegionLabels::new(&grid);
		for row_a in 0..10 {
			for col_a in 0..10 {
				for row_b in 0..10 {
					for col_b in 0..10 {
						let a = GridCell::new(col_a, row_a);
						let b = GridCell::new(col_b, row_b);
						assert_eq!(
							first.get_label(a) == first.get_label(b),
							second.get_label(a) == second.get_label(b)
						);
					}
				}
			}
		}
	}
	#[test]
	fn region_sizes_match_brute_force_count() {
		//  ________________________
		// |__|__|x_|__|__|__|__|__|
		// |__|__|x_|__|__|__|__|__|
		// |__|__|x_|x_|x_|x_|x_|x_|
		// |__|__|__|__|__|__|__|__| ...
		let mut grid = TerrainGrid::new(8, 8, 1.0);
		grid.set_cell_value(CellCategory::Impassable, GridCell::new(2, 0));
		grid.set_cell_value(CellCategory::Impassable, GridCell::new(2, 1));
		for col in 2..8 {
			grid.set_cell_value(CellCategory::Impassable, GridCell::new(col, 2));
		}
		let labels = RegionLabels::new(&grid);
		for row in 0..8 {
			for col in 0..8 {
				let cell = GridCell::new(col, row);
				let label = labels.get_label(cell);
				let mut brute_force = 0;
				for other_row in 0..8 {
					for other_col in 0..8 {
						if labels.get_label(GridCell::new(other_col, other_row)) == label {
							brute_force += 1;
						}
					}
				}
				assert_eq!(brute_force, labels.get_region_size_from_label(label));
			}
		}
	}
	#[test]
	fn every_cell_gets_a_label() {
		let grid = walled_grid(true);
		let labels = RegionLabels::new(&grid);
		for row in 0..10 {
			for col in 0..10 {
				assert_ne!(0, labels.get_label(GridCell::new(col, row)));
			}
		}
	}
	#[test]
	fn strict_mode_rejects_cramped_pocket() {
		//  ______________
		// |__|__|__|x_|__|
		// |__|__|__|x_|__| a single-cell pocket at (4, 2) boxed in between
		// |__|__|__|x_|p_| the wall and the map edge
		// |__|__|__|x_|x_|
		// |__|__|__|x_|x_|
		let mut grid = TerrainGrid::new(5, 5, 1.0);
		for row in 0..5 {
			grid.set_cell_value(CellCategory::Impassable, GridCell::new(3, row));
		}
		grid.set_cell_value(CellCategory::Impassable, GridCell::new(4, 3));
		grid.set_cell_value(CellCategory::Impassable, GridCell::new(4, 4));
		let labels = RegionLabels::new(&grid);
		let pocket = Vec2::new(4.5, 2.5);
		let open = Vec2::new(4.5, 0.5);
		// non-strict only compares labels
		assert!(labels.path_available(&grid, open, pocket, false));
		// strict spots that the pocket endpoint is functionally a dead end
		assert!(!labels.path_available(&grid, open, pocket, true));
	}
	#[test]
	#[should_panic]
	fn dimension_mismatch_fails_loudly() {
		let grid = TerrainGrid::new(8, 8, 1.0);
		let labels = RegionLabels::new(&grid);
		let rebuilt = TerrainGrid::new(10, 10, 1.0);
		labels.get_access_value(&rebuilt, Vec2::new(0.5, 0.5));
	}
}
