//! Snaps an arbitrary cell, which may fall on an obstruction, to the nearest
//! cell that a unit of a given [Medium] can actually use. Both the region
//! labeler and the path search anchor their queries through this so that a
//! search never starts inside a cliff or a single-cell pocket.
//!

use crate::prelude::*;

/// Weighted sum of the 8-neighbourhood around a cell measuring how usable the
/// cell is for a unit's footprint. Cleanly passable neighbours contribute a
/// full weight of `1.0`, near-obstruction tiers contribute a fraction that
/// shrinks as the tier climbs, blocked or wrong-medium neighbours contribute
/// nothing. A nearly-surrounded cell therefore scores low even when its own
/// category is nominally passable
pub fn connectivity_score(grid: &TerrainGrid, cell: GridCell, medium: Medium) -> f32 {
	let mut score = 0.0;
	for neighbour in Ordinal::get_all_cell_neighbours(cell, grid.get_width(), grid.get_height()) {
		let category = grid.get_cell_value(neighbour);
		if !category.is_passable(medium) {
			continue;
		}
		let tier = category.get_near_obstruction_tier();
		score += 1.0 - tier as f32 / (NEAR_OBSTRUCTION_MAX_TIER + 1) as f32;
	}
	score
}

/// Search outward from `start` in a square spiral for the nearest cell that
/// is passable for the requested medium and whose [connectivity_score] clears
/// [CONNECTIVITY_THRESHOLD]. Returns [None] once the spiral legs exceed
/// `max_radius` cells without finding one - callers must treat that as "give
/// up on this destination" rather than retrying
pub fn find_closest_passable(
	grid: &TerrainGrid,
	start: GridCell,
	medium: Medium,
	max_radius: usize,
) -> Option<GridCell> {
	if !grid.in_bounds(start) {
		return None;
	}
	let usable = |cell: GridCell| {
		grid.get_cell_value(cell).is_passable(medium)
			&& connectivity_score(grid, cell, medium) >= CONNECTIVITY_THRESHOLD
	};
	if usable(start) {
		return Some(start);
	}
	// walk a square spiral of alternating axis legs: 1 east, 1 south, 2 west,
	// 2 north, 3 east, 3 south and so on, skipping cells off the grid
	let mut column = start.get_column() as i64;
	let mut row = start.get_row() as i64;
	let legs = [(1i64, 0i64), (0, 1), (-1, 0), (0, -1)];
	let mut leg_length = 1i64;
	let mut leg_index = 0;
	while leg_length as usize <= 2 * max_radius + 1 {
		let (d_col, d_row) = legs[leg_index];
		for _ in 0..leg_length {
			column += d_col;
			row += d_row;
			if column < 0 || row < 0 {
				continue;
			}
			let candidate = GridCell::new(column as usize, row as usize);
			if !grid.in_bounds(candidate) {
				continue;
			}
			if usable(candidate) {
				return Some(candidate);
			}
		}
		leg_index = (leg_index + 1) % 4;
		// the leg grows after every second turn
		if leg_index % 2 == 0 {
			leg_length += 1;
		}
	}
	None
}
