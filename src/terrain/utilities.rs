//! Shared tools and tunable constants used by the terrain analysis
//!

use crate::prelude::*;

/// Saturation cap for the family of near-obstruction markers, a cell never
/// records being more than this many obstructions deep
pub const NEAR_OBSTRUCTION_MAX_TIER: u8 = 8;
/// Minimum weighted 8-neighbourhood score for a cell to be considered usable
/// by the closest-passable-point resolver, cells scoring below this are
/// treated as pockets too cramped for unit movement
pub const CONNECTIVITY_THRESHOLD: f32 = 2.0;
/// Cost of moving between two orthogonally adjacent cells
pub const ORTHOGONAL_STEP_COST: i64 = 10;
/// Cost of moving between two diagonally adjacent cells
pub const DIAGONAL_STEP_COST: i64 = 14;

/// Convenience way of accessing the 4 sides of a cell when flood filling and
/// the 8 directions of movement used by [crate::prelude::PathSearch]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
}

impl Ordinal {
	/// The 8 directions of movement in expansion order
	pub const ALL: [Ordinal; 8] = [
		Ordinal::North,
		Ordinal::East,
		Ordinal::South,
		Ordinal::West,
		Ordinal::NorthEast,
		Ordinal::SouthEast,
		Ordinal::SouthWest,
		Ordinal::NorthWest,
	];
	/// The `(column, row)` delta a single step in this direction applies to a cell
	pub fn get_offset(&self) -> (i64, i64) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
		}
	}
	/// Whether stepping in this direction moves diagonally
	pub fn is_diagonal(&self) -> bool {
		matches!(
			self,
			Ordinal::NorthEast | Ordinal::SouthEast | Ordinal::SouthWest | Ordinal::NorthWest
		)
	}
	/// Based on a grid cells `(column, row)` position find its orthogonal
	/// neighbours within a grid of `width` columns and `height` rows (up to 4)
	pub fn get_orthogonal_cell_neighbours(
		cell: GridCell,
		width: usize,
		height: usize,
	) -> Vec<GridCell> {
		let mut neighbours = Vec::new();
		if cell.get_row() > 0 {
			neighbours.push(GridCell::new(cell.get_column(), cell.get_row() - 1)); // northern cell coords
		}
		if cell.get_column() < width - 1 {
			neighbours.push(GridCell::new(cell.get_column() + 1, cell.get_row())); // eastern cell coords
		}
		if cell.get_row() < height - 1 {
			neighbours.push(GridCell::new(cell.get_column(), cell.get_row() + 1)); // southern cell coords
		}
		if cell.get_column() > 0 {
			neighbours.push(GridCell::new(cell.get_column() - 1, cell.get_row())); // western cell coords
		}
		neighbours
	}
	/// Based on a grid cells `(column, row)` position find all possible
	/// neighbours including diagonal directions within a grid of `width`
	/// columns and `height` rows (up to 8)
	pub fn get_all_cell_neighbours(cell: GridCell, width: usize, height: usize) -> Vec<GridCell> {
		let column = cell.get_column();
		let row = cell.get_row();
		let mut neighbours = Vec::new();
		if row > 0 {
			neighbours.push(GridCell::new(column, row - 1)); // northern cell coords
		}
		if column < width - 1 {
			neighbours.push(GridCell::new(column + 1, row)); // eastern cell coords
		}
		if row < height - 1 {
			neighbours.push(GridCell::new(column, row + 1)); // southern cell coords
		}
		if column > 0 {
			neighbours.push(GridCell::new(column - 1, row)); // western cell coords
		}
		if row > 0 && column < width - 1 {
			neighbours.push(GridCell::new(column + 1, row - 1)); // north-east cell
		}
		if row < height - 1 && column < width - 1 {
			neighbours.push(GridCell::new(column + 1, row + 1)); // south-east cell
		}
		if row < height - 1 && column > 0 {
			neighbours.push(GridCell::new(column - 1, row + 1)); // south-west cell
		}
		if row > 0 && column > 0 {
			neighbours.push(GridCell::new(column - 1, row - 1)); // north-west cell
		}
		neighbours
	}
}
