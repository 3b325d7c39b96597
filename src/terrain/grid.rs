//! The TerrainGrid is a fixed-resolution 2D array over the game world where
//! each cell holds a [CellCategory] describing what kind of unit movement it
//! supports. A grid is rebuilt wholesale from a host snapshot once per
//! analysis session. An example grid may look:
//!
//! ```text
//!  ____________________________________________________________
//! |      |      |      |      |      |      |      |      |    |
//! |  L   |  L   |  L   |  N1  |  N2  |  N1  |  L   |  S   | D  |
//! |______|______|______|______|______|______|______|______|____|
//! |      |      |      |      |      |      |      |      |    |
//! |  L   |  G   |  L   |  N1  |  X   |  N1  |  L   |  S   | D  |
//! |______|______|______|______|______|______|______|______|____|
//! |      |      |      |      |      |      |      |      |    |
//! |  L   |  L   |  L   |  N1  |  N1  |  N1  |  L   |  S   | D  |
//! |______|______|______|______|______|______|______|______|____|
//! ```
//!
//! `L` land, `S` shallow water, `D` deep water, `X` impassable, `Nx`
//! near-obstruction tiers and `G` a geology/resource marker.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// The two families of unit movement a cell can support
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum Medium {
	/// Foot/wheeled movement over land-family cells
	Land,
	/// Ship movement over water-family cells
	Water,
}

/// Category code of a single grid cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum CellCategory {
	/// Blocked for every medium
	Impassable,
	/// Navigable by ships only
	DeepWater,
	/// Navigable by both ships and wading land units
	ShallowWater,
	/// Open ground
	#[default]
	Land,
	/// Land within `tier` obstructions of a blocking feature, used to softly
	/// bias paths away from clutter without forbidding it
	NearObstruction(u8),
	/// Resource-occupied land, still passable unless truly blocked
	Geology,
}

impl CellCategory {
	/// Whether a unit of the given [Medium] can occupy this cell
	pub fn is_passable(&self, medium: Medium) -> bool {
		match medium {
			Medium::Land => matches!(
				self,
				CellCategory::Land
					| CellCategory::NearObstruction(_)
					| CellCategory::Geology
					| CellCategory::ShallowWater
			),
			Medium::Water => {
				matches!(self, CellCategory::DeepWater | CellCategory::ShallowWater)
			}
		}
	}
	/// Whether any medium at all can occupy this cell
	pub fn is_navigable(&self) -> bool {
		!matches!(self, CellCategory::Impassable)
	}
	/// The near-obstruction tier of this cell, `0` when the cell carries no
	/// near-obstruction marker
	pub fn get_near_obstruction_tier(&self) -> u8 {
		match self {
			CellCategory::NearObstruction(tier) => *tier,
			_ => 0,
		}
	}
}

/// ID of a cell within a [TerrainGrid]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct GridCell((usize, usize));

impl GridCell {
	/// Create a new instance of [GridCell]
	pub fn new(column: usize, row: usize) -> Self {
		GridCell((column, row))
	}
	/// Get the cell `(column, row)` tuple
	pub fn get_column_row(&self) -> (usize, usize) {
		self.0
	}
	/// Get the cell column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the cell row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
	/// Raster the straight line from `self` to `target` into the list of
	/// [GridCell] it crosses, ordered from `self` to `target`. The walk
	/// steps one cell at a time, moving diagonally when the accumulated
	/// error says the line has left the current row and column together, so
	/// consecutive cells are always 8-connected. Rastering is canonically
	/// oriented: swapping the endpoints yields the same cells reversed
	pub fn get_cells_between_points(&self, target: &GridCell) -> Vec<GridCell> {
		if (target.get_column(), target.get_row()) < (self.get_column(), self.get_row()) {
			let mut cells = target.get_cells_between_points(self);
			cells.reverse();
			return cells;
		}
		let mut col = self.get_column() as i64;
		let mut row = self.get_row() as i64;
		let target_col = target.get_column() as i64;
		let target_row = target.get_row() as i64;
		let delta_col = (target_col - col).abs();
		let delta_row = -(target_row - row).abs();
		let step_col = if col < target_col { 1 } else { -1 };
		let step_row = if row < target_row { 1 } else { -1 };
		let mut error = delta_col + delta_row;
		let mut cells = Vec::with_capacity(delta_col.max(-delta_row) as usize + 1);
		loop {
			cells.push(GridCell::new(col as usize, row as usize));
			if col == target_col && row == target_row {
				return cells;
			}
			let doubled = 2 * error;
			if doubled >= delta_row {
				error += delta_row;
				col += step_col;
			}
			if doubled <= delta_col {
				error += delta_col;
				row += step_row;
			}
		}
	}
}

/// Navigability model of the game world. `width`, `height` and `cell_size`
/// are fixed at construction, cells are stored row-major as
/// `column + row * width`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone)]
pub struct TerrainGrid {
	/// Number of cell columns
	width: usize,
	/// Number of cell rows
	height: usize,
	/// World units covered by one cell along each axis
	cell_size: f32,
	/// Category code per cell
	cells: Vec<CellCategory>,
}

impl TerrainGrid {
	/// Create a new instance of [TerrainGrid] with every cell set to
	/// [CellCategory::Land]
	pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
		if width == 0 || height == 0 {
			panic!(
				"TerrainGrid dimensions must be non-zero, asked for ({}, {})",
				width, height
			);
		}
		if cell_size <= 0.0 {
			panic!("TerrainGrid cell_size must be positive, asked for {}", cell_size);
		}
		TerrainGrid {
			width,
			height,
			cell_size,
			cells: vec![CellCategory::default(); width * height],
		}
	}
	/// Number of cell columns
	pub fn get_width(&self) -> usize {
		self.width
	}
	/// Number of cell rows
	pub fn get_height(&self) -> usize {
		self.height
	}
	/// World units covered by one cell along each axis
	pub fn get_cell_size(&self) -> f32 {
		self.cell_size
	}
	/// Whether the cell sits within the grid
	pub fn in_bounds(&self, cell: GridCell) -> bool {
		cell.get_column() < self.width && cell.get_row() < self.height
	}
	/// Flat index of a cell, [None] when the cell is outside the grid
	pub fn index_of(&self, cell: GridCell) -> Option<usize> {
		if self.in_bounds(cell) {
			Some(cell.get_column() + cell.get_row() * self.width)
		} else {
			None
		}
	}
	/// Cell at a flat index, the inverse of [Self::index_of]
	pub fn cell_of(&self, index: usize) -> GridCell {
		GridCell::new(index % self.width, index / self.width)
	}
	/// Retrieve a cell category
	pub fn get_cell_value(&self, cell: GridCell) -> CellCategory {
		match self.index_of(cell) {
			Some(index) => self.cells[index],
			None => panic!(
				"Cannot get a TerrainGrid value, index out of bounds. Asked for column {}, row {}, grid is {} columns by {} rows",
				cell.get_column(), cell.get_row(), self.width, self.height
			),
		}
	}
	/// Set a cell to a category
	pub fn set_cell_value(&mut self, value: CellCategory, cell: GridCell) {
		match self.index_of(cell) {
			Some(index) => self.cells[index] = value,
			None => panic!(
				"Cannot set a TerrainGrid value, index out of bounds. Asked for column {}, row {}, grid is {} columns by {} rows",
				cell.get_column(), cell.get_row(), self.width, self.height
			),
		}
	}
	/// From a world position in `(x, z)` space with an origin at the grid
	/// corner `(0, 0)` calculate the cell that point resides in. Out-of-world
	/// positions return [None], there is no clamping so caller bugs aren't
	/// masked with wrong-but-plausible answers
	pub fn get_map_pos_from_xz(&self, position: Vec2) -> Option<GridCell> {
		if position.x < 0.0
			|| position.y < 0.0
			|| position.x >= self.width as f32 * self.cell_size
			|| position.y >= self.height as f32 * self.cell_size
		{
			error!(
				"Position is out of bounds of TerrainGrid, x {}, z {}, cannot calculate GridCell. Is the actor outside of the map or trying to request a route outside of it?",
				position.x, position.y
			);
			return None;
		}
		let column = (position.x / self.cell_size).floor() as usize;
		let row = (position.y / self.cell_size).floor() as usize;
		Some(GridCell::new(column, row))
	}
	/// From a cell retrieve the `(x, z)` world position of its centre. If the
	/// cell sits outside of the grid then [None] is returned
	pub fn get_xz_from_map_pos(&self, cell: GridCell) -> Option<Vec2> {
		if !self.in_bounds(cell) {
			return None;
		}
		// NB: add half of the cell size to each coord to obtain the centre position of the cell
		Some(Vec2::new(
			cell.get_column() as f32 * self.cell_size + self.cell_size / 2.0,
			cell.get_row() as f32 * self.cell_size + self.cell_size / 2.0,
		))
	}
	/// Raise the near-obstruction tier of a cell by one, saturating at
	/// [NEAR_OBSTRUCTION_MAX_TIER]. Only plain land records proximity, water
	/// and blocked cells are unchanged
	pub fn bump_near_obstruction(&mut self, cell: GridCell) {
		let value = match self.get_cell_value(cell) {
			CellCategory::Land => CellCategory::NearObstruction(1),
			CellCategory::NearObstruction(tier) => {
				CellCategory::NearObstruction(tier.saturating_add(1).min(NEAR_OBSTRUCTION_MAX_TIER))
			}
			other => other,
		};
		self.set_cell_value(value, cell);
	}
	/// Lower the near-obstruction tier of a cell by one, dropping back to
	/// plain land at tier one. The inverse of [Self::bump_near_obstruction],
	/// so removing one contributor leaves the tiers of any overlapping
	/// survivors intact
	pub fn lower_near_obstruction(&mut self, cell: GridCell) {
		let value = match self.get_cell_value(cell) {
			CellCategory::NearObstruction(1) => CellCategory::Land,
			CellCategory::NearObstruction(tier) => CellCategory::NearObstruction(tier - 1),
			other => other,
		};
		self.set_cell_value(value, cell);
	}
}
