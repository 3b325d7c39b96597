//! Converts host-engine obstruction data into [TerrainGrid] cell categories.
//!
//! The host supplies two inputs: a per-cell passability bitmask grid with
//! named class masks describing which classes of movement each cell blocks,
//! and a list of live entities with a world position and an obstruction
//! radius. Rasterization derives a base category per cell from the bitmasks
//! and then stamps entity footprints over the top - vegetation marks a halo
//! of near-obstruction tiers, geology features mark a disc of resource cells.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Snapshot of the host engine's passability bitmap taken at the start of an
/// analysis session. A set bit means "blocked for that movement class"
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone)]
pub struct PassabilitySnapshot {
	/// Number of cell columns
	width: usize,
	/// Number of cell rows
	height: usize,
	/// World units covered by one cell along each axis
	cell_size: f32,
	/// Per-cell passability class flags, row-major `column + row * width`
	bitmasks: Vec<u16>,
	/// Bits which when set mean the cell blocks land movement
	land_mask: u16,
	/// Bits which when set mean the cell blocks ship movement
	ship_mask: u16,
}

impl PassabilitySnapshot {
	/// Create a new instance of [PassabilitySnapshot]
	pub fn new(
		width: usize,
		height: usize,
		cell_size: f32,
		bitmasks: Vec<u16>,
		land_mask: u16,
		ship_mask: u16,
	) -> Self {
		if bitmasks.len() != width * height {
			panic!(
				"PassabilitySnapshot bitmask length {} does not cover a {} by {} grid",
				bitmasks.len(),
				width,
				height
			);
		}
		PassabilitySnapshot {
			width,
			height,
			cell_size,
			bitmasks,
			land_mask,
			ship_mask,
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
	/// Derive the base [CellCategory] of the cell at a flat index by ANDing
	/// its bitmask against the named class masks
	pub fn base_category(&self, index: usize) -> CellCategory {
		let bits = self.bitmasks[index];
		let blocks_land = bits & self.land_mask != 0;
		let blocks_ship = bits & self.ship_mask != 0;
		match (blocks_land, blocks_ship) {
			(true, false) => CellCategory::DeepWater,
			(false, false) => CellCategory::ShallowWater,
			(true, true) => CellCategory::Impassable,
			(false, true) => CellCategory::Land,
		}
	}
	/// From a `ron` file generate the [PassabilitySnapshot]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: String) -> Self {
		let file = std::fs::File::open(path).expect("Failed opening PassabilitySnapshot file");
		let snapshot: PassabilitySnapshot = match ron::de::from_reader(file) {
			Ok(snapshot) => snapshot,
			Err(e) => panic!("Failed deserializing PassabilitySnapshot: {}", e),
		};
		snapshot
	}
}

/// Coarse classification of an obstructing entity
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum ObstructionSource {
	/// Forest-like obstruction land units should be biased away from but
	/// which isn't fully blocking
	Vegetation,
	/// Punctual resource feature occupying a disc of cells
	Geology,
	/// Anything else, contributes nothing to the grid
	Other,
}

/// A live entity reported by the host engine with a footprint that can be
/// rasterized onto the grid
#[derive(Clone, Debug)]
pub struct ObstructionEntity {
	/// World `(x, z)` position, [None] when the host cannot resolve one
	position: Option<Vec2>,
	/// Footprint radius in world units
	obstruction_radius: f32,
	/// Coarse classification driving how the footprint is stamped
	source: ObstructionSource,
}

impl ObstructionEntity {
	/// Create a new instance of [ObstructionEntity]
	pub fn new(position: Option<Vec2>, obstruction_radius: f32, source: ObstructionSource) -> Self {
		ObstructionEntity {
			position,
			obstruction_radius,
			source,
		}
	}
	/// World `(x, z)` position of the entity, if the host can resolve one
	pub fn get_position(&self) -> Option<Vec2> {
		self.position
	}
	/// Footprint radius in world units
	pub fn get_obstruction_radius(&self) -> f32 {
		self.obstruction_radius
	}
	/// Coarse classification of the entity
	pub fn get_source(&self) -> ObstructionSource {
		self.source
	}
}

impl TerrainGrid {
	/// Rasterize a fresh [TerrainGrid] from a host snapshot and the live
	/// entity list. Entities without a resolvable position are skipped, not
	/// fatal to the whole build
	pub fn from_snapshot(snapshot: &PassabilitySnapshot, entities: &[ObstructionEntity]) -> Self {
		let mut grid = TerrainGrid::new(
			snapshot.get_width(),
			snapshot.get_height(),
			snapshot.get_cell_size(),
		);
		for index in 0..snapshot.get_width() * snapshot.get_height() {
			let cell = grid.cell_of(index);
			grid.set_cell_value(snapshot.base_category(index), cell);
		}
		for entity in entities.iter() {
			grid.stamp_obstruction(entity);
		}
		grid
	}
	/// Mark the footprint of a single entity onto the grid. Used during the
	/// initial rasterization pass and for applying a recent create event
	/// without rebuilding the whole grid
	pub fn stamp_obstruction(&mut self, entity: &ObstructionEntity) {
		let Some(cell) = self.resolve_entity_cell(entity) else {
			return;
		};
		match entity.get_source() {
			ObstructionSource::Vegetation => {
				// own cell plus the 8-neighbourhood pick up a proximity tier
				self.bump_near_obstruction(cell);
				for neighbour in
					Ordinal::get_all_cell_neighbours(cell, self.get_width(), self.get_height())
				{
					self.bump_near_obstruction(neighbour);
				}
			}
			ObstructionSource::Geology => {
				for disc_cell in self.footprint_disc(cell, entity.get_obstruction_radius()) {
					// truly blocked cells take precedence over resource markers
					if self.get_cell_value(disc_cell) != CellCategory::Impassable {
						self.set_cell_value(CellCategory::Geology, disc_cell);
					}
				}
			}
			ObstructionSource::Other => {}
		}
	}
	/// Unwind a single entity's footprint from the grid as the exact inverse
	/// of [Self::stamp_obstruction] - vegetation halos step their tiers down
	/// one, geology markers revert to the snapshot base category. Cells
	/// contributed to by other still-alive entities keep those contributions,
	/// the patched grid must match a wholesale rebuild without the entity
	pub fn clear_obstruction(&mut self, snapshot: &PassabilitySnapshot, entity: &ObstructionEntity) {
		if snapshot.get_width() != self.get_width() || snapshot.get_height() != self.get_height() {
			panic!(
				"PassabilitySnapshot dimensions ({}, {}) do not match TerrainGrid dimensions ({}, {})",
				snapshot.get_width(),
				snapshot.get_height(),
				self.get_width(),
				self.get_height()
			);
		}
		let Some(cell) = self.resolve_entity_cell(entity) else {
			return;
		};
		match entity.get_source() {
			ObstructionSource::Vegetation => {
				self.lower_near_obstruction(cell);
				for neighbour in
					Ordinal::get_all_cell_neighbours(cell, self.get_width(), self.get_height())
				{
					self.lower_near_obstruction(neighbour);
				}
			}
			ObstructionSource::Geology => {
				for disc_cell in self.footprint_disc(cell, entity.get_obstruction_radius()) {
					// only revert cells carrying a marker, overlapping halos
					// from vegetation are not geology's to restore
					if self.get_cell_value(disc_cell) != CellCategory::Geology {
						continue;
					}
					let index = self
						.index_of(disc_cell)
						.expect("footprint cells are bounds-checked on creation");
					self.set_cell_value(snapshot.base_category(index), disc_cell);
				}
			}
			ObstructionSource::Other => {}
		}
	}
	/// Convert an entity's world position into its cell, skipping entities
	/// the host cannot place
	fn resolve_entity_cell(&self, entity: &ObstructionEntity) -> Option<GridCell> {
		let Some(position) = entity.get_position() else {
			warn!(
				"Skipping {:?} obstruction with no resolvable position",
				entity.get_source()
			);
			return None;
		};
		self.get_map_pos_from_xz(position)
	}
	/// The in-bounds cells within `radius` world units of a centre cell
	fn footprint_disc(&self, centre: GridCell, radius: f32) -> Vec<GridCell> {
		let cell_radius = (radius / self.get_cell_size()).ceil() as i64;
		let centre_col = centre.get_column() as i64;
		let centre_row = centre.get_row() as i64;
		let mut cells = Vec::new();
		for row in centre_row - cell_radius..=centre_row + cell_radius {
			for col in centre_col - cell_radius..=centre_col + cell_radius {
				if col < 0 || row < 0 {
					continue;
				}
				let candidate = GridCell::new(col as usize, row as usize);
				if !self.in_bounds(candidate) {
					continue;
				}
				let d_col = col - centre_col;
				let d_row = row - centre_row;
				if d_col * d_col + d_row * d_row <= cell_radius * cell_radius {
					cells.push(candidate);
				}
			}
		}
		cells
	}
}
