//! Drive a whole analysis session by hand: rasterize a snapshot, label the
//! regions, answer reachability queries and run a budgeted search to a path
//!

use bevy::math::Vec2;
use bevy_terrain_analysis_plugin::prelude::*;

/// A 20x20 world, landmass split by a deep river down column 10 with a
/// shallow ford at row 18, a forest cluster in the north west
fn build_world() -> (PassabilitySnapshot, Vec<ObstructionEntity>) {
	let land = 0b10u16;
	let deep = 0b01u16;
	let shallow = 0b00u16;
	let mut bitmasks = vec![land; 400];
	for row in 0..20 {
		bitmasks[10 + row * 20] = deep;
	}
	bitmasks[10 + 18 * 20] = shallow;
	let snapshot = PassabilitySnapshot::new(20, 20, 2.0, bitmasks, 0b01, 0b10);
	let forest = vec![
		ObstructionEntity::new(Some(Vec2::new(5.0, 5.0)), 1.0, ObstructionSource::Vegetation),
		ObstructionEntity::new(Some(Vec2::new(7.0, 5.0)), 1.0, ObstructionSource::Vegetation),
		ObstructionEntity::new(Some(Vec2::new(5.0, 7.0)), 1.0, ObstructionSource::Vegetation),
		// the host couldn't place this one, it must be skipped harmlessly
		ObstructionEntity::new(None, 1.0, ObstructionSource::Vegetation),
		ObstructionEntity::new(Some(Vec2::new(30.0, 30.0)), 3.0, ObstructionSource::Geology),
	];
	(snapshot, forest)
}

#[test]
fn session_end_to_end() {
	let (snapshot, entities) = build_world();
	let grid = TerrainGrid::from_snapshot(&snapshot, &entities);
	let labels = RegionLabels::new(&grid);

	// the ford joins both banks into one land region
	let west = Vec2::new(3.0, 3.0);
	let east = Vec2::new(37.0, 3.0);
	assert!(labels.path_available(&grid, west, east, false));
	assert_eq!(
		labels.get_access_value(&grid, west),
		labels.get_access_value(&grid, east)
	);
	assert!(labels.get_region_size(&grid, west) > 300);

	// the river itself is a separate water region
	let river = Vec2::new(21.0, 11.0);
	assert_ne!(
		labels.get_access_value(&grid, west),
		labels.get_access_value(&grid, river)
	);

	// a budgeted search suspends then finds a route over the ford
	let mut search = PathSearch::new(
		&grid,
		west,
		east,
		Medium::Land,
		PathSearchConfig::default(),
	)
	.unwrap();
	let mut outcome = SearchProgress::Suspended;
	let mut ticks = 0;
	while outcome == SearchProgress::Suspended {
		outcome = search.advance(&grid, 25);
		ticks += 1;
		assert!(ticks < 10_000, "search failed to terminate");
	}
	let SearchProgress::Found(path) = outcome else {
		panic!("expected a route over the ford, got {:?}", outcome);
	};
	assert!(!path.requires_water_crossing());
	let first = *path.get_waypoints().first().unwrap();
	let last = *path.get_waypoints().last().unwrap();
	assert_eq!(
		grid.get_map_pos_from_xz(first),
		grid.get_map_pos_from_xz(west)
	);
	assert_eq!(grid.get_map_pos_from_xz(last), grid.get_map_pos_from_xz(east));

	// felling the forest restores open ground around the trees
	let mut grid = grid;
	for entity in entities.iter() {
		if entity.get_source() == ObstructionSource::Vegetation {
			grid.clear_obstruction(&snapshot, entity);
		}
	}
	assert_eq!(
		CellCategory::Land,
		grid.get_cell_value(grid.get_map_pos_from_xz(Vec2::new(5.0, 5.0)).unwrap())
	);
}
