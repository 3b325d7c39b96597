//! Measure running a path search corner to corner across a cluttered grid
//!

use bevy::prelude::*;
use bevy_terrain_analysis_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

/// Create an open grid with randomly placed impassable blocks
fn prepare_grid(width: usize, height: usize, cell_size: f32, block_count: usize) -> TerrainGrid {
	let mut grid = TerrainGrid::new(width, height, cell_size);
	let mut rng = rand::rng();
	for _ in 0..block_count {
		let column = rng.random_range(0..width);
		let row = rng.random_range(0..height);
		// keep the corners clear so a route always exists to be found
		if (column < 4 && row < 4) || (column >= width - 4 && row >= height - 4) {
			continue;
		}
		grid.set_cell_value(CellCategory::Impassable, GridCell::new(column, row));
	}
	grid
}

/// Run a search from the top-left corner to the bottom-right with no budget cap
fn calc(grid: &TerrainGrid) {
	let from = Vec2::new(1.0, 1.0);
	let to = Vec2::new(
		grid.get_width() as f32 - 1.0,
		grid.get_height() as f32 - 1.0,
	);
	let mut search = PathSearch::new(grid, from, to, Medium::Land, PathSearchConfig::default())
		.expect("endpoints should resolve to passable cells");
	let _progress = search.advance(grid, usize::MAX);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let grid = prepare_grid(256, 256, 1.0, 4000);
	group.bench_function("calc_path", |b| {
		b.iter(|| calc(black_box(&grid)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
