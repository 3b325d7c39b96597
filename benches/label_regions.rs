//! Measure flood-labelling the passable regions of a large grid
//!
//! The grid is carved into corridors by impassable walls so that the fill has
//! to work around plenty of boundaries rather than sweeping one open area
//!

use bevy_terrain_analysis_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Create a grid striped with walls, each with a single gap
fn prepare_grid(width: usize, height: usize, cell_size: f32) -> TerrainGrid {
	let mut grid = TerrainGrid::new(width, height, cell_size);
	for column in (8..width).step_by(16) {
		for row in 0..height {
			if row == height / 2 {
				continue;
			}
			grid.set_cell_value(CellCategory::Impassable, GridCell::new(column, row));
		}
	}
	grid
}

/// Label every connected region of the grid
fn label(grid: &TerrainGrid) {
	let _labels = RegionLabels::new(grid);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("data_initialisation");
	group.significance_level(0.05).sample_size(100);
	let grid = prepare_grid(512, 512, 1.0);
	group.bench_function("label_regions", |b| {
		b.iter(|| label(black_box(&grid)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
