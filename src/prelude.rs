//! `use bevy_terrain_analysis_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::terrain::{
	grid::*, raster::*, regions::*, resolver::*, search::*, utilities::*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{grid_layer::*, path_layer::*, *},
};
