//! This is a plugin for the Bevy game engine providing terrain accessibility
//! analysis and resumable pathfinding for RTS-style computer players
//!

pub mod terrain;
pub mod bundle;
pub mod plugin;

pub mod prelude;
