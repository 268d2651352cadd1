//! Utility modules for planimetry_nav

pub mod grid_map;

pub use grid_map::*;
