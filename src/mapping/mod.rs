// Mapping module

pub mod planimetry;

pub use planimetry::*;
