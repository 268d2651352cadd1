// Mission planning module

pub mod signal_navigation;

pub use signal_navigation::*;
