// Path planning module

pub mod node;
pub mod grid_planner;
pub mod path_simplification;

pub use node::*;
pub use grid_planner::*;
pub use path_simplification::*;
